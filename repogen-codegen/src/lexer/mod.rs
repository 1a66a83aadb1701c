//! Lossless tokenizer for the generated host-language sources.
//!
//! The lexer knows just enough of the grammar to find structure (keywords,
//! names, braces) without building a syntax tree. Every byte of the input
//! ends up in exactly one token, so concatenating token texts reproduces the
//! input; unknown or malformed input degrades into single-character
//! [`TokenKind::Punct`] tokens instead of failing.

mod cursor;
mod stream;
mod token;

use cursor::Cursor;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};

/// Tokenize a whole file, starting outside of any open tag.
pub fn tokenize(src: &str) -> TokenStream {
    Lexer::new(src, Mode::Markup).run()
}

/// Tokenize a fragment meant to be spliced into another stream.
///
/// A leading open tag is a boundary artifact of the stub file and is dropped,
/// together with any blank text in front of it; fragments without one are
/// read as code.
pub fn tokenize_fragment(src: &str) -> TokenStream {
    let mut tokens = Lexer::new(src, Mode::Markup).run().into_tokens();
    let blank_prefix = tokens
        .first()
        .is_some_and(|t| t.kind == TokenKind::InlineHtml && t.text.trim().is_empty());
    let open_at = usize::from(blank_prefix);

    match tokens.get(open_at).map(|t| t.kind) {
        Some(TokenKind::OpenTag) => {
            tokens.drain(..=open_at);
            tokens.into_iter().collect()
        }
        _ if tokens.is_empty() => TokenStream::default(),
        _ => Lexer::new(src, Mode::Code).run(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Markup,
    Code,
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    mode: Mode,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str, mode: Mode) -> Self {
        Self {
            cursor: Cursor::new(src),
            mode,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> TokenStream {
        while !self.cursor.is_eof() {
            match self.mode {
                Mode::Markup => self.markup(),
                Mode::Code => self.code(),
            }
        }
        TokenStream::new(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = self.cursor.slice_from(start);
        if !text.is_empty() {
            self.tokens.push(Token::new(kind, text));
        }
    }

    fn markup(&mut self) {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() && !self.at_open_tag() {
            self.cursor.bump();
        }
        self.push(TokenKind::InlineHtml, start);

        if self.cursor.is_eof() {
            return;
        }

        let start = self.cursor.pos();
        if self.cursor.starts_with("<?=") {
            self.cursor.advance(3);
        } else {
            self.cursor.advance("<?php".len());
            if !self.cursor.eat_newline() && self.cursor.peek().is_some_and(char::is_whitespace) {
                self.cursor.bump();
            }
        }
        self.push(TokenKind::OpenTag, start);
        self.mode = Mode::Code;
    }

    fn at_open_tag(&self) -> bool {
        if self.cursor.starts_with("<?=") {
            return true;
        }
        self.cursor.starts_with_ignore_case("<?php")
            && self
                .cursor
                .peek_nth(5)
                .is_none_or(char::is_whitespace)
    }

    fn code(&mut self) {
        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return;
        };

        let kind = match c {
            c if c.is_whitespace() => {
                self.cursor.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            '?' if self.cursor.starts_with("?>") => {
                self.cursor.advance(2);
                self.cursor.eat_newline();
                self.mode = Mode::Markup;
                TokenKind::CloseTag
            }
            '#' if !self.cursor.starts_with("#[") => self.line_comment(),
            '/' if self.cursor.starts_with("//") => self.line_comment(),
            '/' if self.cursor.starts_with("/*") => self.block_comment(),
            '$' if self.cursor.peek_nth(1).is_some_and(is_name_start) => {
                self.cursor.bump();
                self.cursor.eat_while(is_name_char);
                TokenKind::Variable
            }
            '\'' | '"' | '`' => self.quoted(c),
            '<' if self.cursor.starts_with("<<<") && self.heredoc() => TokenKind::StringLiteral,
            c if c.is_ascii_digit() => self.number(),
            '.' if self.cursor.peek_nth(1).is_some_and(|n| n.is_ascii_digit()) => self.number(),
            c if is_name_start(c) => self.name(),
            '\\' if self.cursor.peek_nth(1).is_some_and(is_name_start) => self.name(),
            _ => self.operator_or_punct(),
        };
        self.push(kind, start);
    }

    /// `//` or `#` comment, ending before the line break or a close tag.
    fn line_comment(&mut self) -> TokenKind {
        while let Some(c) = self.cursor.peek() {
            if c == '\n' || c == '\r' || self.cursor.starts_with("?>") {
                break;
            }
            self.cursor.bump();
        }
        TokenKind::Comment
    }

    fn block_comment(&mut self) -> TokenKind {
        let doc = self.cursor.starts_with("/**")
            && self.cursor.peek_nth(3).is_some_and(char::is_whitespace);
        self.cursor.advance(2);
        self.cursor.eat_until("*/");
        self.cursor.eat("*/");
        if doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        }
    }

    fn quoted(&mut self, quote: char) -> TokenKind {
        self.cursor.bump();
        while let Some(c) = self.cursor.bump() {
            if c == '\\' {
                self.cursor.bump();
            } else if c == quote {
                break;
            }
        }
        TokenKind::StringLiteral
    }

    /// `<<<LABEL` / `<<<"LABEL"` / `<<<'LABEL'` up to the closing label.
    /// Restores the cursor and returns false when the opener is malformed.
    fn heredoc(&mut self) -> bool {
        let start = self.cursor.pos();
        self.cursor.advance(3);
        self.cursor.eat_while(|c| c == ' ' || c == '\t');

        let quote = match self.cursor.peek() {
            Some(q @ ('\'' | '"')) => {
                self.cursor.bump();
                Some(q)
            }
            _ => None,
        };

        let label_start = self.cursor.pos();
        if !self.cursor.peek().is_some_and(is_name_start) {
            self.cursor.reset(start);
            return false;
        }
        self.cursor.eat_while(is_name_char);
        let label = self.cursor.slice_from(label_start);

        if let Some(q) = quote
            && self.cursor.bump() != Some(q)
        {
            self.cursor.reset(start);
            return false;
        }
        if !self.cursor.eat_newline() {
            self.cursor.reset(start);
            return false;
        }

        while !self.cursor.is_eof() {
            let line_start = self.cursor.pos();
            self.cursor.eat_while(|c| c == ' ' || c == '\t');
            if self.cursor.starts_with(label)
                && !self.cursor.peek_nth(label.chars().count()).is_some_and(is_name_char)
            {
                self.cursor.advance(label.len());
                return true;
            }
            self.cursor.reset(line_start);
            self.cursor.eat_until("\n");
            self.cursor.eat("\n");
        }
        true
    }

    fn number(&mut self) -> TokenKind {
        let mut prev = '\0';
        while let Some(c) = self.cursor.peek() {
            let exponent_sign = (c == '+' || c == '-') && matches!(prev, 'e' | 'E');
            let fraction =
                c == '.' && self.cursor.peek_nth(1).is_some_and(|n| n.is_ascii_digit());
            if !(c.is_ascii_alphanumeric() || c == '_' || exponent_sign || fraction) {
                break;
            }
            prev = c;
            self.cursor.bump();
        }
        TokenKind::Number
    }

    fn name(&mut self) -> TokenKind {
        let start = self.cursor.pos();
        let mut qualified = false;
        loop {
            if self.cursor.peek() == Some('\\') {
                if !self.cursor.peek_nth(1).is_some_and(is_name_start) {
                    break;
                }
                qualified = true;
                self.cursor.bump();
            }
            if !self.cursor.peek().is_some_and(is_name_start) {
                break;
            }
            self.cursor.eat_while(is_name_char);
        }

        if qualified {
            TokenKind::QualifiedName
        } else if token::is_keyword(self.cursor.slice_from(start)) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    fn operator_or_punct(&mut self) -> TokenKind {
        if let Some(op) = token::OPERATORS.iter().find(|op| self.cursor.starts_with(op)) {
            self.cursor.advance(op.len());
            return TokenKind::Operator;
        }
        self.cursor.bump();
        TokenKind::Punct
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}
