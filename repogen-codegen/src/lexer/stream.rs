//! Ordered token sequence with splice and lookup helpers.

use std::fmt;
use std::ops::Range;

use super::Token;

/// The tokens of one file or fragment, in source order.
///
/// `to_source` is the exact inverse of tokenization: it concatenates the
/// token texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Concatenate every token's text.
    pub fn to_source(&self) -> String {
        let mut out = String::with_capacity(self.tokens.iter().map(|t| t.text.len()).sum());
        for token in &self.tokens {
            out.push_str(&token.text);
        }
        out
    }

    /// Insert `tokens` so the first one lands at `index`.
    ///
    /// Returns the index range now occupied by the inserted tokens.
    pub fn splice(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) -> Range<usize> {
        let index = index.min(self.tokens.len());
        let before = self.tokens.len();
        self.tokens.splice(index..index, tokens);
        index..index + (self.tokens.len() - before)
    }

    /// Non-trivia tokens with their indices.
    pub fn significant(&self) -> impl Iterator<Item = (usize, &Token)> {
        self.tokens.iter().enumerate().filter(|(_, t)| !t.is_trivia())
    }

    /// Index of the nearest non-trivia token before `index`.
    pub fn prev_significant(&self, index: usize) -> Option<usize> {
        self.tokens[..index.min(self.tokens.len())]
            .iter()
            .rposition(|t| !t.is_trivia())
    }

    /// Whether the significant tokens of `needle` occur, contiguously and in
    /// order, among the significant tokens of this stream.
    ///
    /// Whitespace and comments are ignored on both sides, so re-indented or
    /// annotated copies of a fragment still count as present. An empty
    /// needle is always contained.
    pub fn contains_significant(&self, needle: &TokenStream) -> bool {
        let needle: Vec<&Token> = needle.significant().map(|(_, t)| t).collect();
        if needle.is_empty() {
            return true;
        }
        let haystack: Vec<&Token> = self.significant().map(|(_, t)| t).collect();
        haystack.windows(needle.len()).any(|window| window == needle.as_slice())
    }

    /// 1-based line number on which the token at `index` starts.
    pub fn line_of(&self, index: usize) -> usize {
        1 + self.tokens[..index.min(self.tokens.len())]
            .iter()
            .map(|t| t.text.matches('\n').count())
            .sum::<usize>()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{TokenKind, tokenize, tokenize_fragment};

    #[test]
    fn test_splice_reports_inserted_range() {
        let mut stream = tokenize("<?php a;");
        let range = stream.splice(1, tokenize_fragment("b;"));
        assert_eq!(range, 1..3);
        assert_eq!(stream.to_source(), "<?php b;a;");
        assert_eq!(stream.to_string(), stream.to_source());
    }

    #[test]
    fn test_splice_past_end_appends() {
        let mut stream = tokenize("<?php a;");
        stream.splice(100, [Token::new(TokenKind::Punct, "}")]);
        assert_eq!(stream.to_source(), "<?php a;}");
    }

    #[test]
    fn test_prev_significant_skips_comments() {
        let stream = tokenize("<?php Foo /* c */ :: class");
        let class = stream
            .iter()
            .position(|t| t.is_keyword("class"))
            .unwrap();
        let prev = stream.prev_significant(class).unwrap();
        assert!(stream.tokens()[prev].is_operator("::"));

        assert_eq!(stream.prev_significant(0), None);
    }

    #[test]
    fn test_contains_significant_ignores_layout() {
        let stream = tokenize("<?php\nuse   App\\Foo /* x */ ;\n");
        assert!(stream.contains_significant(&tokenize_fragment("\nuse App\\Foo;")));
        assert!(!stream.contains_significant(&tokenize_fragment("use App\\Bar;")));
        assert!(stream.contains_significant(&TokenStream::default()));
    }

    #[test]
    fn test_line_of() {
        let stream = tokenize("<?php\n\nclass A\n{\n}");
        let brace = stream.iter().position(|t| t.is_punct('{')).unwrap();
        assert_eq!(stream.line_of(0), 1);
        assert_eq!(stream.line_of(brace), 4);
    }
}
