//! Token types.

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Text outside `<?php ... ?>`
    InlineHtml,
    /// `<?php` (with the single whitespace character that follows it) or `<?=`
    OpenTag,
    /// `?>` (with a directly following newline)
    CloseTag,
    Whitespace,
    /// `// ...`, `# ...` or `/* ... */`
    Comment,
    /// `/** ... */`
    DocComment,
    /// `$name`
    Variable,
    /// Reserved word such as `class`, `function`, `use`
    Keyword,
    /// Unqualified name
    Identifier,
    /// Name containing a namespace separator, e.g. `App\Models\User`
    QualifiedName,
    /// Quoted string, backtick command or heredoc/nowdoc
    StringLiteral,
    Number,
    /// Multi-character operator such as `::`, `->` or `=>`
    Operator,
    /// Any other single character: `{`, `}`, `(`, `;`, ...
    Punct,
}

/// One token: its kind and the exact source text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Whitespace and comments carry no structure.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }

    /// Keyword comparison is case-insensitive, like the host language.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(keyword)
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reserved words, lowercase.
pub(crate) const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "extends",
    "final", "finally", "fn", "for", "foreach", "function", "global", "goto", "if", "implements",
    "include", "include_once", "instanceof", "insteadof", "interface", "isset", "list", "match",
    "namespace", "new", "or", "print", "private", "protected", "public", "readonly", "require",
    "require_once", "return", "static", "switch", "throw", "trait", "try", "unset", "use", "var",
    "while", "xor", "yield",
];

/// Multi-character operators, longest first so the first match is the longest.
pub(crate) const OPERATORS: &[&str] = &[
    "<=>", "**=", "...", "<<=", ">>=", "===", "!==", "??=", "?->", "::", "->", "=>", "++", "--",
    "+=", "-=", "*=", "/=", ".=", "%=", "&=", "|=", "^=", "==", "!=", "<>", "<=", ">=", "&&",
    "||", "??", "<<", ">>", "**", "#[",
];

pub(crate) fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}
