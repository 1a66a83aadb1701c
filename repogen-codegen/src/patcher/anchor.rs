//! Structural anchors located in a token stream.

use crate::lexer::{Token, TokenKind, TokenStream};

/// Modifiers that belong to a type declaration and move with it.
const DECLARATION_MODIFIERS: &[&str] = &["final", "abstract", "readonly"];

/// Operators after which a keyword is a member name, not a declaration.
const MEMBER_ACCESS: &[&str] = &["::", "->", "?->"];

/// Where an anchor was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch {
    /// Index of the token that satisfied the predicate.
    pub token: usize,
    /// Index at which a fragment is spliced.
    pub insert_at: usize,
}

/// A structural predicate over a token stream.
pub trait Anchor {
    /// Human readable description used in diagnostics.
    fn describe(&self) -> String;

    /// First position satisfying the predicate.
    fn locate(&self, stream: &TokenStream) -> Option<AnchorMatch>;
}

/// The first type declaration introduced by `keyword`.
///
/// Fragments are inserted before the declaration prelude: the whitespace,
/// comments, attribute groups and modifiers directly in front of the keyword.
#[derive(Debug, Clone)]
pub struct DeclarationAnchor {
    keyword: String,
}

impl DeclarationAnchor {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl Anchor for DeclarationAnchor {
    fn describe(&self) -> String {
        format!("'{}' declaration", self.keyword)
    }

    fn locate(&self, stream: &TokenStream) -> Option<AnchorMatch> {
        let tokens = stream.tokens();
        let token = tokens.iter().enumerate().position(|(index, token)| {
            token.is_keyword(&self.keyword)
                && !stream.prev_significant(index).is_some_and(|prev| {
                    let prev = &tokens[prev];
                    prev.is_keyword("new")
                        || MEMBER_ACCESS.iter().any(|op| prev.is_operator(op))
                })
        })?;

        let mut insert_at = token;
        while insert_at > 0 {
            let prev = &tokens[insert_at - 1];
            if prev.is_punct(']') {
                match attribute_start(tokens, insert_at - 1) {
                    Some(start) => {
                        insert_at = start;
                        continue;
                    }
                    None => break,
                }
            }
            let is_modifier = DECLARATION_MODIFIERS.iter().any(|m| prev.is_keyword(m));
            if !(prev.is_trivia() || is_modifier) {
                break;
            }
            insert_at -= 1;
        }

        Some(AnchorMatch { token, insert_at })
    }
}

/// Index of the `#[` opening the attribute group that ends at `close`.
///
/// `None` when the brackets belong to something else, such as an array.
fn attribute_start(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for index in (0..=close).rev() {
        let token = &tokens[index];
        if token.is_punct(']') {
            depth += 1;
        } else if token.is_punct('[') || token.is_operator("#[") {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return token.is_operator("#[").then_some(index);
            }
        }
    }
    None
}

/// The opening delimiter of the body of function `name`.
///
/// Fragments are inserted right after the delimiter.
#[derive(Debug, Clone)]
pub struct BlockAfterName {
    name: String,
    opener: char,
}

impl BlockAfterName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opener: '{',
        }
    }
}

impl Anchor for BlockAfterName {
    fn describe(&self) -> String {
        format!("'{}' method body", self.name)
    }

    fn locate(&self, stream: &TokenStream) -> Option<AnchorMatch> {
        let tokens = stream.tokens();
        let candidates = tokens.iter().enumerate().filter(|(index, token)| {
            matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword)
                && token.text.eq_ignore_ascii_case(&self.name)
                && stream
                    .prev_significant(*index)
                    .is_some_and(|prev| tokens[prev].is_keyword("function"))
        });

        for (name_index, _) in candidates {
            // Abstract and interface methods end at `;` without a body.
            let body = tokens[name_index + 1..]
                .iter()
                .position(|t| t.is_punct(self.opener) || t.is_punct(';'))
                .map(|offset| name_index + 1 + offset)
                .filter(|&index| tokens[index].is_punct(self.opener));

            if let Some(brace) = body {
                return Some(AnchorMatch {
                    token: brace,
                    insert_at: brace + 1,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    const PROVIDER: &str = "<?php\n\nnamespace App\\Providers;\n\nuse Illuminate\\Support\\ServiceProvider;\n\n/**\n * Wiring.\n */\nfinal class RepositoryServiceProvider extends ServiceProvider\n{\n    public function register()\n    {\n    }\n}\n";

    #[test]
    fn test_declaration_anchor_skips_prelude() {
        let stream = tokenize(PROVIDER);
        let found = DeclarationAnchor::new("class").locate(&stream).unwrap();

        assert!(stream.tokens()[found.token].is_keyword("class"));
        // The prelude starts right after the last import's `;`.
        assert!(stream.tokens()[found.insert_at - 1].is_punct(';'));
        assert!(stream.tokens()[found.insert_at].is_trivia());
    }

    #[test]
    fn test_declaration_anchor_steps_over_attributes() {
        let src = "<?php\n\nnamespace App;\n\nuse B;\n\n#[Foo(['x' => [1]])]\n#[Bar]\nfinal class P {}\n";
        let stream = tokenize(src);
        let found = DeclarationAnchor::new("class").locate(&stream).unwrap();

        assert_eq!(stream.line_of(found.token), 9);
        assert!(stream.tokens()[found.insert_at - 1].is_punct(';'));
        assert_eq!(stream.line_of(found.insert_at - 1), 5);
    }

    #[test]
    fn test_declaration_anchor_stops_at_unrelated_brackets() {
        let src = "<?php\n$x = $a[0]\nclass P {}\n";
        let stream = tokenize(src);
        let found = DeclarationAnchor::new("class").locate(&stream).unwrap();
        assert!(stream.tokens()[found.insert_at - 1].is_punct(']'));
    }

    #[test]
    fn test_declaration_anchor_ignores_member_access() {
        let src = "<?php\n$a = Foo::class;\n$b = $x->class;\n$c = new class {};\nclass Real {}\n";
        let stream = tokenize(src);
        let found = DeclarationAnchor::new("class").locate(&stream).unwrap();
        assert_eq!(stream.line_of(found.token), 5);
    }

    #[test]
    fn test_declaration_anchor_is_case_insensitive() {
        let stream = tokenize("<?php CLASS A {}");
        assert!(DeclarationAnchor::new("class").locate(&stream).is_some());
        assert!(DeclarationAnchor::new("trait").locate(&stream).is_none());
    }

    #[test]
    fn test_block_after_name() {
        let stream = tokenize(PROVIDER);
        let found = BlockAfterName::new("register").locate(&stream).unwrap();
        assert!(stream.tokens()[found.token].is_punct('{'));
        assert_eq!(found.insert_at, found.token + 1);
        assert_eq!(stream.line_of(found.token), 13);
    }

    #[test]
    fn test_block_after_name_requires_function_keyword() {
        let src = "<?php\n$this->register();\nclass A {\n    public function register(): void\n    {\n    }\n}\n";
        let stream = tokenize(src);
        let found = BlockAfterName::new("register").locate(&stream).unwrap();
        assert_eq!(stream.line_of(found.token), 5);
    }

    #[test]
    fn test_block_after_name_skips_bodiless_declarations() {
        let src = "<?php\ninterface I { public function register(); }\nclass A { function register() { } }\n";
        let stream = tokenize(src);
        let found = BlockAfterName::new("register").locate(&stream).unwrap();
        assert_eq!(stream.line_of(found.token), 3);

        let stream = tokenize("<?php\ninterface I { public function register(); }\n");
        assert_eq!(BlockAfterName::new("register").locate(&stream), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(DeclarationAnchor::new("class").describe(), "'class' declaration");
        assert_eq!(BlockAfterName::new("register").describe(), "'register' method body");
    }
}
