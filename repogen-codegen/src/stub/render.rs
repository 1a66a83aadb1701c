//! Placeholder substitution.

use indexmap::IndexMap;

/// Ordered placeholder → value pairs.
///
/// Order matters: when two placeholders match at the same position, the one
/// inserted first wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pairs: IndexMap<&'static str, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the value of a placeholder.
    pub fn set(mut self, placeholder: &'static str, value: impl Into<String>) -> Self {
        self.pairs.insert(placeholder, value.into());
        self
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Render `template` with these substitutions.
    pub fn apply(&self, template: &str) -> String {
        let pairs: Vec<(&str, &str)> = self.iter().collect();
        render(template, &pairs)
    }
}

/// Replace every placeholder occurrence in `template`.
///
/// The template is scanned left to right. At each step the earliest match of
/// any placeholder is replaced (ties go to the placeholder listed first) and
/// scanning resumes after the match, so substituted values are never scanned
/// again.
pub fn render(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let mut best: Option<(usize, usize)> = None;
        for (index, (placeholder, _)) in pairs.iter().enumerate() {
            if placeholder.is_empty() {
                continue;
            }
            if let Some(pos) = rest.find(placeholder) {
                if best.is_none_or(|(best_pos, _)| pos < best_pos) {
                    best = Some((pos, index));
                }
            }
        }

        match best {
            Some((pos, index)) => {
                let (placeholder, value) = pairs[index];
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + placeholder.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
