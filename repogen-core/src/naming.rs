//! Naming helpers for generated class names and namespaces.

/// Namespace separator used by the generated sources.
const SEPARATOR: char = '\\';

/// Append a suffix to a name (e.g., "User" + "Repository" -> "UserRepository")
pub fn suffix(target: &str, suffix: &str) -> String {
    format!("{}{}", target, suffix)
}

/// Join a namespace and a class name into a fully qualified name.
///
/// Leading and trailing separators on the namespace are ignored, an empty
/// namespace yields the bare name.
pub fn qualify(namespace: &str, name: &str) -> String {
    let namespace = namespace.trim_matches(SEPARATOR);
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", namespace, SEPARATOR, name)
    }
}

/// Namespace part of a fully qualified name ("App\Models\User" -> "App\Models")
pub fn namespace_of(fqn: &str) -> &str {
    let fqn = fqn.trim_start_matches(SEPARATOR);
    match fqn.rfind(SEPARATOR) {
        Some(pos) => &fqn[..pos],
        None => "",
    }
}

/// Check that a name is a plain identifier: a letter or underscore followed
/// by letters, digits or underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
