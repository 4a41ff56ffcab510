//! Lexical path safety checks.
//!
//! Paths are judged purely by their text. Nothing here touches the
//! filesystem, so symlinks and the current directory play no part.

use std::path::Path;

/// Decide whether `candidate` is a clean relative path.
///
/// # Rules
/// - Deny: empty or whitespace-only strings
/// - Deny: absolute paths (leading `/` or `\`, or absolute for the host)
/// - Deny: home-directory expansion (`~`, before or after normalization)
/// - Deny: any `..` left over after lexical normalization
/// - Allow: everything else
pub fn is_safe_relative_path(candidate: &str) -> bool {
    if candidate.trim().is_empty() {
        return false;
    }

    if is_absolute(candidate) {
        return false;
    }

    if candidate.trim_start().starts_with('~') {
        return false;
    }

    let normalized = normalize_lexically(candidate);

    // Catches "..", "../x" and also "..x", which is never a sane target
    if normalized.starts_with("..") {
        return false;
    }

    if normalized.starts_with('~') {
        return false;
    }

    // Backslash segments survive normalization; treat them as separators here
    if normalized.replace('\\', "/").split('/').any(|s| s == "..") {
        return false;
    }

    true
}

fn is_absolute(candidate: &str) -> bool {
    candidate.starts_with('/') || candidate.starts_with('\\') || Path::new(candidate).is_absolute()
}

/// Collapse empty and `.` segments and fold `name/..` pairs.
///
/// Leading `..` segments that cannot be folded are kept, so an escaping
/// path stays visibly escaping. An empty result becomes `.`.
pub(crate) fn normalize_lexically(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        assert!(!is_safe_relative_path(""));
        assert!(!is_safe_relative_path("   "));
        assert!(!is_safe_relative_path("\t\n"));
    }

    #[test]
    fn test_absolute_paths() {
        assert!(!is_safe_relative_path("/etc/passwd"));
        assert!(!is_safe_relative_path("/"));
        assert!(!is_safe_relative_path("//server/share"));
        assert!(!is_safe_relative_path("\\windows\\system32"));
    }

    #[test]
    fn test_traversal() {
        assert!(!is_safe_relative_path(".."));
        assert!(!is_safe_relative_path("../etc/passwd"));
        assert!(!is_safe_relative_path("a/../../b"));
        assert!(!is_safe_relative_path("./../x"));
        assert!(!is_safe_relative_path("a/b/../../../c"));
        assert!(!is_safe_relative_path("..hidden"));
    }

    #[test]
    fn test_backslash_traversal() {
        assert!(!is_safe_relative_path("a\\..\\..\\b"));
        assert!(!is_safe_relative_path("a/..\\b"));
        assert!(!is_safe_relative_path("a\\.."));
    }

    #[test]
    fn test_home_marker() {
        assert!(!is_safe_relative_path("~"));
        assert!(!is_safe_relative_path("~/.ssh/id_rsa"));
        assert!(!is_safe_relative_path("~root/x"));
        assert!(!is_safe_relative_path("./~/x"));
    }

    #[test]
    fn test_rejects_what_plain_normalization_would_keep() {
        // Trailing backslash ascent and a home marker behind leading blanks
        assert!(!is_safe_relative_path("a\\.."));
        assert!(!is_safe_relative_path(" ~/x"));
        assert!(!is_safe_relative_path("\t~"));
    }

    #[test]
    fn test_safe_paths() {
        assert!(is_safe_relative_path("nginx/nginx.conf"));
        assert!(is_safe_relative_path("docker-compose.yml"));
        assert!(is_safe_relative_path("./src/main.rs"));
        assert!(is_safe_relative_path("a/b/../c"));
        assert!(is_safe_relative_path(".env"));
        assert!(is_safe_relative_path("dir/file~backup"));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(normalize_lexically("a/./b//c"), "a/b/c");
        assert_eq!(normalize_lexically("a/b/../c"), "a/c");
        assert_eq!(normalize_lexically("a/.."), ".");
        assert_eq!(normalize_lexically("../../x"), "../../x");
        assert_eq!(normalize_lexically("a/../../x"), "../x");
        assert_eq!(normalize_lexically(""), ".");
    }
}
