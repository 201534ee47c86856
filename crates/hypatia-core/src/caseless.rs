//! Case folding for setting keys.
//!
//! Setting keys compare case-insensitively everywhere in the system. The
//! comparison folds through [`char::to_lowercase`] so that non-ASCII keys
//! behave the same way as ASCII ones.

/// Folds a string to lowercase, one character at a time.
pub fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Compares two strings case-insensitively.
///
/// # Example
///
/// ```
/// use hypatia_core::caseless;
///
/// assert!(caseless::eq_ignore_case("OutputPath", "outputpath"));
/// assert!(!caseless::eq_ignore_case("OutputPath", "output"));
/// ```
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold(a).eq(fold(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_folding() {
        assert!(eq_ignore_case("Foo", "FOO"));
        assert!(eq_ignore_case("Foo", "foo"));
        assert!(!eq_ignore_case("Foo", "Bar"));
    }

    #[test]
    fn test_unicode_folding() {
        assert!(eq_ignore_case("ÜBER", "über"));
        assert!(eq_ignore_case("ΣΟΦΙΑ", "σοφια"));
    }

    #[test]
    fn test_prefix_is_not_equal() {
        assert!(!eq_ignore_case("key", "keys"));
        assert!(!eq_ignore_case("keys", "key"));
    }
}
