//! Separator placeholder substitution.
//!
//! The divider string (a run of underscores plus escaped newlines) would
//! otherwise be picked up as an identifier by the prefix rule. It is swapped
//! for a single placeholder glyph before rewriting and swapped back after.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct SeparatorGuard<'a> {
    separator: &'a str,
    placeholder: char,
}

impl<'a> SeparatorGuard<'a> {
    pub fn new(separator: &'a str, placeholder: char) -> Self {
        Self {
            separator,
            placeholder,
        }
    }

    /// Replace every separator with the placeholder.
    ///
    /// Fails when the text already contains the placeholder, since the
    /// reverse step could not tell the two apart.
    pub fn protect(&self, text: &str) -> Result<String> {
        if text.contains(self.placeholder) {
            return Err(Error::placeholder_collision(self.placeholder, None));
        }
        if self.separator.is_empty() {
            return Ok(text.to_string());
        }
        let mut glyph = [0u8; 4];
        Ok(text.replace(self.separator, self.placeholder.encode_utf8(&mut glyph)))
    }

    /// Replace every placeholder with the separator.
    pub fn restore(&self, text: &str) -> String {
        text.replace(self.placeholder, self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEPARATOR: &str = "__________\\n\\n";

    fn guard() -> SeparatorGuard<'static> {
        SeparatorGuard::new(SEPARATOR, '§')
    }

    #[test]
    fn round_trip_without_separator() {
        let text = "int _count = 0;\n";
        let protected = guard().protect(text).unwrap();
        assert_eq!(protected, text);
        assert_eq!(guard().restore(&protected), text);
    }

    #[test]
    fn round_trip_with_one_separator() {
        let text = format!("std::cout << \"{}\";", SEPARATOR);
        let protected = guard().protect(&text).unwrap();
        assert_eq!(protected, "std::cout << \"§\";");
        assert_eq!(guard().restore(&protected), text);
    }

    #[test]
    fn round_trip_with_many_separators() {
        let text = format!("{0}a{0}{0}\n_b{0}", SEPARATOR);
        let protected = guard().protect(&text).unwrap();
        assert_eq!(protected.matches('§').count(), 4);
        assert!(!protected.contains("____"));
        assert_eq!(guard().restore(&protected), text);
    }

    #[test]
    fn shorter_underscore_runs_are_not_protected() {
        let text = "_____\\n";
        assert_eq!(guard().protect(text).unwrap(), text);
    }

    #[test]
    fn existing_placeholder_is_rejected() {
        let err = guard().protect("price: 5§").unwrap_err();
        assert_eq!(err.code.as_str(), "rewrite.placeholder_collision");
    }
}
