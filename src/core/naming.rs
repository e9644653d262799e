//! core::naming
//!
//! Naming rules for definitions, indexes and frames.
//!
//! # Policy
//!
//! Validation goes through the [`NamePolicy`] trait so callers can swap
//! the rule set without touching persistence code. [`DefaultNamePolicy`]
//! accepts names matching `^[a-z][a-z0-9_-]{0,63}$`.
//!
//! # Example
//!
//! ```
//! use framedef::core::naming::{DefaultNamePolicy, NamePolicy};
//!
//! let policy = DefaultNamePolicy;
//! assert!(policy.validate("default").is_ok());
//! assert!(policy.validate("Bad Name").is_err());
//! ```

use thiserror::Error;

/// Maximum length accepted by [`DefaultNamePolicy`].
pub const MAX_NAME_LEN: usize = 64;

/// Errors from name validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name '{name}' is longer than {max} characters")]
    TooLong { name: String, max: usize },

    #[error("name '{name}' must start with a lowercase letter")]
    BadStart { name: String },

    #[error("name '{name}' contains invalid character '{ch}'")]
    InvalidChar { name: String, ch: char },
}

/// A rule set deciding which names are acceptable.
pub trait NamePolicy {
    /// Check `name`, returning the first violation found.
    fn validate(&self, name: &str) -> Result<(), NameError>;
}

impl<F> NamePolicy for F
where
    F: Fn(&str) -> Result<(), NameError>,
{
    fn validate(&self, name: &str) -> Result<(), NameError> {
        self(name)
    }
}

/// The stock naming rules: lowercase ASCII letter first, then up to 63
/// lowercase letters, digits, `_` or `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamePolicy;

impl NamePolicy for DefaultNamePolicy {
    fn validate(&self, name: &str) -> Result<(), NameError> {
        let mut chars = name.chars();

        let first = chars.next().ok_or(NameError::Empty)?;
        if !first.is_ascii_lowercase() {
            return Err(NameError::BadStart { name: name.into() });
        }

        for ch in chars {
            if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-') {
                return Err(NameError::InvalidChar {
                    name: name.into(),
                    ch,
                });
            }
        }

        // All accepted characters are ASCII, so byte length == char count here.
        if name.len() > MAX_NAME_LEN {
            return Err(NameError::TooLong {
                name: name.into(),
                max: MAX_NAME_LEN,
            });
        }

        Ok(())
    }
}

/// Validate a name with [`DefaultNamePolicy`].
pub fn validate_name(name: &str) -> Result<(), NameError> {
    DefaultNamePolicy.validate(name)
}

/// Suggest a name accepted by [`DefaultNamePolicy`] for arbitrary input.
///
/// Lowercases, turns spaces into hyphens, drops everything else the policy
/// rejects, strips a non-letter prefix and truncates. Returns `None` when
/// nothing usable remains.
///
/// # Example
///
/// ```
/// use framedef::core::naming::suggest_name;
///
/// assert_eq!(suggest_name("User Age").as_deref(), Some("user-age"));
/// assert_eq!(suggest_name("9 Lives!").as_deref(), Some("lives"));
/// assert_eq!(suggest_name("!!!"), None);
/// ```
pub fn suggest_name(input: &str) -> Option<String> {
    let first_line = input.lines().next().unwrap_or("");

    let cleaned: String = first_line
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let trimmed = cleaned.trim_start_matches(|c: char| !c.is_ascii_lowercase());
    let name: String = trimmed.chars().take(MAX_NAME_LEN).collect();
    let name = name.trim_end_matches('-').to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod default_policy {
        use super::*;

        #[test]
        fn accepts_simple_names() {
            assert!(validate_name("default").is_ok());
            assert!(validate_name("a").is_ok());
            assert!(validate_name("user_age-2").is_ok());
        }

        #[test]
        fn rejects_empty() {
            assert_eq!(validate_name(""), Err(NameError::Empty));
        }

        #[test]
        fn rejects_bad_start() {
            assert!(matches!(
                validate_name("1abc"),
                Err(NameError::BadStart { .. })
            ));
            assert!(matches!(
                validate_name("_abc"),
                Err(NameError::BadStart { .. })
            ));
            assert!(matches!(
                validate_name("Abc"),
                Err(NameError::BadStart { .. })
            ));
        }

        #[test]
        fn rejects_invalid_chars() {
            assert_eq!(
                validate_name("has space"),
                Err(NameError::InvalidChar {
                    name: "has space".into(),
                    ch: ' '
                })
            );
            assert!(validate_name("a/b").is_err());
            assert!(validate_name("a.b").is_err());
            assert!(validate_name("caps-Here").is_err());
        }

        #[test]
        fn length_limit() {
            let ok = format!("a{}", "b".repeat(MAX_NAME_LEN - 1));
            assert!(validate_name(&ok).is_ok());

            let long = format!("a{}", "b".repeat(MAX_NAME_LEN));
            assert!(matches!(
                validate_name(&long),
                Err(NameError::TooLong { .. })
            ));
        }
    }

    #[test]
    fn closure_policy() {
        let only_default = |name: &str| {
            if name == "default" {
                Ok(())
            } else {
                Err(NameError::BadStart { name: name.into() })
            }
        };

        assert!(only_default.validate("default").is_ok());
        assert!(only_default.validate("other").is_err());
    }

    mod suggest {
        use super::*;

        #[test]
        fn basic() {
            assert_eq!(suggest_name("Hello World").as_deref(), Some("hello-world"));
            assert_eq!(suggest_name("fix: something").as_deref(), Some("fix-something"));
        }

        #[test]
        fn suggestions_are_valid() {
            for input in ["Hello World", "--x--", "snake_case", "A.B.C", "42 answers"] {
                if let Some(name) = suggest_name(input) {
                    assert!(validate_name(&name).is_ok(), "{input} -> {name}");
                }
            }
        }

        #[test]
        fn empty() {
            assert_eq!(suggest_name(""), None);
            assert_eq!(suggest_name("123"), None);
        }

        #[test]
        fn first_line_only() {
            assert_eq!(suggest_name("first\nsecond").as_deref(), Some("first"));
        }
    }
}
