//! Compiled pattern plus key/value group positions.

use crate::utils::config::{DEFAULT_KEY_GROUP, DEFAULT_VALUE_GROUP, MIN_CAPTURES};
use crate::utils::error::SumError;
use log::{debug, warn};
use regex::Regex;

/// One (key, value) pair found in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<'t> {
    /// Raw key text, before any case folding
    pub key: &'t str,

    /// Raw value text, not yet parsed
    pub value: &'t str,
}

/// A pattern and the capture positions of its key and value
///
/// A matcher whose pattern failed to compile is kept as an inert
/// placeholder: it still has a slot in the report but never matches.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Option<Regex>,
    key_group: usize,
    value_group: usize,
}

impl Matcher {
    /// Compile a pattern
    ///
    /// Named groups `k` and `v` select the key and value captures;
    /// without them the key is group 2 and the value group 1.
    ///
    /// # Errors
    /// * `SumError::PatternCompile` - pattern is not a valid regex
    pub fn compile(pattern: &str) -> Result<Self, SumError> {
        let regex = Regex::new(pattern).map_err(|source| SumError::PatternCompile {
            pattern: pattern.to_string(),
            source,
        })?;

        let key_group = group_index(&regex, "k").unwrap_or(DEFAULT_KEY_GROUP);
        let value_group = group_index(&regex, "v").unwrap_or(DEFAULT_VALUE_GROUP);

        debug!(
            "Compiled pattern `{}` (key group {}, value group {})",
            pattern, key_group, value_group
        );

        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
            key_group,
            value_group,
        })
    }

    /// A matcher that never matches anything
    pub fn inert(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            regex: None,
            key_group: DEFAULT_KEY_GROUP,
            value_group: DEFAULT_VALUE_GROUP,
        }
    }

    /// Compile a pattern, falling back to an inert matcher when errors are ignored
    pub fn build(pattern: &str, ignore_errors: bool) -> Result<Self, SumError> {
        match Self::compile(pattern) {
            Ok(matcher) => Ok(matcher),
            Err(e) if ignore_errors => {
                warn!("{}; pattern disabled", e);
                Ok(Self::inert(pattern))
            }
            Err(e) => Err(e),
        }
    }

    /// Source text of the pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_inert(&self) -> bool {
        self.regex.is_none()
    }

    pub fn key_group(&self) -> usize {
        self.key_group
    }

    pub fn value_group(&self) -> usize {
        self.value_group
    }

    /// All non-overlapping (key, value) captures in `line`
    ///
    /// Matches with fewer than three captures, or whose key/value group
    /// lies outside the capture list, are skipped. A group that did not
    /// take part in the match yields an empty string.
    pub fn captures<'a>(&'a self, line: &'a str) -> impl Iterator<Item = Capture<'a>> + 'a {
        let key_group = self.key_group;
        let value_group = self.value_group;

        self.regex
            .iter()
            .flat_map(move |re| re.captures_iter(line))
            .filter_map(move |caps| {
                if caps.len() < MIN_CAPTURES || key_group >= caps.len() || value_group >= caps.len()
                {
                    return None;
                }
                Some(Capture {
                    key: caps.get(key_group).map_or("", |m| m.as_str()),
                    value: caps.get(value_group).map_or("", |m| m.as_str()),
                })
            })
    }
}

/// Position of a named group, if the regex declares it
fn group_index(regex: &Regex, name: &str) -> Option<usize> {
    regex
        .capture_names()
        .position(|group| group == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_defaults() {
        let m = Matcher::compile(r"(\d+) (\w+)").unwrap();
        assert_eq!(m.key_group(), 2);
        assert_eq!(m.value_group(), 1);

        let caps: Vec<_> = m.captures("12 apples").collect();
        assert_eq!(
            caps,
            vec![Capture {
                key: "apples",
                value: "12"
            }]
        );
    }

    #[test]
    fn test_named_groups_override_positions() {
        let m = Matcher::compile(r"(?P<k>[a-z]+)=(?P<v>\d+)").unwrap();
        assert_eq!(m.key_group(), 1);
        assert_eq!(m.value_group(), 2);

        let caps: Vec<_> = m.captures("a=1 b=2").collect();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].key, "a");
        assert_eq!(caps[1].value, "2");
    }

    #[test]
    fn test_short_match_is_skipped() {
        let m = Matcher::compile(r"(\d+)").unwrap();
        assert_eq!(m.captures("1 2 3").count(), 0);
    }

    #[test]
    fn test_named_group_beyond_default_positions() {
        // Key named at group 3, value falls back to group 1
        let m = Matcher::compile(r"(\d+)-(x)-(?P<k>\w+)").unwrap();
        assert_eq!(m.key_group(), 3);
        let caps: Vec<_> = m.captures("7-x-abc").collect();
        assert_eq!(caps[0].key, "abc");
        assert_eq!(caps[0].value, "7");
    }

    #[test]
    fn test_compile_error() {
        let err = Matcher::compile("(unclosed").unwrap_err();
        assert!(matches!(err, SumError::PatternCompile { .. }));
    }

    #[test]
    fn test_build_tolerant_gives_inert_matcher() {
        let m = Matcher::build("(unclosed", true).unwrap();
        assert!(m.is_inert());
        assert_eq!(m.pattern(), "(unclosed");
        assert_eq!(m.captures("anything (unclosed").count(), 0);

        assert!(Matcher::build("(unclosed", false).is_err());
    }
}
