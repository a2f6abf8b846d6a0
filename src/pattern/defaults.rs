//! Built-in patterns for `ls -l` and `ls -s` style listings.
//!
//! Each pattern captures the size (or block count) into `v` and the tag
//! into `k`. The tag is either the file extension or the leading part of
//! the name up to the first `-`, `#` or `.`.

/// Default patterns, in the order they are reported
pub const DEFAULT_PATTERNS: &[&str] = &[
    // ls -l, keyed by extension
    r"^[\-rwxds]{10}\s+[0-9]+\s+[^\s]+\s+[^\s]+\s+(?P<v>[0-9]+)\s+.+(?P<k>\.[A-Za-z0-9]{1,4})$",
    // ls -l, keyed by leading name segment
    r"^[\-rwxds]{10}\s+[0-9]+\s+[^\s]+\s+[^\s]+\s+(?P<v>[0-9]+)\s+[^\s]+\s+[^\s]+\s+[^\s]+\s+(?P<k>[^\-#\.]+).*$",
    // ls -s, keyed by extension
    r"^\s*(?P<v>[0-9]+)\s+.+(?P<k>\.[A-Za-z0-9]{1,4})$",
    // ls -s, keyed by leading name segment
    r"^\s*(?P<v>[0-9]+)\s+(?P<k>[^\-#\.]+).*$",
];

/// Owned copy of [`DEFAULT_PATTERNS`]
pub fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}
