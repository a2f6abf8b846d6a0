use crate::pattern::DEFAULT_PATTERNS;

/// Print the built-in patterns, numbered from 1
pub fn display_patterns() {
    println!("Default patterns (for 'ls -l' and 'ls -s' output):");
    for (i, pattern) in DEFAULT_PATTERNS.iter().enumerate() {
        println!("{}: {}", i + 1, pattern);
    }
}
