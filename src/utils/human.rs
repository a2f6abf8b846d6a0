//! Human-readable byte magnitudes.

const UNIT: i64 = 1024;
const PREFIXES: &[u8] = b"kMGTPE";

/// Format a byte count: `512b`, `1.5kB`, `3.0MB`, ...
pub fn human_bytes(bytes: i64) -> String {
    if bytes < UNIT {
        return format!("{}b", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!(
        "{:.1}{}B",
        bytes as f64 / div as f64,
        PREFIXES[exp] as char
    )
}
