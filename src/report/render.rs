//! Text rendering of selected rows.
//!
//! Row layout: `sum  human(sum)  count  key`, in fixed-width columns,
//! with keys cut to 80 characters. In verbose mode each box gets a
//! three-line `#` header and a trailing blank line.

use super::select::{Record, Selection};
use crate::utils::config::KEY_DISPLAY_WIDTH;
use crate::utils::human::human_bytes;
use std::io::{self, Write};

/// Format one row
pub fn format_row(record: &Record) -> String {
    format!(
        "{:>15} {:>9} {:>5} {}",
        record.sum,
        human_bytes(record.sum),
        record.count,
        truncate_key(&record.key)
    )
}

/// Header lines for one box: index, pattern and key count
pub fn format_header(selection: &Selection<'_>) -> String {
    let total = match selection.window {
        Some(n) => format!("{} (top {})", selection.total_keys, n),
        None => selection.total_keys.to_string(),
    };

    format!(
        "# #{}\n# =~ {}\n# = {}",
        selection.index,
        selection.tag_box.matcher().pattern(),
        total
    )
}

/// Cut a key to the display width, on a character boundary
pub fn truncate_key(key: &str) -> &str {
    match key.char_indices().nth(KEY_DISPLAY_WIDTH) {
        Some((end, _)) => &key[..end],
        None => key,
    }
}

/// Write one box
pub fn render_selection<W: Write>(
    out: &mut W,
    selection: &Selection<'_>,
    verbose: bool,
) -> io::Result<()> {
    if verbose {
        writeln!(out, "{}", format_header(selection))?;
    }

    for record in &selection.records {
        writeln!(out, "{}", format_row(record))?;
    }

    if verbose {
        writeln!(out)?;
    }

    Ok(())
}

/// Write every selected box in order
pub fn render_report<W: Write>(
    out: &mut W,
    selections: &[Selection<'_>],
    verbose: bool,
) -> io::Result<()> {
    for selection in selections {
        render_selection(out, selection, verbose)?;
    }
    out.flush()
}
