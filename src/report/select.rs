//! Sorting and top-N selection of box contents.
//!
//! Records are sorted ascending on the chosen field, or descending with
//! `reverse`. The top-N window then keeps the *tail* of an ascending list
//! and the *head* of a reversed one, so both directions surface the
//! largest entries. Rows that tie on the field are ordered by key
//! (ascending in both directions), so the window always cuts at the same
//! place. With `SortField::Disabled` records keep the (unspecified) map
//! iteration order.

use crate::aggregator::{Aggregate, TagBox};
use crate::utils::config::RunConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field used to order report rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// No sorting, map order
    #[serde(rename = "none")]
    Disabled,
    Sum,
    Count,
    Ratio,
    Max,
}

impl SortField {
    /// Numeric selector used on the command line (0 = none .. 4 = max)
    pub fn code(self) -> u8 {
        match self {
            SortField::Disabled => 0,
            SortField::Sum => 1,
            SortField::Count => 2,
            SortField::Ratio => 3,
            SortField::Max => 4,
        }
    }

    fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortField::Disabled => Ordering::Equal,
            SortField::Sum => a.sum.cmp(&b.sum),
            SortField::Count => a.count.cmp(&b.count),
            SortField::Ratio => a.ratio.cmp(&b.ratio),
            SortField::Max => a.max.cmp(&b.max),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "none" | "disabled" => Ok(SortField::Disabled),
            "1" | "sum" => Ok(SortField::Sum),
            "2" | "count" => Ok(SortField::Count),
            "3" | "ratio" => Ok(SortField::Ratio),
            "4" | "max" => Ok(SortField::Max),
            other => Err(format!(
                "unknown sort field '{}' (expected sum, count, ratio, max or none)",
                other
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Disabled => "none",
            SortField::Sum => "sum",
            SortField::Count => "count",
            SortField::Ratio => "ratio",
            SortField::Max => "max",
        };
        f.write_str(name)
    }
}

/// One report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub sum: i64,
    pub count: u64,
    /// `sum / count`, truncated toward zero
    pub ratio: i64,
    pub max: i64,
}

impl Record {
    /// Build a row; `None` if the ratio is undefined (no contributions)
    pub fn from_aggregate(key: &str, aggregate: &Aggregate) -> Option<Self> {
        Some(Self {
            key: key.to_string(),
            sum: aggregate.sum,
            count: aggregate.count,
            ratio: aggregate.ratio()?,
            max: aggregate.max,
        })
    }
}

/// The rows of one box chosen for output
#[derive(Debug, Clone)]
pub struct Selection<'b> {
    /// 1-based position of the box
    pub index: usize,

    pub tag_box: &'b TagBox,

    /// Distinct keys before the window was applied
    pub total_keys: usize,

    /// Window size, when it actually cut rows
    pub window: Option<usize>,

    pub records: Vec<Record>,
}

/// Materialize a box into rows, in map order
pub fn collect_records(tag_box: &TagBox) -> Vec<Record> {
    tag_box
        .iter()
        .filter_map(|(key, aggregate)| Record::from_aggregate(key, aggregate))
        .collect()
}

/// Sort on `field`, flipped by `reverse`; ties fall back to the key
pub fn sort_records(records: &mut [Record], field: SortField, reverse: bool) {
    if field == SortField::Disabled {
        return;
    }

    records.sort_by(|a, b| {
        let ord = field.compare(a, b);
        let ord = if reverse { ord.reverse() } else { ord };
        ord.then_with(|| a.key.cmp(&b.key))
    });
}

/// Keep `top` rows: the tail of an ascending list, the head of a reversed one
///
/// Returns the window size if rows were dropped.
pub fn apply_top(records: &mut Vec<Record>, top: Option<usize>, reverse: bool) -> Option<usize> {
    let n = top.filter(|n| *n < records.len())?;

    if reverse {
        records.truncate(n);
    } else {
        let cut = records.len() - n;
        records.drain(..cut);
    }

    Some(n)
}

/// Sort and window one box
pub fn select_box<'b>(index: usize, tag_box: &'b TagBox, config: &RunConfig) -> Selection<'b> {
    let mut records = collect_records(tag_box);
    let total_keys = records.len();

    sort_records(&mut records, config.sort, config.reverse);
    let window = apply_top(&mut records, config.top_limit(), config.reverse);

    Selection {
        index,
        tag_box,
        total_keys,
        window,
        records,
    }
}

/// Select every box in declaration order, dropping empty ones when asked to
pub fn select_boxes<'b>(boxes: &'b [TagBox], config: &RunConfig) -> Vec<Selection<'b>> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, tag_box)| !(config.skip_empty && tag_box.is_empty()))
        .map(|(i, tag_box)| select_box(i + 1, tag_box, config))
        .collect()
}
