//! Per-key running statistics and the box that owns them.
//!
//! A `TagBox` pairs one matcher with the map of everything that matcher
//! has extracted so far. Keys enter the map on their first match, so every
//! stored aggregate has `count >= 1`.

use crate::pattern::Matcher;
use crate::utils::config::RunConfig;
use crate::utils::error::SumError;
use log::warn;
use std::collections::HashMap;

/// Running totals for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    /// Sum of scaled values
    pub sum: i64,

    /// Number of contributing matches
    pub count: u64,

    /// Largest single scaled value
    pub max: i64,
}

impl Aggregate {
    /// Aggregate holding a single contribution
    pub fn new(value: i64) -> Self {
        Self {
            sum: value,
            count: 1,
            max: value,
        }
    }

    /// Fold one more contribution in
    ///
    /// Returns false, leaving the aggregate unchanged, if the sum would
    /// overflow.
    #[must_use]
    pub fn add(&mut self, value: i64) -> bool {
        let Some(sum) = self.sum.checked_add(value) else {
            return false;
        };
        self.sum = sum;
        self.count += 1;
        self.max = self.max.max(value);
        true
    }

    /// Integer mean (`sum / count`, truncated toward zero)
    ///
    /// `None` when there are no contributions.
    pub fn ratio(&self) -> Option<i64> {
        i64::try_from(self.count)
            .ok()
            .and_then(|count| self.sum.checked_div(count))
    }
}

/// What a single line did to one box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Captures folded into the map
    pub matched: usize,

    /// Captures dropped because of a tolerated value or sum error
    pub skipped: usize,
}

/// One matcher and its key -> aggregate map
#[derive(Debug, Clone)]
pub struct TagBox {
    matcher: Matcher,
    tallies: HashMap<String, Aggregate>,
}

impl TagBox {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            tallies: HashMap::new(),
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Aggregate> {
        self.tallies.get(key)
    }

    /// Keys and aggregates in map order (unspecified)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Aggregate)> {
        self.tallies.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Add one scaled contribution for `key`
    ///
    /// # Errors
    /// * `SumError::SumOverflow` - the key's sum would leave `i64`
    pub fn record(&mut self, key: &str, value: i64) -> Result<(), SumError> {
        record_into(&mut self.tallies, &self.matcher, key, value)
    }

    /// Run the matcher over `line` and fold every capture into the map
    ///
    /// # Errors
    /// * `SumError::ValueParse` / `SumError::ValueOverflow` /
    ///   `SumError::SumOverflow` - only when `config.ignore_errors` is
    ///   false; otherwise the capture is logged and skipped without
    ///   touching the map
    pub fn scan(&mut self, line: &str, config: &RunConfig) -> Result<ScanOutcome, SumError> {
        let mut outcome = ScanOutcome::default();

        for capture in self.matcher.captures(line) {
            let folded = scale(&self.matcher, capture.value, config.factor).and_then(|value| {
                if config.lower {
                    let key = capture.key.to_lowercase();
                    record_into(&mut self.tallies, &self.matcher, &key, value)
                } else {
                    record_into(&mut self.tallies, &self.matcher, capture.key, value)
                }
            });

            match folded {
                Ok(()) => outcome.matched += 1,
                Err(e) if config.ignore_errors => {
                    warn!("{}; match skipped", e);
                    outcome.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(outcome)
    }
}

fn record_into(
    tallies: &mut HashMap<String, Aggregate>,
    matcher: &Matcher,
    key: &str,
    value: i64,
) -> Result<(), SumError> {
    match tallies.get_mut(key) {
        Some(aggregate) => {
            if aggregate.add(value) {
                Ok(())
            } else {
                Err(SumError::SumOverflow {
                    pattern: matcher.pattern().to_string(),
                    key: key.to_string(),
                })
            }
        }
        None => {
            tallies.insert(key.to_string(), Aggregate::new(value));
            Ok(())
        }
    }
}

/// Parse a captured value and apply the factor
fn scale(matcher: &Matcher, raw: &str, factor: i64) -> Result<i64, SumError> {
    let value: i64 = raw.parse().map_err(|source| SumError::ValueParse {
        pattern: matcher.pattern().to_string(),
        value: raw.to_string(),
        source,
    })?;

    value
        .checked_mul(factor)
        .ok_or_else(|| SumError::ValueOverflow {
            pattern: matcher.pattern().to_string(),
            value,
            factor,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext_box() -> TagBox {
        TagBox::new(Matcher::compile(r"^\s*(?P<v>[0-9]+)\s+.+(?P<k>\.[A-Za-z0-9]{1,4})$").unwrap())
    }

    #[test]
    fn test_aggregate_add() {
        let mut agg = Aggregate::new(4);
        assert!(agg.add(8));
        assert!(agg.add(1));
        assert_eq!(agg.sum, 13);
        assert_eq!(agg.count, 3);
        assert_eq!(agg.max, 8);
        assert_eq!(agg.ratio(), Some(4));
    }

    #[test]
    fn test_ratio_truncates_toward_zero() {
        let mut agg = Aggregate::new(-7);
        assert!(agg.add(0));
        assert_eq!(agg.ratio(), Some(-3));
    }

    #[test]
    fn test_ratio_undefined_without_contributions() {
        let agg = Aggregate {
            sum: 10,
            count: 0,
            max: 10,
        };
        assert_eq!(agg.ratio(), None);
    }

    #[test]
    fn test_scan_accumulates() {
        let config = RunConfig::default();
        let mut tag_box = ext_box();

        tag_box.scan("  4 readme.txt", &config).unwrap();
        tag_box.scan("  8 readme.txt", &config).unwrap();

        assert_eq!(
            tag_box.get(".txt"),
            Some(&Aggregate {
                sum: 12,
                count: 2,
                max: 8
            })
        );
    }

    #[test]
    fn test_scan_no_match_leaves_map_untouched() {
        let config = RunConfig::default();
        let mut tag_box = ext_box();

        let outcome = tag_box.scan("total 128", &config).unwrap();
        assert_eq!(outcome, ScanOutcome::default());
        assert!(tag_box.is_empty());
    }

    #[test]
    fn test_scan_bad_value_tolerant() {
        let config = RunConfig::default();
        let mut tag_box =
            TagBox::new(Matcher::compile(r"(?P<v>\S+)\s+.+(?P<k>\.[a-z]+)$").unwrap());

        let outcome = tag_box.scan("  xx notanumber.txt", &config).unwrap();
        assert_eq!(outcome.skipped, 1);
        assert!(tag_box.is_empty());
    }

    #[test]
    fn test_scan_bad_value_strict() {
        let config = RunConfig {
            ignore_errors: false,
            ..Default::default()
        };
        let mut tag_box =
            TagBox::new(Matcher::compile(r"(?P<v>\S+)\s+.+(?P<k>\.[a-z]+)$").unwrap());

        let err = tag_box.scan("  xx notanumber.txt", &config).unwrap_err();
        assert!(matches!(err, SumError::ValueParse { .. }));
        assert!(tag_box.is_empty());
    }

    #[test]
    fn test_scan_overflow() {
        let config = RunConfig {
            factor: 1024,
            ignore_errors: false,
            ..Default::default()
        };
        let mut tag_box = ext_box();

        let err = tag_box
            .scan(&format!("{} big.bin", i64::MAX), &config)
            .unwrap_err();
        assert!(matches!(err, SumError::ValueOverflow { .. }));
    }

    #[test]
    fn test_sum_overflow_strict() {
        let config = RunConfig {
            ignore_errors: false,
            ..Default::default()
        };
        let mut tag_box = ext_box();
        let line = format!("{} big.bin", i64::MAX);

        tag_box.scan(&line, &config).unwrap();
        let err = tag_box.scan(&line, &config).unwrap_err();
        assert!(matches!(err, SumError::SumOverflow { .. }));

        let agg = tag_box.get(".bin").unwrap();
        assert_eq!((agg.sum, agg.count), (i64::MAX, 1));
    }

    #[test]
    fn test_sum_overflow_tolerant_skips_match() {
        let config = RunConfig::default();
        let mut tag_box = ext_box();
        let line = format!("{} big.bin", i64::MAX);

        tag_box.scan(&line, &config).unwrap();
        let outcome = tag_box.scan(&line, &config).unwrap();
        assert_eq!(outcome.matched, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(tag_box.get(".bin").map(|a| a.count), Some(1));
    }

    #[test]
    fn test_aggregate_add_overflow_leaves_it_unchanged() {
        let mut agg = Aggregate::new(i64::MIN);
        assert!(!agg.add(-1));
        assert_eq!(agg, Aggregate::new(i64::MIN));
    }

    #[test]
    fn test_record_reports_sum_overflow() {
        let mut tag_box = ext_box();
        tag_box.record(".bin", i64::MAX).unwrap();
        assert!(matches!(
            tag_box.record(".bin", 1),
            Err(SumError::SumOverflow { .. })
        ));
    }

    #[test]
    fn test_record_creates_then_updates() {
        let mut tag_box = ext_box();
        tag_box.record(".rs", 3).unwrap();
        tag_box.record(".rs", 5).unwrap();
        tag_box.record(".md", 1).unwrap();

        assert_eq!(tag_box.len(), 2);
        assert_eq!(tag_box.get(".rs").map(|a| a.count), Some(2));
        assert_eq!(tag_box.get(".rs").map(|a| a.max), Some(5));
    }
}
