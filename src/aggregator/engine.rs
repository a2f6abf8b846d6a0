//! Line-by-line ingestion of all input sources.
//!
//! The engine owns one `TagBox` per configured pattern. Every line is
//! offered to every box in declaration order; each box's matcher runs on
//! the full line, independently of the others. Once all sources are
//! consumed, `finish` hands the boxes over for reporting.

use super::tally::TagBox;
use crate::pattern::Matcher;
use crate::utils::config::{RunConfig, STDIN_SOURCE};
use crate::utils::error::SumError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Counters collected while ingesting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Sources read to the end
    pub sources_read: usize,

    /// Sources that could not be opened or read
    pub sources_failed: usize,

    /// Lines seen across all sources
    pub lines: u64,

    /// Captures folded into some box
    pub matches: u64,

    /// Captures dropped because of tolerated value errors
    pub skipped: u64,
}

/// Whether a source name stands for standard input (`-` or empty)
pub fn is_stdin(source: &str) -> bool {
    source.is_empty() || source == STDIN_SOURCE
}

/// Drives all matchers over all input
pub struct Engine<'c> {
    config: &'c RunConfig,
    boxes: Vec<TagBox>,
    stats: IngestStats,
}

impl<'c> Engine<'c> {
    /// Compile every configured pattern into a box
    ///
    /// # Errors
    /// * `SumError::PatternCompile` - bad pattern and `ignore_errors` is off
    pub fn new(config: &'c RunConfig) -> Result<Self, SumError> {
        let boxes = config
            .patterns
            .iter()
            .map(|pattern| Matcher::build(pattern, config.ignore_errors).map(TagBox::new))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Engine ready with {} pattern boxes", boxes.len());

        Ok(Self {
            config,
            boxes,
            stats: IngestStats::default(),
        })
    }

    pub fn boxes(&self) -> &[TagBox] {
        &self.boxes
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Offer one line to every box
    ///
    /// Returns the number of captures folded in.
    pub fn ingest_line(&mut self, line: &str) -> Result<usize, SumError> {
        self.stats.lines += 1;

        let mut matched = 0;
        for tag_box in &mut self.boxes {
            let outcome = tag_box.scan(line, self.config)?;
            matched += outcome.matched;
            self.stats.skipped += outcome.skipped as u64;
        }

        self.stats.matches += matched as u64;
        Ok(matched)
    }

    /// Consume a reader line by line
    ///
    /// Lines read before a read error stay accumulated.
    pub fn ingest_reader<R: BufRead>(&mut self, source_name: &str, reader: R) -> Result<(), SumError> {
        for line in reader.lines() {
            let line = line.map_err(|source| SumError::SourceRead {
                source_name: source_name.to_string(),
                source,
            })?;
            self.ingest_line(&line)?;
        }
        Ok(())
    }

    /// Open one source (`-` or empty means stdin) and consume it
    pub fn ingest_source(&mut self, source: &str) -> Result<(), SumError> {
        if is_stdin(source) {
            debug!("Reading standard input");
            let stdin = io::stdin();
            return self.ingest_reader("<stdin>", stdin.lock());
        }

        debug!("Reading {}", source);
        let file = File::open(source).map_err(|e| SumError::SourceOpen {
            source_name: source.to_string(),
            source: e,
        })?;
        self.ingest_reader(source, BufReader::new(file))
    }

    /// Consume every configured source in order
    ///
    /// With `ignore_errors` a failing source is logged and the rest are
    /// still read; otherwise the first error ends ingestion.
    pub fn ingest_sources(&mut self) -> Result<(), SumError> {
        let config = self.config;

        for source in &config.sources {
            match self.ingest_source(source) {
                Ok(()) => self.stats.sources_read += 1,
                Err(e) if config.ignore_errors => {
                    warn!("{}", e);
                    self.stats.sources_failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Ingested {} lines from {} sources ({} failed): {} matches, {} skipped",
            self.stats.lines,
            self.stats.sources_read,
            self.stats.sources_failed,
            self.stats.matches,
            self.stats.skipped
        );

        Ok(())
    }

    /// End ingestion; the boxes are read-only from here on
    pub fn finish(self) -> Vec<TagBox> {
        self.boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config_with(patterns: &[&str]) -> RunConfig {
        RunConfig {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_line_updates_every_box() {
        let config = config_with(&[r"(?P<v>\d+) (?P<k>\w+)", r"(?P<v>\d+) \w+\.(?P<k>\w+)"]);
        let mut engine = Engine::new(&config).unwrap();

        let matched = engine.ingest_line("3 notes.md").unwrap();
        assert_eq!(matched, 2);

        let boxes = engine.finish();
        assert_eq!(boxes[0].get("notes").map(|a| a.sum), Some(3));
        assert_eq!(boxes[1].get("md").map(|a| a.sum), Some(3));
    }

    #[test]
    fn test_all_matches_on_a_line() {
        let config = config_with(&[r"(?P<k>[a-z]+)=(?P<v>\d+)"]);
        let mut engine = Engine::new(&config).unwrap();

        engine.ingest_line("a=1 b=2 a=5").unwrap();

        let boxes = engine.finish();
        let a = boxes[0].get("a").unwrap();
        assert_eq!((a.sum, a.count, a.max), (6, 2, 5));
        assert_eq!(boxes[0].get("b").map(|b| b.count), Some(1));
    }

    #[test]
    fn test_reader_and_stats() {
        let config = config_with(&[r"(?P<v>\d+) (?P<k>\w+)"]);
        let mut engine = Engine::new(&config).unwrap();

        let input = Cursor::new("1 x\nnothing here\n2 x\n");
        engine.ingest_reader("test", input).unwrap();

        let stats = engine.stats();
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.matches, 2);
        assert_eq!(engine.boxes()[0].get("x").map(|a| a.sum), Some(3));
    }

    #[test]
    fn test_bad_pattern_strict_fails() {
        let config = RunConfig {
            ignore_errors: false,
            ..config_with(&["(broken"])
        };
        assert!(matches!(
            Engine::new(&config),
            Err(SumError::PatternCompile { .. })
        ));
    }

    #[test]
    fn test_bad_pattern_tolerant_keeps_slot() {
        let config = config_with(&["(broken", r"(?P<v>\d+) (?P<k>\w+)"]);
        let mut engine = Engine::new(&config).unwrap();

        engine.ingest_line("4 y").unwrap();

        let boxes = engine.finish();
        assert_eq!(boxes.len(), 2);
        assert!(boxes[0].matcher().is_inert());
        assert!(boxes[0].is_empty());
        assert_eq!(boxes[1].len(), 1);
    }

    #[test]
    fn test_stdin_aliases() {
        assert!(is_stdin("-"));
        assert!(is_stdin(""));
        assert!(!is_stdin("listing.txt"));
        assert!(!is_stdin("./-"));
        assert!(!is_stdin(" "));
    }

    #[test]
    fn test_missing_source() {
        let strict = RunConfig {
            sources: vec!["/definitely/not/here.txt".to_string()],
            ignore_errors: false,
            ..Default::default()
        };
        let mut engine = Engine::new(&strict).unwrap();
        assert!(matches!(
            engine.ingest_sources(),
            Err(SumError::SourceOpen { .. })
        ));

        let tolerant = RunConfig {
            ignore_errors: true,
            ..strict.clone()
        };
        let mut engine = Engine::new(&tolerant).unwrap();
        engine.ingest_sources().unwrap();
        assert_eq!(engine.stats().sources_failed, 1);
    }
}
