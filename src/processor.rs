//! Dictionary filter driver
//!
//! Streams a word list through the filter and writes survivors to the output
//! word list in input order.

use crate::cli::FilterArgs;
use crate::encoding::EncodedLineIterator;
use crate::error::{Error, Result};
use crate::filter::{FilterConfig, LengthRange, Verdict};
use crate::output::{OutputWriter, DEFAULT_BUFFER_SIZE};
use crate::progress::{
    create_bytes_progress_bar, print_bullet, print_header, print_info, print_success,
    print_warning, ProcessingStats,
};

use colored::*;
use indicatif::ProgressBar;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: LengthRange,
    pub pattern: Option<String>,
    /// Reject `min > max` instead of accepting nothing
    pub strict: bool,
    pub buffer_size: usize,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, range: LengthRange) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            range,
            pattern: None,
            strict: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            quiet: true,
            verbose: false,
        }
    }

    pub fn from_args(args: &FilterArgs) -> Result<Self> {
        Ok(Self {
            input: args.input.clone(),
            output: args.output.clone(),
            range: args.range(),
            pattern: args.pattern.clone(),
            strict: args.strict,
            buffer_size: args.parse_buffer_size()?,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
    stats: ProcessingStats,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            stats: ProcessingStats::new(),
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Filter the input word list into the output, returning the accepted count.
    ///
    /// A missing input fails before the output is touched.
    pub fn run(&mut self) -> Result<u64> {
        let input = self.config.input.clone();
        let output_path = self.config.output.clone();

        if !input.is_file() {
            return Err(Error::NotFound(input));
        }

        let range = self.config.range;
        if range.is_inverted() {
            if self.config.strict {
                return Err(Error::MalformedThresholds {
                    min: range.min,
                    max: range.max,
                });
            }
            let message = format!(
                "min length {} is greater than max length {}, no words will be accepted",
                range.min, range.max
            );
            if self.config.quiet {
                log::debug!("{}", message);
            } else {
                print_warning(&message);
            }
        }

        let filter = FilterConfig::new(range, self.config.pattern.as_deref())?;

        if self.config.verbose {
            print_header("Filtering word list...");
            print_info(&format!("Input:   {:?}", input));
            print_info(&format!("Output:  {:?}", output_path));
            print_bullet(&format!("Lengths: {}-{}", range.min, range.max));
            if let Some(pattern) = filter.pattern_str() {
                print_bullet(&format!("Pattern: {}", pattern));
            }
        }

        let lines = EncodedLineIterator::new(&input, self.config.buffer_size)
            .map_err(|e| Error::file(&input, e))?;
        let mut output = OutputWriter::new(output_path, self.config.buffer_size)?;

        let source_bytes = lines.source_bytes();
        let pb = self.progress_bar(&input);
        let lines = lines.inspect(|_| pb.set_position(source_bytes.get()));
        let accepted = self.filter_lines(lines, &filter, |word| output.write_line(word));
        pb.finish_and_clear();
        self.stats.bytes_read = source_bytes.get();

        let accepted = accepted?;
        output.flush()?;

        log::debug!(
            "Wrote {} words ({} bytes) to {:?}",
            output.lines_written(),
            output.bytes_written(),
            output.path()
        );

        Ok(accepted)
    }

    /// Core loop: classify every line and hand accepted words to `sink`.
    ///
    /// Stops at the first read or write error.
    pub fn filter_lines<I, F>(&mut self, lines: I, filter: &FilterConfig, mut sink: F) -> Result<u64>
    where
        I: IntoIterator<Item = std::io::Result<String>>,
        F: FnMut(&str) -> Result<()>,
    {
        let mut accepted = 0;

        for line in lines {
            let line = line.map_err(|e| Error::file(&self.config.input, e))?;
            self.stats.total_lines += 1;

            match filter.classify(&line) {
                Verdict::Accepted(word) => {
                    sink(&word)?;
                    self.stats.accepted += 1;
                    accepted += 1;
                }
                Verdict::Empty => self.stats.empty += 1,
                Verdict::TooShort => self.stats.too_short += 1,
                Verdict::TooLong => self.stats.too_long += 1,
                Verdict::PatternMismatch => self.stats.pattern_mismatch += 1,
            }
        }

        Ok(accepted)
    }

    fn progress_bar(&self, input: &Path) -> ProgressBar {
        if !self.config.verbose || self.config.quiet {
            return ProgressBar::hidden();
        }

        let size = fs::metadata(input).map(|m| m.len()).unwrap_or(0);
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        create_bytes_progress_bar(size, &format!("Filtering {}", name.cyan()))
    }

    /// Get processing statistics
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }
}

/// Run the filter for parsed command-line arguments and write the accepted
/// count to `out` as a single line.
///
/// Nothing is written to `out` when the run fails.
pub fn run_cli<W: Write>(args: &FilterArgs, out: &mut W) -> Result<u64> {
    if let Some(ref pattern) = args.pattern {
        crate::filter::validate_pattern(pattern)?;
    }

    let config = ProcessorConfig::from_args(args)?;
    let mut processor = Processor::new(config);
    let count = processor.run()?;

    if args.stats {
        processor.stats().print_summary();
    }
    if args.verbose {
        print_success(&format!("Output written to: {:?}", processor.config().output));
    }

    writeln!(out, "{}", count)?;
    Ok(count)
}

/// Filter `input` into `output`, keeping words with `min <= len <= max`.
///
/// Returns the number of words written.
pub fn filter_dictionary(input: &Path, output: &Path, min: usize, max: usize) -> Result<u64> {
    let config = ProcessorConfig::new(input, output, LengthRange::new(min, max));
    Processor::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, lines: &[&str]) -> PathBuf {
        let path = dir.path().join("words_alpha.txt");
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reference_example() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["Hello!", "a", "to", "beautiful-day"]);
        let output = dir.path().join("words_beta.txt");

        let count = filter_dictionary(&input, &output, 3, 8).unwrap();

        assert_eq!(count, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "hello\n");
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["Zebra", "apple", "x", "Apple!", "mango", "zebra"]);
        let output = dir.path().join("out.txt");

        let count = filter_dictionary(&input, &output, 3, 8).unwrap();

        assert_eq!(count, 5);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "zebra\napple\napple\nmango\nzebra\n"
        );
    }

    #[test]
    fn test_output_words_within_range() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            &["a1b2c3", "Don't", "co-operate", "supercalifragilistic", "ÉCOLE", "42", ""],
        );
        let output = dir.path().join("out.txt");

        filter_dictionary(&input, &output, 3, 9).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        for word in content.lines() {
            let len = word.chars().count();
            assert!((3..=9).contains(&len), "{word} out of range");
            assert!(word.chars().all(|c| c.is_alphabetic() && !c.is_uppercase()));
        }
        assert_eq!(content, "abc\ndont\ncooperate\nécole\n");
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["alpha", "beta", "gamma"]);
        let output = dir.path().join("words_beta.txt");

        filter_dictionary(&input, &output, 3, 8).unwrap();
        let first = fs::read_to_string(&output).unwrap();
        filter_dictionary(&input, &output, 3, 8).unwrap();
        let second = fs::read_to_string(&output).unwrap();

        assert_eq!(first, "alpha\nbeta\ngamma\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("nope.txt");
        let output = dir.path().join("words_beta.txt");
        fs::write(&output, "previous\n").unwrap();

        let err = filter_dictionary(&input, &output, 3, 8).unwrap_err();

        assert!(matches!(err, Error::NotFound(ref p) if *p == input));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn test_inverted_range_is_permissive() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["hello", "world"]);
        let output = dir.path().join("out.txt");

        let count = filter_dictionary(&input, &output, 8, 3).unwrap();

        assert_eq!(count, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_verbose_inverted_range_warns_and_continues() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["hello", "world"]);
        let output = dir.path().join("out.txt");

        let mut config = ProcessorConfig::new(&input, &output, LengthRange::new(8, 3));
        config.pattern = Some("^h".to_string());
        config.quiet = false;
        config.verbose = true;

        let count = Processor::new(config).run().unwrap();

        assert_eq!(count, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_inverted_range_strict() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["hello"]);
        let output = dir.path().join("out.txt");

        let mut config = ProcessorConfig::new(&input, &output, LengthRange::new(8, 3));
        config.strict = true;

        let err = Processor::new(config).run().unwrap_err();
        assert!(matches!(err, Error::MalformedThresholds { min: 8, max: 3 }));
        assert!(!output.exists());
    }

    #[test]
    fn test_pattern_and_stats() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["Queen", "quick!", "jump", "a", "...", "extraordinary"]);
        let output = dir.path().join("out.txt");

        let mut config = ProcessorConfig::new(&input, &output, LengthRange::new(3, 8));
        config.pattern = Some("^qu".to_string());

        let mut processor = Processor::new(config);
        let count = processor.run().unwrap();
        let stats = processor.stats();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "queen\nquick\n");
        assert_eq!(stats.total_lines, 6);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.pattern_mismatch, 1);
        assert_eq!(stats.too_short, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.too_long, 1);
        assert_eq!(stats.rejected(), 4);
    }

    #[test]
    fn test_filter_lines_stops_on_sink_error() {
        let config = ProcessorConfig::new("in.txt", "out.txt", LengthRange::default());
        let filter = FilterConfig::new(config.range, None).unwrap();
        let mut processor = Processor::new(config);

        let lines = vec![Ok("first".to_string()), Ok("second".to_string())];
        let mut seen = Vec::new();
        let result = processor.filter_lines(lines, &filter, |word| {
            seen.push(word.to_string());
            Err(Error::NoText)
        });

        assert!(result.is_err());
        assert_eq!(seen, vec!["first"]);
    }

    #[test]
    fn test_carriage_return_only_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("words_alpha.txt");
        fs::write(&input, "apple\rmango\rkiwi\r").unwrap();
        let output = dir.path().join("words_beta.txt");

        let count = filter_dictionary(&input, &output, 3, 8).unwrap();

        assert_eq!(count, 3);
        assert_eq!(fs::read_to_string(&output).unwrap(), "apple\nmango\nkiwi\n");
    }

    #[test]
    fn test_bytes_read_is_source_size() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("words.txt");
        // UTF-16LE with BOM, no trailing newline
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "hello\r\nworld".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&input, &bytes).unwrap();

        let config = ProcessorConfig::new(&input, dir.path().join("out.txt"), LengthRange::default());
        let mut processor = Processor::new(config);
        let count = processor.run().unwrap();

        assert_eq!(count, 2);
        assert_eq!(processor.stats().bytes_read, bytes.len() as u64);
    }

    #[test]
    fn test_run_cli_prints_count() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["Hello!", "a", "to", "beautiful-day"]);
        let output = dir.path().join("words_beta.txt");
        let args = FilterArgs::parse_from([
            "filter-dic",
            "3",
            "8",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]);

        let mut out = Vec::new();
        let count = run_cli(&args, &mut out).unwrap();

        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
    }

    #[test]
    fn test_run_cli_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.txt");
        let output = dir.path().join("words_beta.txt");
        let args = FilterArgs::parse_from([
            "filter-dic",
            "3",
            "8",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]);

        let mut out = Vec::new();
        let err = run_cli(&args, &mut out).unwrap_err();

        assert_eq!(err.to_string(), format!("file {} not found", input.display()));
        assert!(out.is_empty());
        assert!(!output.exists());
    }
}
