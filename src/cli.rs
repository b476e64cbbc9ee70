//! Command-line interface definitions
//!
//! Argument parsing for the `filter-dic` and `table` binaries.

use crate::error::{Error, Result};
use crate::filter::{LengthRange, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use clap::Parser;
use std::path::PathBuf;

/// Default input word list
pub const DEFAULT_INPUT: &str = "words_alpha.txt";

/// Default output word list
pub const DEFAULT_OUTPUT: &str = "words_beta.txt";

/// Dictionary filter
///
/// Strips non-alphabetic characters from every line of a word list,
/// lowercases it and keeps the words whose length lies in [MIN, MAX].
#[derive(Parser, Debug, Clone)]
#[command(
    name = "filter-dic",
    version,
    about = "Filter a word list by normalized word length",
    after_help = r#"EXAMPLES:
    # Words of 3 to 8 letters from words_alpha.txt into words_beta.txt
    filter-dic

    # Five-letter words only
    filter-dic 5 5

    # Custom files
    filter-dic 4 10 dictionary.txt short_words.txt

    # Only words starting with "qu"
    filter-dic 3 8 --pattern "^qu"
"#
)]
pub struct FilterArgs {
    /// Minimum word length (inclusive)
    #[arg(value_name = "MIN", default_value_t = DEFAULT_MIN_LENGTH)]
    pub min: usize,

    /// Maximum word length (inclusive)
    #[arg(value_name = "MAX", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max: usize,

    /// Input word list, one word per line
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output word list (truncated if it exists)
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Only keep normalized words matching this regex
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Fail when MIN is greater than MAX instead of producing an empty list
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Buffer size for file operations
    #[arg(long, value_name = "SIZE", default_value = "64KB")]
    pub buffer_size: String,

    /// Quiet mode - only errors are logged
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode - detailed logging and progress
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl FilterArgs {
    pub fn range(&self) -> LengthRange {
        LengthRange::new(self.min, self.max)
    }

    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> Result<usize> {
        parse_size(&self.buffer_size)
    }
}

/// Text arrangement printer
///
/// Prints every rows × columns grid that fits each TEXT exactly once its
/// spaces are removed. Everything from the first TEXT on is treated as text,
/// and `--` forces text that would otherwise read as `-v` or `-h`.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "table",
    version,
    about = "Print every grid arrangement of the given texts"
)]
pub struct TableArgs {
    /// Texts to arrange
    #[arg(
        value_name = "TEXT",
        num_args = 1..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub texts: Vec<String>,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Parse human-readable size string to bytes
pub fn parse_size(size_str: &str) -> Result<usize> {
    let upper = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = upper.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1)
    } else {
        (upper.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| Error::InvalidSize(size_str.to_string()))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| Error::InvalidSize(size_str.to_string()))
}
