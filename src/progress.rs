//! Progress display module
//!
//! Styled console messages, the byte progress bar and run statistics.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a bytes-based progress bar
pub fn create_bytes_progress_bar(total_bytes: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);

    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓░"));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one dictionary filter run
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    pub total_lines: u64,
    pub accepted: u64,
    pub empty: u64,
    pub too_short: u64,
    pub too_long: u64,
    pub pattern_mismatch: u64,
    pub bytes_read: u64,
    pub start_time: Instant,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            accepted: 0,
            empty: 0,
            too_short: 0,
            too_long: 0,
            pattern_mismatch: 0,
            bytes_read: 0,
            start_time: Instant::now(),
        }
    }

    /// Lines that did not make it into the output
    pub fn rejected(&self) -> u64 {
        self.total_lines.saturating_sub(self.accepted)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.total_lines as f64 / secs
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    FILTERING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Data read:      ".green(), ByteSize(self.bytes_read));
        println!("  {} {}", "Total lines:    ".green(), format_number(self.total_lines));
        println!(
            "  {} {}",
            "Accepted:       ".green().bold(),
            format_number(self.accepted).green().bold()
        );
        println!("  {} {}", "Empty:          ".yellow(), format_number(self.empty));
        println!("  {} {}", "Too short:      ".yellow(), format_number(self.too_short));
        println!("  {} {}", "Too long:       ".yellow(), format_number(self.too_long));

        if self.pattern_mismatch > 0 {
            println!(
                "  {} {}",
                "Pattern misses: ".yellow(),
                format_number(self.pattern_mismatch)
            );
        }

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} lines/sec", "Throughput:     ".green(), self.lines_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_rejected() {
        let mut stats = ProcessingStats::new();
        stats.total_lines = 10;
        stats.accepted = 4;

        assert_eq!(stats.rejected(), 6);
    }
}
