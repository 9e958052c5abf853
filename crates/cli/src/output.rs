//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Status lines go to stderr
//! so stdout stays pipeable; colors are dropped when the stream is not a
//! terminal.

use owo_colors::{OwoColorize, Stream};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".if_supports_color(Stream::Stderr, |t| t.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        eprintln!("{} {}", "ℹ".if_supports_color(Stream::Stderr, |t| t.blue()), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format a decimal-degree pair with a fixed number of places
pub fn format_decimal(latitude: f64, longitude: f64, places: usize) -> String {
    format!("{:.*}, {:.*}", places, latitude, places, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        let d = Duration::from_secs(125);
        assert_eq!(format_duration(d), "2m 5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "coordinate", "coordinates"), "1 coordinate");
        assert_eq!(format_count(0, "coordinate", "coordinates"), "0 coordinates");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(57.785, 61.748_055, 4), "57.7850, 61.7481");
        assert_eq!(format_decimal(-0.5, 0.0, 1), "-0.5, 0.0");
    }
}
