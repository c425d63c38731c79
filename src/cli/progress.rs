//! Console output utilities
//!
//! Summary formatting for the end of a run, plus the writer that tees log
//! output to the log file and, in verbose mode, the console.

use crate::core::merge::MergeStats;
use std::io::Write;
use std::time::Duration;

// ============================================================================
// Console output helpers
// ============================================================================

/// Print a header section with a box
pub fn print_header(title: &str) {
    let width = 68;
    let title_padded = format!("{:^width$}", title, width = width - 4);
    println!();
    println!("╔{}╗", "═".repeat(width - 2));
    println!("║{}║", title_padded);
    println!("╚{}╝", "═".repeat(width - 2));
    println!();
}

/// Print a success message with checkmark
pub fn print_success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an info message with bullet
pub fn print_info(msg: &str) {
    println!("  • {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("  ⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("  ✗ {}", msg);
}

/// Lines of the end-of-run summary
pub fn summary_lines(stats: &MergeStats, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![
        format!("Files scanned:      {}", stats.scanned),
        format!("Copied:             {}", stats.copied),
        format!("  of which renamed: {}", stats.renamed),
        format!("Duplicates skipped: {}", stats.duplicates),
        format!("Ignored:            {}", stats.ignored),
    ];
    if stats.failed > 0 {
        lines.push(format!("Failed:             {}", stats.failed));
    }
    lines.push(format!(
        "Data copied:        {}",
        format_bytes(stats.bytes_copied)
    ));
    lines.push(format!("Time:               {}", format_duration(elapsed)));
    lines
}

/// Print the end-of-run summary
pub fn print_summary(stats: &MergeStats, elapsed: Duration) {
    print_header("Merge complete");
    for line in summary_lines(stats, elapsed) {
        print_info(&line);
    }
    println!();

    if stats.failed > 0 {
        print_warning(&format!(
            "{} file(s) could not be copied; see the log for details",
            stats.failed
        ));
    } else if stats.copied == 0 {
        print_success("Nothing new to merge");
    } else {
        print_success(&format!("{} new file(s) merged", stats.copied));
    }
}

// ============================================================================
// Utility functions
// ============================================================================

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

// ============================================================================
// Dual writer for file + console logging
// ============================================================================

/// A writer that writes to the log file and optionally the console
pub struct DualWriter<W: Write> {
    pub console: Option<std::io::Stderr>,
    pub file: W,
}

impl<W: Write> Write for DualWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Some(console) = self.console.as_mut() {
            let _ = console.write_all(buf);
        }
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Some(console) = self.console.as_mut() {
            let _ = console.flush();
        }
        self.file.flush()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_summary_lines_hide_zero_failures() {
        let stats = MergeStats {
            scanned: 4,
            copied: 2,
            renamed: 1,
            duplicates: 1,
            ignored: 1,
            failed: 0,
            bytes_copied: 2048,
        };

        let lines = summary_lines(&stats, Duration::from_secs(2));
        assert!(lines.iter().any(|l| l.ends_with("2.0 KB")));
        assert!(!lines.iter().any(|l| l.starts_with("Failed")));

        let failed = MergeStats { failed: 3, ..stats };
        let lines = summary_lines(&failed, Duration::from_secs(2));
        assert!(lines.iter().any(|l| l == "Failed:             3"));
    }

    #[test]
    fn test_dual_writer_without_console_writes_file_only() {
        let mut writer = DualWriter {
            console: None,
            file: Vec::new(),
        };
        writer.write_all(b"line\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.file, b"line\n");
    }
}
