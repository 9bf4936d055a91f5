//! Progress reporting and console output
//!
//! Pipelines run on a worker thread and describe their progress with
//! [`ProgressEvent`]s sent through a channel. The main thread turns those
//! into an `indicatif` bar. Sending never blocks and never fails a run.

use crate::output::OutputFile;

use bytesize::ByteSize;
use colored::*;
use crossbeam_channel::{Receiver, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Default number of lines between progress events
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Bar resolution
const BAR_STEPS: u64 = 1000;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║                                                              ║
║   ┏━┓╻ ╻┏━┓┏┓╻┏━╸╻  ╻┏━┓╺┳╸   ╻┏ ╻╺┳╸                         ║
║   ┣━┛┣━┫┃ ┃┃┗┫┣╸ ┃  ┃┗━┓ ┃    ┣┻┓┃ ┃                          ║
║   ╹  ╹ ╹┗━┛╹ ╹┗━╸┗━╸╹┗━┛ ╹    ╹ ╹╹ ╹                          ║
║                                                              ║
║          Bulk editing for large phone number lists           ║
║                                                  v1.0.0      ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

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
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled progress bar over a 0..1 fraction
pub fn create_progress_bar(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(BAR_STEPS);

    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// One-way notification from a running pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A new phase started
    Stage(String),
    /// Overall completion in [0, 1], and lines handled so far
    Progress { fraction: f64, lines: u64 },
}

/// Turns per-line ticks into throttled, monotonic progress events.
///
/// A run is split into phases, each owning a slice of the [0, 1] range.
/// Within a phase completion is `done / total`. The reported fraction never
/// goes backwards even if a phase total was an underestimate.
pub struct ProgressReporter {
    sender: Option<Sender<ProgressEvent>>,
    interval: u64,
    reported: f64,
    phase_start: f64,
    phase_end: f64,
    phase_total: u64,
    phase_done: u64,
    lines: u64,
    since_emit: u64,
}

impl ProgressReporter {
    pub fn new(sender: Option<Sender<ProgressEvent>>, interval: u64) -> Self {
        Self {
            sender,
            interval: interval.max(1),
            reported: 0.0,
            phase_start: 0.0,
            phase_end: 1.0,
            phase_total: 0,
            phase_done: 0,
            lines: 0,
            since_emit: 0,
        }
    }

    /// Reporter that only tracks state
    pub fn silent() -> Self {
        Self::new(None, DEFAULT_PROGRESS_INTERVAL)
    }

    /// Start a phase ending at fraction `end`, expecting `total` ticks.
    pub fn stage(&mut self, name: &str, end: f64, total: u64) {
        self.phase_start = self.reported;
        self.phase_end = end.clamp(self.phase_start, 1.0);
        self.phase_total = total;
        self.phase_done = 0;
        self.since_emit = 0;

        log::debug!("Stage '{}' ({} lines expected)", name, total);
        self.send(ProgressEvent::Stage(name.to_string()));
    }

    /// One line handled in the current phase
    #[inline]
    pub fn tick(&mut self) {
        self.phase_done += 1;
        self.lines += 1;
        self.since_emit += 1;

        if self.since_emit >= self.interval {
            self.since_emit = 0;
            self.emit(self.phase_fraction());
        }
    }

    /// Mark the current phase as complete
    pub fn end_stage(&mut self) {
        self.emit(self.phase_end);
    }

    /// Report full completion
    pub fn finish(&mut self) {
        self.emit(1.0);
    }

    /// Last reported fraction
    pub fn fraction(&self) -> f64 {
        self.reported
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    fn phase_fraction(&self) -> f64 {
        if self.phase_total == 0 {
            return self.phase_start;
        }
        let done = (self.phase_done as f64 / self.phase_total as f64).min(1.0);
        self.phase_start + (self.phase_end - self.phase_start) * done
    }

    fn emit(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction <= self.reported {
            return;
        }
        self.reported = fraction;
        self.send(ProgressEvent::Progress {
            fraction,
            lines: self.lines,
        });
    }

    fn send(&self, event: ProgressEvent) {
        if let Some(sender) = &self.sender {
            // Receiver gone means nobody is watching
            let _ = sender.try_send(event);
        }
    }
}

/// Drain `events` into a progress bar until the sender side is dropped.
pub fn drive_progress_bar(events: Receiver<ProgressEvent>, quiet: bool) {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        create_progress_bar("Starting...")
    };

    for event in events.iter() {
        match event {
            ProgressEvent::Stage(name) => pb.set_message(name),
            ProgressEvent::Progress { fraction, lines } => {
                pb.set_position((fraction * BAR_STEPS as f64).round() as u64);
                if lines > 0 {
                    pb.set_message(format!("{} lines", format_number(lines)));
                }
            }
        }
    }

    pb.finish_and_clear();
}

/// Counters returned by every pipeline run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Lines read (non-empty unless the operation keeps blank lines)
    pub processed: u64,
    /// Lines written to outputs
    pub matched: u64,
    /// Lines skipped (filtered out, duplicates, non-numeric)
    pub skipped: u64,
    /// Distinct lines seen, when the operation tracks them
    pub unique: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_line(&mut self) {
        self.processed += 1;
    }

    #[inline]
    pub fn add_match(&mut self) {
        self.matched += 1;
    }

    #[inline]
    pub fn add_skip(&mut self) {
        self.skipped += 1;
    }

    /// Print final statistics
    pub fn print_summary(&self, outputs: &[OutputFile], elapsed: Duration) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    PROCESSING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Lines processed:".green(), format_number(self.processed));
        println!("  {} {}", "Lines written:  ".green(), format_number(self.matched));
        println!("  {} {}", "Skipped:        ".yellow(), format_number(self.skipped));
        if self.unique > 0 {
            println!(
                "  {} {}",
                "Unique:         ".green().bold(),
                format_number(self.unique).green().bold()
            );
        }

        if !outputs.is_empty() {
            println!();
            println!("  {}", "Output files:".green());
            for out in outputs {
                println!(
                    "    {} {} ({} lines, {})",
                    "•".green(),
                    out.path.display(),
                    format_number(out.lines),
                    ByteSize(out.bytes)
                );
            }
        }

        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            self.processed as f64 / secs
        } else {
            0.0
        };

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(elapsed));
        println!("  {} {:.2} lines/sec", "Throughput:     ".green(), rate);
        println!();
        println!("{}", "═".repeat(60).green());
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
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn fractions(events: &[ProgressEvent]) -> Vec<f64> {
        events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Progress { fraction, .. } => Some(*fraction),
                _ => None,
            })
            .collect()
    }

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
    fn test_reporter_throttles_and_stays_monotonic() {
        let (tx, rx) = unbounded();
        let mut reporter = ProgressReporter::new(Some(tx), 10);

        reporter.stage("Counting", 0.5, 100);
        for _ in 0..100 {
            reporter.tick();
        }
        reporter.end_stage();

        // Underestimated total: ticks past it must not exceed the phase end
        reporter.stage("Writing", 1.0, 10);
        for _ in 0..50 {
            reporter.tick();
        }
        reporter.finish();
        drop(reporter);

        let events: Vec<ProgressEvent> = rx.iter().collect();
        let stages = events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Stage(_)))
            .count();
        assert_eq!(stages, 2);

        let fractions = fractions(&events);
        assert!(fractions.len() <= 16);
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
        assert!(fractions.iter().all(|f| (0.0..=1.0).contains(f)));
        assert_eq!(*fractions.last().unwrap(), 1.0);
    }

    #[test]
    fn test_reporter_ignores_dropped_receiver() {
        let (tx, rx) = unbounded();
        drop(rx);

        let mut reporter = ProgressReporter::new(Some(tx), 1);
        reporter.stage("Writing", 1.0, 3);
        reporter.tick();
        reporter.finish();
        assert_eq!(reporter.fraction(), 1.0);
        assert_eq!(reporter.lines(), 1);
    }

    #[test]
    fn test_stage_never_moves_backwards() {
        let mut reporter = ProgressReporter::silent();
        reporter.stage("First", 0.8, 0);
        reporter.end_stage();
        reporter.stage("Second", 0.3, 0);
        reporter.end_stage();
        assert_eq!(reporter.fraction(), 0.8);
    }

    #[test]
    fn test_stats() {
        let mut stats = RunStats::new();
        stats.add_line();
        stats.add_line();
        stats.add_match();
        stats.add_skip();

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.unique, 0);
    }
}
