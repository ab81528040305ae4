// src/progress.rs

//! Progress reporting
//!
//! The pipeline emits `ProgressEvent`s in order and never renders anything
//! itself. `LogProgress` forwards events to tracing; `ConsoleProgress` draws
//! the interactive bar used by the binary.

use crate::inspect::FileStatus;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Something the pipeline wants reported
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent<'a> {
    /// Downloads are about to start
    BatchStarted { total: usize },
    /// A file needs an update (only sent in verbose runs)
    Outdated {
        name: &'a str,
        status: FileStatus,
        expected: &'a str,
    },
    /// Download `index` of `total` (1-based) is starting
    FileStarted {
        index: usize,
        total: usize,
        name: &'a str,
        percent: f64,
    },
    /// A file failed; the batch goes on
    Warning { name: &'a str, message: String },
    /// All downloads have been attempted
    BatchFinished { saved: usize, total: usize },
}

/// Consumer of progress events
pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent<'_>);
}

/// Sends events to the tracing subscriber
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::BatchStarted { total } => info!("Downloading {} files", total),
            ProgressEvent::Outdated {
                name,
                status,
                expected,
            } => match status {
                FileStatus::Missing => warn!("File {} is missing", name),
                _ => warn!("File {} expects hash {}", name, expected),
            },
            ProgressEvent::FileStarted {
                index,
                total,
                name,
                percent,
            } => info!("[{}/{}] {} {:.2}%", index, total, name, percent),
            ProgressEvent::Warning { message, .. } => warn!("{}", message),
            ProgressEvent::BatchFinished { saved, .. } => info!("Updated {} files", saved),
        }
    }
}

/// Terminal progress bar
#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix:<12} {wide_msg} {percent:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::BatchStarted { total } => {
                println!("Downloading {} files...", total);
                let bar = ProgressBar::new(total as u64);
                bar.set_style(Self::style());
                self.bar = Some(bar);
            }
            ProgressEvent::Outdated {
                name,
                status,
                expected,
            } => match status {
                FileStatus::Missing => eprintln!("File {} is missing", name),
                _ => eprintln!("File {} expects hash {}", name, expected),
            },
            ProgressEvent::FileStarted {
                index, total, name, ..
            } => {
                if let Some(bar) = &self.bar {
                    bar.set_prefix(format!("[{}/{}]", index, total));
                    bar.set_message(name.to_string());
                    bar.set_position(index as u64);
                }
            }
            ProgressEvent::Warning { message, .. } => match &self.bar {
                Some(bar) => bar.println(format!("WARNING: {}", message)),
                None => eprintln!("WARNING: {}", message),
            },
            ProgressEvent::BatchFinished { saved, .. } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
                println!("Updated {} files.", saved);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_progress_tracks_bar_lifecycle() {
        let mut progress = ConsoleProgress::new();

        progress.report(ProgressEvent::BatchStarted { total: 2 });
        assert!(progress.bar.is_some());

        progress.report(ProgressEvent::FileStarted {
            index: 1,
            total: 2,
            name: "a.txt",
            percent: 50.0,
        });
        assert_eq!(progress.bar.as_ref().map(|b| b.position()), Some(1));

        progress.report(ProgressEvent::BatchFinished { saved: 2, total: 2 });
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_log_progress_accepts_every_event() {
        let mut progress = LogProgress;
        progress.report(ProgressEvent::BatchStarted { total: 1 });
        progress.report(ProgressEvent::Outdated {
            name: "a.txt",
            status: FileStatus::Stale,
            expected: "abc123",
        });
        progress.report(ProgressEvent::Warning {
            name: "a.txt",
            message: "boom".to_string(),
        });
        progress.report(ProgressEvent::BatchFinished { saved: 0, total: 1 });
    }
}
