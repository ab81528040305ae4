// src/prompt.rs

//! Confirmation before downloading

use dialoguer::Confirm as ConfirmDialog;
use tracing::warn;

/// Asks whether a batch of downloads may start
pub trait Confirm {
    fn confirm(&mut self, pending: usize) -> bool;
}

/// Always says yes (non-interactive runs)
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _pending: usize) -> bool {
        true
    }
}

/// Interactive y/n prompt on the terminal
///
/// Any error reading the answer (closed stdin, no terminal) counts as "no".
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, pending: usize) -> bool {
        ConfirmDialog::new()
            .with_prompt(format!("Are you sure you want to update {} files?", pending))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!("Could not read confirmation: {}", e);
                false
            })
    }
}
