//! Operator-facing console output.
//!
//! Launcher messages are meant for a person looking at a terminal window, so
//! they go through [`Console`] rather than `tracing`. The terminal
//! implementation can hold the window open at the end of a run.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::{Arc, Mutex};
use tokio::runtime::{Handle, RuntimeFlavor};

pub const PAUSE_PROMPT: &str = "Press Enter to continue . . .";

pub trait Console: Send + Sync {
    /// Informational line on stdout
    fn line(&self, message: &str);
    /// Diagnostic line on stderr
    fn error(&self, message: &str);
    /// Wait for the operator to acknowledge the output
    fn pause(&self);
}

pub struct TerminalConsole {
    pause_enabled: bool,
}

impl TerminalConsole {
    pub fn new(pause_enabled: bool) -> Self {
        Self { pause_enabled }
    }

    /// Pausing only makes sense when someone can press a key
    pub fn should_pause(&self) -> bool {
        self.pause_enabled && io::stdin().is_terminal()
    }
}

impl Console for TerminalConsole {
    fn line(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }

    fn pause(&self) {
        if !self.should_pause() {
            tracing::debug!("Skipping pause (disabled or stdin is not a terminal)");
            return;
        }

        print!("{PAUSE_PROMPT}");
        if let Err(e) = io::stdout().flush() {
            tracing::debug!("Pause prompt flush failed: {}", e);
        }

        run_blocking(|| {
            let mut input = String::new();
            if let Err(e) = io::stdin().lock().read_line(&mut input) {
                tracing::debug!("Pause read failed: {}", e);
            }
        });
    }
}

/// Run a blocking call without stalling other tasks on a multi-threaded runtime.
///
/// `block_in_place` panics on a current-thread runtime, so there and outside
/// any runtime the call runs directly.
pub fn run_blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// One captured console event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Line(String),
    Error(String),
    Pause,
}

/// Console that records everything, for tests
#[derive(Clone, Default)]
pub struct RecordingConsole {
    events: Arc<Mutex<Vec<ConsoleEvent>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Every line and error message joined with newlines
    pub fn transcript(&self) -> String {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ConsoleEvent::Line(text) | ConsoleEvent::Error(text) => Some(text),
                ConsoleEvent::Pause => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn pause_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == ConsoleEvent::Pause)
            .count()
    }

    fn push(&self, event: ConsoleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Console for RecordingConsole {
    fn line(&self, message: &str) {
        self.push(ConsoleEvent::Line(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(ConsoleEvent::Error(message.to_string()));
    }

    fn pause(&self) {
        self.push(ConsoleEvent::Pause);
    }
}
