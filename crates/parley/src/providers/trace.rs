//! Verbose-mode echo of prompts and replies.
//!
//! Providers hand every traced message to a [`TraceSink`]. The sink is purely
//! diagnostic: nothing it does can change what a provider returns.
use std::io::{Stdout, Write};
use std::sync::Mutex;

use crate::models::Role;

pub trait TraceSink: Send + Sync {
    fn record(&self, role: &Role, text: &str);
}

/// Banner used for a role in the stdout trace, e.g. `---AI---`.
pub fn trace_label(role: &Role) -> &str {
    match role {
        Role::System => "SYSTEM",
        Role::User => "USER",
        Role::Assistant => "AI",
        Role::Other(name) => name,
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn record(&self, _role: &Role, _text: &str) {}
}

/// Writes each entry as a `---ROLE---` banner followed by the text.
#[derive(Debug)]
pub struct WriterTrace<W> {
    writer: Mutex<W>,
}

/// The trace verbose providers install by default.
pub type StdoutTrace = WriterTrace<Stdout>;

impl<W: Write + Send> WriterTrace<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterTrace<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TraceSink for WriterTrace<W> {
    fn record(&self, role: &Role, text: &str) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // A closed writer must not turn into a provider failure
        let _ = writeln!(writer, "---{}---\n{}", trace_label(role), text);
        let _ = writer.flush();
    }
}

/// Forwards entries to `tracing` at info level under the `parley::trace` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTrace;

impl TraceSink for TracingTrace {
    fn record(&self, role: &Role, text: &str) {
        tracing::info!(target: "parley::trace", role = %role, "{}", text);
    }
}

/// Keeps entries in memory, mostly for asserting on them in tests.
#[derive(Debug, Default)]
pub struct RecordingTrace {
    entries: Mutex<Vec<(Role, String)>>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Role, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TraceSink for RecordingTrace {
    fn record(&self, role: &Role, text: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((role.clone(), text.to_string()));
    }
}
