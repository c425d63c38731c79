//! Merge events and the sinks that receive them
//!
//! The merge engine never logs directly. It reports what happened to an
//! [`EventSink`] handed to it by the caller; the binary uses [`LogSink`],
//! tests use [`RecordingSink`].

use log::{error, info};
use std::path::PathBuf;

/// Something the merge engine decided or did for a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// Basename is on the ignore list; the file was not hashed
    Ignored { name: String },

    /// Content not seen before; the fingerprint is now claimed
    NewContent { name: String },

    /// Copied to `target/<name>`
    Saved { name: String, target: PathBuf },

    /// Copied under a generated name because `name` was already taken
    SavedAs {
        name: String,
        target: PathBuf,
        saved_as: String,
    },

    /// The copy failed; set membership is kept
    CopyFailed { name: String, renamed: bool },
}

impl MergeEvent {
    /// Whether this event is reported at error severity
    pub fn is_error(&self) -> bool {
        matches!(self, MergeEvent::CopyFailed { .. })
    }
}

impl std::fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeEvent::Ignored { name } => write!(f, "Ignoring file: {}", name),
            MergeEvent::NewContent { name } => write!(f, "New photo found: {}", name),
            MergeEvent::Saved { name, target } => {
                write!(f, "Saved: {} in {}", name, target.display())
            }
            MergeEvent::SavedAs {
                name,
                target,
                saved_as,
            } => write!(f, "Saved: {} in {} as {}", name, target.display(), saved_as),
            MergeEvent::CopyFailed { name, .. } => write!(f, "Failed to copy file: {}", name),
        }
    }
}

/// Receiver for merge events
pub trait EventSink {
    fn emit(&mut self, event: MergeEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: MergeEvent) {
        if event.is_error() {
            error!("{}", event);
        } else {
            info!("{}", event);
        }
    }
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<MergeEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[MergeEvent] {
        &self.events
    }

    /// Rendered log lines, for message assertions
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.events.iter().any(|e| e.to_string() == message)
    }

    /// Events that mention the given basename
    pub fn for_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MergeEvent> + 'a {
        self.events.iter().filter(move |e| match e {
            MergeEvent::Ignored { name: n }
            | MergeEvent::NewContent { name: n }
            | MergeEvent::Saved { name: n, .. }
            | MergeEvent::SavedAs { name: n, .. }
            | MergeEvent::CopyFailed { name: n, .. } => n == name,
        })
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: MergeEvent) {
        self.events.push(event);
    }
}
