//! Accumulator of reasons a cast is not legal.
//!
//! Applicability checks append to a caller-owned `Problem` and return
//! `false`; nothing in the engine reads it back.

use serde::{Deserialize, Serialize};

/// How serious a legality failure is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Normal,
    /// Cannot be fixed by choosing a different aim point.
    Critical,
}

/// A single human-readable reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemMessage {
    pub severity: Severity,
    pub text: String,
}

/// Human-readable reasons a cast was rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    messages: Vec<ProblemMessage>,
}

impl Problem {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a normal-severity reason.
    pub fn add(&mut self, text: impl Into<String>) {
        self.add_with(Severity::Normal, text);
    }

    /// Record a reason with explicit severity.
    pub fn add_with(&mut self, severity: Severity, text: impl Into<String>) {
        self.messages.push(ProblemMessage {
            severity,
            text: text.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[ProblemMessage] {
        &self.messages
    }

    /// Highest severity recorded, if any.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.messages.iter().map(|m| m.severity).max()
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&message.text)?;
        }
        Ok(())
    }
}
