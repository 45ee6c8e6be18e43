//! Core task domain types.
//!
//! Pure data types with no I/O dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance used when deciding that a progress value has reached 100%.
///
/// Floating-point arithmetic on percentages can land a hair under 100, so
/// completion checks accept anything within `1e-12` of it.
pub const COMPLETION_EPSILON: f64 = 1e-12;

/// Opaque identifier for a task.
///
/// Handed out by the server when a task is created (a UUID v4 in practice),
/// but clients treat it as an opaque string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A task's completion percentage.
///
/// Clamped to `[0, 100]` on construction; serialized as a bare JSON number
/// so the wire format stays `{"progress": 42}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// No progress yet. The display value before any event arrives.
    pub const ZERO: Self = Self(0.0);

    /// Fully complete.
    pub const COMPLETE: Self = Self(100.0);

    /// Create a progress value, clamping to the valid percentage range.
    #[must_use]
    pub fn new(percent: f64) -> Self {
        Self(percent.clamp(0.0, 100.0))
    }

    /// The percentage as a raw number in `[0, 100]`.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether this value counts as complete (within [`COMPLETION_EPSILON`]
    /// of 100).
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 100.0 - COMPLETION_EPSILON
    }
}

impl From<f64> for Progress {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_to_percentage_range() {
        assert_eq!(Progress::new(-5.0).value(), 0.0);
        assert_eq!(Progress::new(142.0).value(), 100.0);
        assert_eq!(Progress::new(42.0).value(), 42.0);
    }

    #[test]
    fn progress_completion_tolerance() {
        assert!(Progress::COMPLETE.is_complete());
        assert!(Progress::new(100.0 - 1e-13).is_complete());
        assert!(!Progress::new(100.0 - 1e-9).is_complete());
        assert!(!Progress::new(99.999).is_complete());
        assert!(!Progress::ZERO.is_complete());
    }

    #[test]
    fn progress_serializes_as_bare_number() {
        let json = serde_json::to_string(&Progress::new(42.0)).unwrap();
        assert_eq!(json, "42.0");

        let parsed: Progress = serde_json::from_str("73.5").unwrap();
        assert_eq!(parsed.value(), 73.5);
    }

    #[test]
    fn task_id_round_trips_as_string() {
        let id = TaskId::from("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }
}
