//! Canonical event record produced by the parser and consumed by the
//! formatter and submitter. Immutable once constructed.

use chrono::{DateTime, Utc};

/// One course associated with an event. The TimeEdit export carries codes and
/// names as two parallel comma-separated lists; they are zipped into pairs at
/// parse time so downstream code never has to index two lists in lockstep.
/// Either list may be shorter than the other, so both sides are optional;
/// a name without a code still feeds the title fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// A single schedule entry, with wall-clock times already resolved to UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub courses: Vec<Course>,
    pub activities: Vec<String>,
    pub title: String,
    pub room: String,
    /// Parsed but not used by formatting yet.
    pub class_codes: Vec<String>,
    pub class_names: Vec<String>,
}

impl Event {
    /// Codes of the associated courses, in source order.
    pub fn course_codes(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().filter_map(|c| c.code.as_deref())
    }
}
