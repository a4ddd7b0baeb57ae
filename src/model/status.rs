use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumString;

/// Tag describing what happened on a (staff, date) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum StatusTag {
    CheckedIn,
    CheckedOut,
    Completed,
    LateArrival,
    EarlyLeave,
    NoClockIn,
    NoClockOut,
    Absent,
    Scheduled,
    /// Explicit status set by an operator that is not one of the known tags.
    #[strum(default)]
    Custom(String),
}

impl StatusTag {
    pub fn as_str(&self) -> &str {
        match self {
            StatusTag::CheckedIn => "checked_in",
            StatusTag::CheckedOut => "checked_out",
            StatusTag::Completed => "completed",
            StatusTag::LateArrival => "late_arrival",
            StatusTag::EarlyLeave => "early_leave",
            StatusTag::NoClockIn => "no_clock_in",
            StatusTag::NoClockOut => "no_clock_out",
            StatusTag::Absent => "absent",
            StatusTag::Scheduled => "scheduled",
            StatusTag::Custom(s) => s,
        }
    }

    /// Reads an operator-supplied status. Blank input means "not set".
    ///
    /// Known tag names match ignoring case and surrounding whitespace so that
    /// accrual rules apply to them. Anything else is kept exactly as written.
    pub fn from_explicit(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.to_ascii_lowercase().parse() {
            Ok(StatusTag::Custom(_)) | Err(_) => Some(StatusTag::Custom(raw.to_string())),
            Ok(known) => Some(known),
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for StatusTag {
    fn from(value: String) -> Self {
        // `#[strum(default)]` makes parsing infallible
        value.parse().unwrap_or(StatusTag::Custom(value))
    }
}

impl From<StatusTag> for String {
    fn from(tag: StatusTag) -> Self {
        match tag {
            StatusTag::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// Ordered, de-duplicated list of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(Vec<StatusTag>);

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(tag: StatusTag) -> Self {
        Self(vec![tag])
    }

    /// Appends `tag` unless it is already present.
    pub fn push(&mut self, tag: StatusTag) {
        if !self.0.contains(&tag) {
            self.0.push(tag);
        }
    }

    pub fn contains(&self, tag: &StatusTag) -> bool {
        self.0.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusTag> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[StatusTag] {
        &self.0
    }
}

impl FromIterator<StatusTag> for StatusSet {
    fn from_iter<I: IntoIterator<Item = StatusTag>>(iter: I) -> Self {
        let mut set = StatusSet::new();
        for tag in iter {
            set.push(tag);
        }
        set
    }
}
