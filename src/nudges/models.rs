//! Nudge data models.
//!
//! Defines the stored nudge record, the fixed weekday mapping, the
//! caller-selected day filter, and page requests.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Day of the week with the product's fixed index mapping.
///
/// Sunday=0 through Saturday=6, independent of locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// All weekdays, in index order.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// The fixed numeric index of this weekday (Sunday=0 .. Saturday=6).
    pub fn index(&self) -> i64 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    pub fn from_index(value: i64) -> Option<Self> {
        match value {
            0 => Some(Weekday::Sunday),
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Parse an exact weekday name ("Sunday" .. "Saturday").
    ///
    /// Returns None for anything else; callers treat unknown names as
    /// absent rather than as an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Sunday" => Some(Weekday::Sunday),
            "Monday" => Some(Weekday::Monday),
            "Tuesday" => Some(Weekday::Tuesday),
            "Wednesday" => Some(Weekday::Wednesday),
            "Thursday" => Some(Weekday::Thursday),
            "Friday" => Some(Weekday::Friday),
            "Saturday" => Some(Weekday::Saturday),
            _ => None,
        }
    }
}

/// Caller-selected subset of weekdays used to narrow which nudges are
/// considered active.
///
/// An empty filter means "match every day".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFilter {
    days: HashSet<Weekday>,
}

impl DayFilter {
    /// The unrestricted filter (matches every day).
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_days<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Build a filter from weekday names as supplied by the caller.
    ///
    /// Unknown names are silently ignored, not an error.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            days: names
                .into_iter()
                .filter_map(|name| Weekday::from_name(name.as_ref()))
                .collect(),
        }
    }

    /// Returns true if this filter does not restrict any day.
    pub fn is_unrestricted(&self) -> bool {
        self.days.is_empty()
    }

    /// Resolve to the set of selected weekday indices.
    ///
    /// An empty filter resolves to the full set {0..=6}.
    pub fn resolved_indices(&self) -> HashSet<i64> {
        if self.days.is_empty() {
            ALL_WEEKDAYS.iter().map(Weekday::index).collect()
        } else {
            self.days.iter().map(Weekday::index).collect()
        }
    }
}

/// When a nudge fires, as stored on the record.
///
/// Tagged on the wire field `scheduleType`. The two variants degrade
/// differently when their payload is missing or malformed: a fixed-date
/// nudge with a bad `date` is still shown (fail-open), a recurring nudge
/// with no usable pattern is never shown (fail-closed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheduleType")]
pub enum Schedule {
    /// Single occurrence pinned to a calendar date (`dd-MM-yyyy`).
    #[serde(rename = "schedule")]
    Scheduled {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
    /// Weekly pattern over weekday indices (0 = Sunday .. 6 = Saturday).
    #[serde(rename = "recurring")]
    Recurring {
        #[serde(
            default,
            rename = "recurrenceDays",
            skip_serializing_if = "Option::is_none"
        )]
        recurrence_days: Option<Vec<i64>>,
    },
}

/// A stored client nudge.
///
/// Date and timestamp fields are kept as the raw strings the product
/// stores; the resolver owns all leniency around parsing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NudgeRecord {
    pub id: String,
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Creation timestamp in `dd-MM-yyyy HH:mm`, used only to order
    /// fixed-date views. May be malformed or absent.
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, rename = "isRead")]
    pub is_read: bool,
}

/// A 1-based page request.
///
/// `page = 0` is treated as the first page; `limit = 0` yields empty
/// pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// First item index covered by this request.
    pub fn start(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.limit)
    }
}
