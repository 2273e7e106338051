//! Day-cycle label types
//!
//! The day flips at Maghrib: from Maghrib until midnight the evening belongs
//! to the NEXT weekday ("night of Thursday" begins Wednesday evening).

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Which nominal day the wall clock currently belongs to
///
/// This is a token; rendering to a localized string is the caller's concern
/// (see [`crate::l10n::render_day_label`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "weekday", rename_all = "snake_case")]
pub enum DayLabel {
    /// Midnight through Maghrib: the label is the current weekday
    Day(Weekday),
    /// Maghrib onward: the label is the night of the following weekday
    NightOf(Weekday),
}

impl DayLabel {
    /// The weekday named by the label
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Day(weekday) | Self::NightOf(weekday) => weekday,
        }
    }

    /// Whether the label is in its night phase
    pub fn is_night(self) -> bool {
        matches!(self, Self::NightOf(_))
    }
}

/// One observation of the day-cycle clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub current_time: DateTime<Utc>,
    pub label: DayLabel,
    pub is_night: bool,
}
