//! Domain types and models

pub mod day;
pub mod task;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{INTERSTITIAL_BLOCK_SYMBOL, PRAYER_BLOCK_SYMBOL};
use crate::errors::{MiqatError, Result};
use crate::impl_domain_token_conversions;

// Re-export submodule types for convenience
pub use day::{DayLabel, DaySnapshot};
pub use task::{Note, Task, TaskFilter};

// ============================================================================
// Prayer Types
// ============================================================================

/// The prayers anchoring the day structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerKind {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Qiyam,
}

impl_domain_token_conversions!(PrayerKind {
    Fajr => "fajr",
    Dhuhr => "dhuhr",
    Asr => "asr",
    Maghrib => "maghrib",
    Isha => "isha",
    Qiyam => "qiyam",
});

impl PrayerKind {
    /// The five daily prayers in canonical order (qiyam excluded)
    pub const CANONICAL: [Self; 5] =
        [Self::Fajr, Self::Dhuhr, Self::Asr, Self::Maghrib, Self::Isha];
}

/// Unvalidated prayer times as received from a schedule source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrayerTimes {
    pub fajr: Option<DateTime<Utc>>,
    pub dhuhr: Option<DateTime<Utc>>,
    pub asr: Option<DateTime<Utc>>,
    pub maghrib: Option<DateTime<Utc>>,
    pub isha: Option<DateTime<Utc>>,
    pub qiyam: Option<DateTime<Utc>>,
}

/// Prayer timestamps for one nominal calendar day
///
/// The five daily prayers are required. Qiyam is optional and, depending on
/// the source convention, may fall in the early hours of the same clock day
/// rather than after isha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qiyam: Option<DateTime<Utc>>,
}

impl PrayerTimes {
    /// Validate raw times into a complete set
    ///
    /// Fails with a `Validation` error naming the first missing required
    /// field. Qiyam stays optional.
    pub fn from_raw(raw: RawPrayerTimes) -> Result<Self> {
        Ok(Self {
            fajr: require(raw.fajr, PrayerKind::Fajr)?,
            dhuhr: require(raw.dhuhr, PrayerKind::Dhuhr)?,
            asr: require(raw.asr, PrayerKind::Asr)?,
            maghrib: require(raw.maghrib, PrayerKind::Maghrib)?,
            isha: require(raw.isha, PrayerKind::Isha)?,
            qiyam: raw.qiyam,
        })
    }

    /// Timestamp for a prayer, if present
    pub fn time_of(&self, kind: PrayerKind) -> Option<DateTime<Utc>> {
        match kind {
            PrayerKind::Fajr => Some(self.fajr),
            PrayerKind::Dhuhr => Some(self.dhuhr),
            PrayerKind::Asr => Some(self.asr),
            PrayerKind::Maghrib => Some(self.maghrib),
            PrayerKind::Isha => Some(self.isha),
            PrayerKind::Qiyam => self.qiyam,
        }
    }

    /// Entries in `(kind, time)` form, qiyam prepended when present
    ///
    /// Order is the insertion order expected by the partitioner; the
    /// partitioner performs the actual chronological sort.
    pub fn entries(&self) -> Vec<(PrayerKind, DateTime<Utc>)> {
        let mut entries = Vec::with_capacity(6);
        if let Some(qiyam) = self.qiyam {
            entries.push((PrayerKind::Qiyam, qiyam));
        }
        entries.push((PrayerKind::Fajr, self.fajr));
        entries.push((PrayerKind::Dhuhr, self.dhuhr));
        entries.push((PrayerKind::Asr, self.asr));
        entries.push((PrayerKind::Maghrib, self.maghrib));
        entries.push((PrayerKind::Isha, self.isha));
        entries
    }

    /// Returns a copy with the given qiyam time filled in
    pub fn with_qiyam(mut self, qiyam: DateTime<Utc>) -> Self {
        self.qiyam = Some(qiyam);
        self
    }
}

fn require(time: Option<DateTime<Utc>>, kind: PrayerKind) -> Result<DateTime<Utc>> {
    time.ok_or_else(|| MiqatError::Validation(format!("missing required prayer time: {kind}")))
}

// ============================================================================
// Block Types
// ============================================================================

/// Block category within the partitioned day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Prayer,
    Interstitial,
}

impl_domain_token_conversions!(BlockKind {
    Prayer => "prayer",
    Interstitial => "interstitial",
});

impl BlockKind {
    /// Presentation symbol: ● for prayer blocks, ○ for interstitials
    pub fn symbol(self) -> char {
        match self {
            Self::Prayer => PRAYER_BLOCK_SYMBOL,
            Self::Interstitial => INTERSTITIAL_BLOCK_SYMBOL,
        }
    }
}

/// A labeled slice of the day, half-open over `[start, end)`
///
/// Blocks are process-local: ids are regenerated on every partition and only
/// the tasks/notes attached to an id are persisted by collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Unique identifier (UUID v7, fresh per partition)
    pub id: String,
    pub kind: BlockKind,
    /// Localized display title
    pub title: String,
    pub symbol: char,
    /// The anchoring prayer; present iff `kind` is `Prayer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prayer: Option<PrayerKind>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeBlock {
    /// Block length
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` falls inside the half-open interval
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}
