//! Configuration structures
//!
//! Process configuration (block policy, clock, fixed schedule) plus the
//! user-level settings value object. Loading from env/files lives in the
//! infra crate; everything here is plain data with serde and defaults.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BLOCK_MINS, DEFAULT_CITY, DEFAULT_COUNTRY, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
    FAJR_BLOCK_MINS, MAGHRIB_BLOCK_MINS, MIN_INTERSTITIAL_GAP_MINS, QIYAM_BLOCK_MINS,
    TICK_INTERVAL_MS,
};
use crate::impl_domain_token_conversions;
use crate::l10n::Language;
use crate::types::PrayerKind;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blocks: BlockConfig,
    pub clock: ClockConfig,
    pub schedule: ScheduleConfig,
}

/// Policy table for block partitioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Qiyam block duration in minutes (default: 90)
    pub qiyam_block_mins: i64,

    /// Fajr block duration in minutes (default: 45)
    pub fajr_block_mins: i64,

    /// Maghrib block duration in minutes (default: 30)
    pub maghrib_block_mins: i64,

    /// Duration for dhuhr, asr and isha blocks in minutes (default: 45)
    pub default_block_mins: i64,

    /// Gaps at or below this many minutes are absorbed (default: 30)
    pub min_interstitial_gap_mins: i64,

    /// Clamp a prayer block at the next prayer's start instead of letting the
    /// fixed duration overlap it (default: false)
    pub trim_overlaps: bool,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            qiyam_block_mins: QIYAM_BLOCK_MINS,
            fajr_block_mins: FAJR_BLOCK_MINS,
            maghrib_block_mins: MAGHRIB_BLOCK_MINS,
            default_block_mins: DEFAULT_BLOCK_MINS,
            min_interstitial_gap_mins: MIN_INTERSTITIAL_GAP_MINS,
            trim_overlaps: false,
        }
    }
}

impl BlockConfig {
    /// Block duration in minutes for a prayer, per the policy table
    pub fn duration_mins(&self, kind: PrayerKind) -> i64 {
        match kind {
            PrayerKind::Qiyam => self.qiyam_block_mins,
            PrayerKind::Fajr => self.fajr_block_mins,
            PrayerKind::Maghrib => self.maghrib_block_mins,
            PrayerKind::Dhuhr | PrayerKind::Asr | PrayerKind::Isha => self.default_block_mins,
        }
    }
}

/// Day-cycle clock configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Tick period in milliseconds (default: 1000)
    pub tick_interval_ms: u64,

    /// Timezone the wall clock is evaluated in
    pub timezone: Tz,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { tick_interval_ms: TICK_INTERVAL_MS, timezone: chrono_tz::Asia::Riyadh }
    }
}

/// Fixed prayer schedule used when no live source is available
///
/// Clock times are resolved against a calendar date in the configured
/// timezone by the infra provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub fajr: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,

    /// Fixed qiyam clock time; ignored when `derive_qiyam` is set
    pub qiyam: Option<NaiveTime>,

    /// Derive qiyam as the last third of the night (maghrib to next fajr)
    /// instead of using the fixed `qiyam` time
    pub derive_qiyam: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fajr: hm(5, 30),
            dhuhr: hm(12, 30),
            asr: hm(15, 45),
            maghrib: hm(18, 15),
            isha: hm(19, 45),
            qiyam: Some(hm(2, 30)),
            derive_qiyam: false,
        }
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default()
}

// ============================================================================
// User Settings
// ============================================================================

/// Geographic location for prayer time calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            city: DEFAULT_CITY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Prayer time calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMethod {
    #[serde(rename = "MWL")]
    Mwl,
    #[serde(rename = "ISNA")]
    Isna,
    Egypt,
    Makkah,
    Karachi,
    Tehran,
    Jafari,
}

impl_domain_token_conversions!(CalculationMethod {
    Mwl => "mwl",
    Isna => "isna",
    Egypt => "egypt",
    Makkah => "makkah",
    Karachi => "karachi",
    Tehran => "tehran",
    Jafari => "jafari",
});

/// Juristic school for the Asr calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Madhab {
    Shafi,
    Hanafi,
}

impl_domain_token_conversions!(Madhab {
    Shafi => "shafi",
    Hanafi => "hanafi",
});

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Auto,
}

impl_domain_token_conversions!(Theme {
    Dark => "dark",
    Light => "light",
    Auto => "auto",
});

/// Per-prayer minute offsets applied when resolving a schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub fajr: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl Adjustments {
    /// Offset in minutes for a prayer; qiyam is never adjusted
    pub fn offset_mins(&self, kind: PrayerKind) -> i64 {
        match kind {
            PrayerKind::Fajr => i64::from(self.fajr),
            PrayerKind::Dhuhr => i64::from(self.dhuhr),
            PrayerKind::Asr => i64::from(self.asr),
            PrayerKind::Maghrib => i64::from(self.maghrib),
            PrayerKind::Isha => i64::from(self.isha),
            PrayerKind::Qiyam => 0,
        }
    }
}

/// User settings value object
///
/// Persistence is owned by an external collaborator. The fixed schedule
/// provider consumes `adjustments`; `location` and the calculation fields are
/// carried for calculation-based schedule sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,
    pub user_id: String,
    pub notifications_enabled: bool,
    pub location: Location,
    pub calculation_method: CalculationMethod,
    pub madhab: Madhab,
    pub adjustments: Adjustments,
    pub theme: Theme,
    pub language: Language,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    /// The default profile used before any user settings are stored
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            id: "default".to_string(),
            user_id: "default_user".to_string(),
            notifications_enabled: true,
            location: Location::default(),
            calculation_method: CalculationMethod::Mwl,
            madhab: Madhab::Shafi,
            adjustments: Adjustments::default(),
            theme: Theme::Dark,
            language: Language::Ar,
            created_at: now,
            updated_at: now,
        }
    }
}
