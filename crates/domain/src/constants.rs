//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Block policy constants (minutes)
pub const QIYAM_BLOCK_MINS: i64 = 90;
pub const FAJR_BLOCK_MINS: i64 = 45;
pub const MAGHRIB_BLOCK_MINS: i64 = 30;
pub const DEFAULT_BLOCK_MINS: i64 = 45;
pub const MIN_INTERSTITIAL_GAP_MINS: i64 = 30;

// Block presentation symbols
pub const PRAYER_BLOCK_SYMBOL: char = '●';
pub const INTERSTITIAL_BLOCK_SYMBOL: char = '○';

// Day-cycle clock configuration
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_TIMEZONE: &str = "Asia/Riyadh";

// Default location (Mecca)
pub const DEFAULT_LATITUDE: f64 = 21.4225;
pub const DEFAULT_LONGITUDE: f64 = 39.8262;
pub const DEFAULT_CITY: &str = "مكة المكرمة";
pub const DEFAULT_COUNTRY: &str = "السعودية";
