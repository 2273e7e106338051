//! Port interfaces for prayer schedules
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use miqat_domain::{PrayerTimes, Result};

/// Trait for resolving the prayer schedule of a calendar day
#[async_trait]
pub trait PrayerScheduleSource: Send + Sync {
    /// Prayer times for the given date
    async fn schedule_for(&self, date: NaiveDate) -> Result<PrayerTimes>;
}
