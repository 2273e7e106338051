//! Fixed prayer schedule provider
//!
//! Resolves a configured set of clock times against a calendar date in a
//! fixed timezone. This is the fallback schedule source callers use when no
//! live provider is available; the default configuration carries the mock
//! day (05:30 / 12:30 / 15:45 / 18:15 / 19:45, qiyam 02:30) for the default
//! Mecca location.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use miqat_core::{with_derived_qiyam, PrayerScheduleSource};
use miqat_domain::{
    Adjustments, MiqatError, PrayerKind, PrayerTimes, RawPrayerTimes, Result, ScheduleConfig,
};
use tracing::debug;

/// Schedule source backed by fixed clock times
///
/// Per-prayer minute adjustments from user settings are applied at
/// resolution time; qiyam is never adjusted. When `derive_qiyam` is set on
/// the schedule, the fixed qiyam time is ignored and the boundary of the
/// final third of the night is derived instead.
pub struct FixedScheduleProvider {
    schedule: ScheduleConfig,
    timezone: Tz,
    adjustments: Adjustments,
}

impl FixedScheduleProvider {
    /// Create a provider resolving the schedule in the given timezone
    pub fn new(schedule: ScheduleConfig, timezone: Tz) -> Self {
        Self { schedule, timezone, adjustments: Adjustments::default() }
    }

    /// Apply per-prayer minute offsets when resolving
    pub fn with_adjustments(mut self, adjustments: Adjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Resolve a clock time on a date to an absolute instant
    ///
    /// Ambiguous local times (fall-back transitions) resolve to the
    /// earliest instant. A local time skipped by a spring-forward
    /// transition is a validation error.
    fn resolve(&self, date: NaiveDate, time: NaiveTime, kind: PrayerKind) -> Result<DateTime<Utc>> {
        let instant = self
            .timezone
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(|| {
                MiqatError::Validation(format!(
                    "{kind} time {time} does not exist on {date} in {}",
                    self.timezone
                ))
            })?
            .with_timezone(&Utc);
        Ok(instant + Duration::minutes(self.adjustments.offset_mins(kind)))
    }
}

impl Default for FixedScheduleProvider {
    fn default() -> Self {
        Self::new(ScheduleConfig::default(), chrono_tz::Asia::Riyadh)
    }
}

#[async_trait]
impl PrayerScheduleSource for FixedScheduleProvider {
    async fn schedule_for(&self, date: NaiveDate) -> Result<PrayerTimes> {
        let raw = RawPrayerTimes {
            fajr: Some(self.resolve(date, self.schedule.fajr, PrayerKind::Fajr)?),
            dhuhr: Some(self.resolve(date, self.schedule.dhuhr, PrayerKind::Dhuhr)?),
            asr: Some(self.resolve(date, self.schedule.asr, PrayerKind::Asr)?),
            maghrib: Some(self.resolve(date, self.schedule.maghrib, PrayerKind::Maghrib)?),
            isha: Some(self.resolve(date, self.schedule.isha, PrayerKind::Isha)?),
            qiyam: if self.schedule.derive_qiyam {
                None
            } else {
                self.schedule
                    .qiyam
                    .map(|time| self.resolve(date, time, PrayerKind::Qiyam))
                    .transpose()?
            },
        };

        let times = PrayerTimes::from_raw(raw)?;
        debug!(%date, timezone = %self.timezone, "resolved fixed prayer schedule");

        if self.schedule.derive_qiyam {
            Ok(with_derived_qiyam(times))
        } else {
            Ok(times)
        }
    }
}
