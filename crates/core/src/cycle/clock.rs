//! Day-cycle arithmetic
//!
//! The day boundary is maghrib, not midnight. From maghrib onward the moment
//! belongs to the night of the following weekday; before maghrib it belongs
//! to the current weekday. The qiyam boundary marks the start of the final
//! third of the night between maghrib and the next fajr.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use miqat_domain::{DayLabel, DaySnapshot, PrayerTimes};

/// Label an instant within the maghrib-to-maghrib cycle
///
/// Both instants must carry the timezone whose weekday the label should
/// reflect. The maghrib instant itself already belongs to the night.
pub fn day_label<Tz: TimeZone>(now: &DateTime<Tz>, maghrib: &DateTime<Tz>) -> DayLabel {
    if now >= maghrib {
        DayLabel::NightOf(now.weekday().succ())
    } else {
        DayLabel::Day(now.weekday())
    }
}

/// Compute the qiyam boundary for the night starting at `maghrib`
///
/// When `next_fajr` does not fall after `maghrib` it is taken to mean the
/// same wall time on the following day and shifted forward by 24 hours. The
/// result is `maghrib` plus two thirds of the night span, exact to the
/// millisecond.
pub fn qiyam_time<Tz: TimeZone>(maghrib: &DateTime<Tz>, next_fajr: &DateTime<Tz>) -> DateTime<Tz> {
    let fajr = if next_fajr <= maghrib {
        next_fajr.clone() + Duration::hours(24)
    } else {
        next_fajr.clone()
    };
    let night_ms = (fajr - maghrib.clone()).num_milliseconds();
    maghrib.clone() + Duration::milliseconds(night_ms * 2 / 3)
}

/// Evaluate the day-cycle snapshot at an instant
pub fn evaluate<Tz: TimeZone>(now: &DateTime<Tz>, maghrib: &DateTime<Tz>) -> DaySnapshot {
    let label = day_label(now, maghrib);
    DaySnapshot { current_time: now.with_timezone(&Utc), label, is_night: label.is_night() }
}

/// Fill in a derived qiyam time when the schedule does not provide one
///
/// The night is taken between this day's maghrib and the same day's fajr
/// shifted to the following morning. A schedule that already carries a
/// qiyam time is returned unchanged.
pub fn with_derived_qiyam(times: PrayerTimes) -> PrayerTimes {
    if times.qiyam.is_some() {
        return times;
    }
    let qiyam = qiyam_time(&times.maghrib, &times.fajr);
    times.with_qiyam(qiyam)
}
