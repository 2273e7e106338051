//! Localization tables for display strings
//!
//! Arabic is the default presentation language, matching the persisted data;
//! English renderings are available for every token. Only tokens the engine
//! itself produces live here (prayer names, block titles, day labels, filter
//! labels); screen chrome is the UI collaborator's concern.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::impl_domain_token_conversions;
use crate::types::{DayLabel, PrayerKind, TaskFilter};

/// Presentation language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

impl_domain_token_conversions!(Language {
    Ar => "ar",
    En => "en",
});

impl Default for Language {
    fn default() -> Self {
        Self::Ar
    }
}

/// Display name of a prayer
pub fn prayer_name(kind: PrayerKind, language: Language) -> &'static str {
    match language {
        Language::Ar => match kind {
            PrayerKind::Fajr => "فجر",
            PrayerKind::Dhuhr => "ظهر",
            PrayerKind::Asr => "عصر",
            PrayerKind::Maghrib => "مغرب",
            PrayerKind::Isha => "عشاء",
            PrayerKind::Qiyam => "قيام الليل",
        },
        Language::En => match kind {
            PrayerKind::Fajr => "Fajr",
            PrayerKind::Dhuhr => "Dhuhr",
            PrayerKind::Asr => "Asr",
            PrayerKind::Maghrib => "Maghrib",
            PrayerKind::Isha => "Isha",
            PrayerKind::Qiyam => "Qiyam",
        },
    }
}

/// Full weekday name
pub fn weekday_name(weekday: Weekday, language: Language) -> &'static str {
    match language {
        Language::Ar => match weekday {
            Weekday::Mon => "الاثنين",
            Weekday::Tue => "الثلاثاء",
            Weekday::Wed => "الأربعاء",
            Weekday::Thu => "الخميس",
            Weekday::Fri => "الجمعة",
            Weekday::Sat => "السبت",
            Weekday::Sun => "الأحد",
        },
        Language::En => match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        },
    }
}

/// Title for a prayer block
pub fn prayer_block_title(kind: PrayerKind, language: Language) -> String {
    match language {
        Language::Ar => format!("فترة صلاة {}", prayer_name(kind, language)),
        Language::En => format!("{} prayer", prayer_name(kind, language)),
    }
}

/// Title for an interstitial block, naming both adjacent prayers
pub fn interstitial_block_title(
    before: PrayerKind,
    after: PrayerKind,
    language: Language,
) -> String {
    match language {
        Language::Ar => {
            format!("فترة بين {} و {}", prayer_name(before, language), prayer_name(after, language))
        }
        Language::En => {
            format!("Between {} and {}", prayer_name(before, language), prayer_name(after, language))
        }
    }
}

/// Render a day label token
///
/// Day phase renders as the bare weekday name; night phase carries the
/// "night of" prefix.
pub fn render_day_label(label: DayLabel, language: Language) -> String {
    match label {
        DayLabel::Day(weekday) => weekday_name(weekday, language).to_string(),
        DayLabel::NightOf(weekday) => match language {
            Language::Ar => format!("ليلة {}", weekday_name(weekday, language)),
            Language::En => format!("Night of {}", weekday_name(weekday, language)),
        },
    }
}

/// Display label for a task filter
pub fn filter_label(filter: TaskFilter, language: Language) -> &'static str {
    match language {
        Language::Ar => match filter {
            TaskFilter::NormalDay => "يوم عادي",
            TaskFilter::FastingDay => "صيام",
            TaskFilter::Holiday => "إجازة",
        },
        Language::En => match filter {
            TaskFilter::NormalDay => "Normal day",
            TaskFilter::FastingDay => "Fasting day",
            TaskFilter::Holiday => "Holiday",
        },
    }
}
