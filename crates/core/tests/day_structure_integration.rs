//! Integration tests for the day structure pipeline
//!
//! Walks a mock day end to end: partitioning prayer times into blocks,
//! evaluating block status over the day, labeling the maghrib-to-maghrib
//! cycle and attaching tasks to generated blocks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};
use miqat_core::{
    active_block, block_status, day_label, qiyam_time, remaining_minutes, with_derived_qiyam,
    AppState, BlockPartitioner, BlockStatus, Command, PrayerScheduleSource, Store, TaskPatch,
};
use miqat_domain::l10n::{self, Language};
use miqat_domain::{
    BlockConfig, BlockKind, DayLabel, PrayerKind, PrayerTimes, Result as DomainResult, Task,
    TaskFilter,
};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, hour, min, 0).unwrap()
}

fn mock_times() -> PrayerTimes {
    PrayerTimes {
        fajr: at(5, 30),
        dhuhr: at(12, 30),
        asr: at(15, 45),
        maghrib: at(18, 15),
        isha: at(19, 45),
        qiyam: None,
    }
}

fn partitioner() -> BlockPartitioner {
    BlockPartitioner::new(BlockConfig::default()).unwrap()
}

struct FixedSource {
    times: PrayerTimes,
}

#[async_trait]
impl PrayerScheduleSource for FixedSource {
    async fn schedule_for(&self, _date: NaiveDate) -> DomainResult<PrayerTimes> {
        Ok(self.times.clone())
    }
}

// ============================================================================
// Partition + Timeline + Cycle
// ============================================================================

/// Test the full pipeline from schedule to labeled day
///
/// Scenario: a Wednesday on the mock schedule; the user checks the timeline
/// mid-morning, during asr and again after maghrib
#[test]
fn test_full_day_walkthrough() {
    let times = with_derived_qiyam(mock_times());
    assert_eq!(times.qiyam, Some(Utc.with_ymd_and_hms(2024, 3, 7, 1, 45, 0).unwrap()));

    let blocks = partitioner().partition(&times);

    // Six prayer blocks and six interstitials cover the wrap to the next
    // fajr
    assert_eq!(blocks.len(), 12);
    assert_eq!(blocks.iter().filter(|b| b.kind == BlockKind::Prayer).count(), 6);

    // Derived qiyam lands past midnight, so it sorts after isha
    let kinds: Vec<_> = blocks.iter().filter_map(|b| b.prayer).collect();
    assert_eq!(kinds.last(), Some(&PrayerKind::Qiyam));

    // Mid-morning falls in the fajr-to-dhuhr interstitial
    let morning = active_block(&blocks, at(9, 0)).unwrap();
    assert_eq!(morning.kind, BlockKind::Interstitial);
    assert_eq!(morning.start, at(6, 15));
    assert_eq!(morning.end, at(12, 30));

    let dhuhr = blocks.iter().find(|b| b.prayer == Some(PrayerKind::Dhuhr)).unwrap();
    assert_eq!(block_status(dhuhr, at(9, 0)), BlockStatus::Upcoming);

    // During asr the prayer block is active with time on the clock
    let asr = active_block(&blocks, at(16, 0)).unwrap();
    assert_eq!(asr.prayer, Some(PrayerKind::Asr));
    assert_eq!(remaining_minutes(asr, at(16, 0)), 30);

    // After maghrib the label flips to the night of Thursday
    let maghrib = times.maghrib;
    assert_eq!(day_label(&at(12, 0), &maghrib), DayLabel::Day(Weekday::Wed));

    let night = day_label(&at(19, 0), &maghrib);
    assert_eq!(night, DayLabel::NightOf(Weekday::Thu));
    assert_eq!(l10n::render_day_label(night, Language::Ar), "ليلة الخميس");
    assert_eq!(l10n::render_day_label(night, Language::En), "Night of Thursday");
}

/// Test qiyam derivation against the documented mock day
///
/// Scenario: maghrib 18:15 and next-morning fajr 05:30 put the final third
/// of the night at 01:45
#[test]
fn test_qiyam_boundary_mock_day() {
    let maghrib = at(18, 15);
    let same_day_fajr = at(5, 30);

    let qiyam = qiyam_time(&maghrib, &same_day_fajr);
    assert_eq!(qiyam, Utc.with_ymd_and_hms(2024, 3, 7, 1, 45, 0).unwrap());
}

// ============================================================================
// Schedule source port
// ============================================================================

/// Test the async schedule port feeding the partitioner
#[tokio::test]
async fn test_schedule_source_feeds_partitioner() {
    let source: Arc<dyn PrayerScheduleSource> = Arc::new(FixedSource { times: mock_times() });

    let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    let times = source.schedule_for(date).await.unwrap();
    let blocks = partitioner().partition(&times);

    assert_eq!(blocks.iter().filter(|b| b.kind == BlockKind::Prayer).count(), 5);
}

// ============================================================================
// Store integration
// ============================================================================

/// Test tasks riding along with regenerated blocks
///
/// Scenario: block ids are process-local and regenerate on every partition;
/// a task keeps pointing at a day slot by being re-attached to the fresh id
#[test]
fn test_tasks_reattach_across_repartition() {
    let store = Store::new(AppState::default());
    let builder = partitioner();
    let times = mock_times();

    let first = builder.partition(&times);
    let dhuhr_id = first.iter().find(|b| b.prayer == Some(PrayerKind::Dhuhr)).unwrap().id.clone();

    let task = Task::new("قراءة الورد", 0, at(8, 0)).with_block(dhuhr_id.clone());
    let task_id = task.id.clone();
    store.dispatch_at(Command::AddTask { task }, at(8, 0));
    assert_eq!(store.snapshot().tasks[0].block_id, Some(dhuhr_id));

    // Repartition regenerates ids; the task follows via an update
    let second = builder.partition(&times);
    let fresh_id = second.iter().find(|b| b.prayer == Some(PrayerKind::Dhuhr)).unwrap().id.clone();

    let patch = TaskPatch { block_id: Some(Some(fresh_id.clone())), ..TaskPatch::default() };
    store.dispatch_at(Command::UpdateTask { id: task_id, patch }, at(8, 5));
    assert_eq!(store.snapshot().tasks[0].block_id, Some(fresh_id));
}

/// Test filter selection narrowing the visible task list
#[test]
fn test_filter_selection_narrows_tasks() {
    let store = Store::new(AppState::default());

    store.dispatch_at(Command::AddTask { task: Task::new("قراءة الورد", 0, at(8, 0)) }, at(8, 0));
    store.dispatch_at(
        Command::AddTask {
            task: Task::new("تجهيز الإفطار", 1, at(8, 0))
                .with_filters(vec![TaskFilter::FastingDay]),
        },
        at(8, 0),
    );

    assert_eq!(store.snapshot().visible_tasks().len(), 2);

    store.dispatch_at(
        Command::SetFilters { filters: vec![TaskFilter::FastingDay] },
        at(8, 1),
    );
    let snapshot = store.snapshot();
    let visible = snapshot.visible_tasks();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "تجهيز الإفطار");
}
