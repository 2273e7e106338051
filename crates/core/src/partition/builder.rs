//! Block partitioner - turns one day's prayer times into the block timeline
//!
//! Each prayer anchors a prayer block with a fixed duration taken from the
//! block policy. The gap between a block's end and the next prayer becomes an
//! interstitial block when it exceeds the configured threshold; shorter gaps
//! are absorbed without a block of their own. The sequence wraps: the
//! boundary after the last prayer is the first prayer shifted forward by 24
//! hours.

use chrono::{DateTime, Duration, Utc};
use miqat_domain::l10n::{self, Language};
use miqat_domain::{
    BlockConfig, BlockKind, MiqatError, PrayerKind, PrayerTimes, RawPrayerTimes, Result, TimeBlock,
};
use tracing::debug;
use uuid::Uuid;

/// Partitions a day's prayer times into prayer and interstitial blocks
#[derive(Debug)]
pub struct BlockPartitioner {
    config: BlockConfig,
    language: Language,
}

impl BlockPartitioner {
    /// Create a partitioner with the given block policy
    ///
    /// Fails with a `Validation` error when the policy carries a
    /// non-positive block duration or a negative gap threshold.
    pub fn new(config: BlockConfig) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self { config, language: Language::default() })
    }

    /// Switch the language used for block titles
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Partition one day's prayer times into an ordered block sequence
    ///
    /// Total over validated input: every `PrayerTimes` yields a sequence
    /// with exactly one prayer block per entry, sorted by start time. Block
    /// ids are regenerated on every call; everything else is deterministic.
    pub fn partition(&self, times: &PrayerTimes) -> Vec<TimeBlock> {
        // 1. Collect entries and sort chronologically. The sort is stable,
        //    so entries sharing a timestamp keep their insertion order and
        //    both produce blocks.
        let mut entries = times.entries();
        entries.sort_by_key(|&(_, start)| start);

        let threshold = Duration::minutes(self.config.min_interstitial_gap_mins);
        let mut blocks = Vec::with_capacity(entries.len() * 2);

        // 2. Walk the entries. Each prayer anchors a fixed-duration block.
        //    The boundary after the last prayer wraps to the first prayer
        //    plus 24 hours.
        for (index, &(kind, start)) in entries.iter().enumerate() {
            let (next_kind, boundary) = match entries.get(index + 1) {
                Some(&(next_kind, next_start)) => (next_kind, next_start),
                None => (entries[0].0, entries[0].1 + Duration::hours(24)),
            };

            let mut end = start + Duration::minutes(self.config.duration_mins(kind));
            // Overlapping the next prayer is left in place unless trimming
            // is enabled. Entries sharing a timestamp are never trimmed;
            // every emitted block keeps a positive duration.
            if self.config.trim_overlaps && boundary > start {
                end = end.min(boundary);
            }

            blocks.push(self.prayer_block(kind, start, end));

            // 3. Emit an interstitial block only when the remaining gap
            //    exceeds the threshold. Shorter or negative gaps are
            //    absorbed silently.
            if boundary - end > threshold {
                blocks.push(self.interstitial_block(kind, next_kind, end, boundary));
            }
        }

        debug!("partitioned {} blocks from {} prayer entries", blocks.len(), entries.len());
        blocks
    }

    /// Validate raw schedule data, then partition
    pub fn partition_raw(&self, raw: RawPrayerTimes) -> Result<Vec<TimeBlock>> {
        let times = PrayerTimes::from_raw(raw)?;
        Ok(self.partition(&times))
    }

    fn prayer_block(
        &self,
        kind: PrayerKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TimeBlock {
        TimeBlock {
            id: Uuid::now_v7().to_string(),
            kind: BlockKind::Prayer,
            title: l10n::prayer_block_title(kind, self.language),
            symbol: BlockKind::Prayer.symbol(),
            prayer: Some(kind),
            start,
            end,
        }
    }

    fn interstitial_block(
        &self,
        before: PrayerKind,
        after: PrayerKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TimeBlock {
        TimeBlock {
            id: Uuid::now_v7().to_string(),
            kind: BlockKind::Interstitial,
            title: l10n::interstitial_block_title(before, after, self.language),
            symbol: BlockKind::Interstitial.symbol(),
            prayer: None,
            start,
            end,
        }
    }
}

fn validate_config(config: &BlockConfig) -> Result<()> {
    let durations = [
        config.qiyam_block_mins,
        config.fajr_block_mins,
        config.maghrib_block_mins,
        config.default_block_mins,
    ];
    if durations.iter().any(|&mins| mins <= 0) {
        return Err(MiqatError::Validation("block durations must be positive".to_string()));
    }
    if config.min_interstitial_gap_mins < 0 {
        return Err(MiqatError::Validation(
            "interstitial gap threshold cannot be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use miqat_domain::constants::MIN_INTERSTITIAL_GAP_MINS;

    use super::*;

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

    fn prayer_blocks(blocks: &[TimeBlock]) -> Vec<&TimeBlock> {
        blocks.iter().filter(|b| b.kind == BlockKind::Prayer).collect()
    }

    #[test]
    fn test_five_prayer_day_block_sequence() {
        // AC: dhuhr occupies 12:30-13:15 and the 150 minute gap to asr
        // becomes an interstitial block
        let blocks = partitioner().partition(&mock_times());

        let prayers = prayer_blocks(&blocks);
        assert_eq!(prayers.len(), 5);
        let kinds: Vec<_> = prayers.iter().filter_map(|b| b.prayer).collect();
        assert_eq!(
            kinds,
            vec![
                PrayerKind::Fajr,
                PrayerKind::Dhuhr,
                PrayerKind::Asr,
                PrayerKind::Maghrib,
                PrayerKind::Isha,
            ]
        );

        let dhuhr = prayers[1];
        assert_eq!(dhuhr.start, at(12, 30));
        assert_eq!(dhuhr.end, at(13, 15));

        let after_dhuhr = blocks
            .iter()
            .find(|b| b.kind == BlockKind::Interstitial && b.start == at(13, 15))
            .unwrap();
        assert_eq!(after_dhuhr.end, at(15, 45));

        // AC: asr ends 16:30 and the 105 minute gap to maghrib becomes an
        // interstitial block
        let after_asr = blocks
            .iter()
            .find(|b| b.kind == BlockKind::Interstitial && b.start == at(16, 30))
            .unwrap();
        assert_eq!(after_asr.end, at(18, 15));
    }

    #[test]
    fn test_qiyam_sorts_first_when_early() {
        // AC: a qiyam entry in the early hours leads the sequence
        let times = mock_times().with_qiyam(at(2, 30));
        let blocks = partitioner().partition(&times);

        assert_eq!(blocks[0].prayer, Some(PrayerKind::Qiyam));
        assert_eq!(blocks[0].start, at(2, 30));
        assert_eq!(blocks[0].end, at(4, 0));

        // 90 minute gap from qiyam's end to fajr becomes an interstitial
        assert_eq!(blocks[1].kind, BlockKind::Interstitial);
        assert_eq!(blocks[1].start, at(4, 0));
        assert_eq!(blocks[1].end, at(5, 30));
    }

    #[test]
    fn test_without_qiyam_exactly_five_prayer_blocks() {
        // AC: a schedule without qiyam partitions into exactly five prayer
        // blocks and no error
        let blocks = partitioner().partition(&mock_times());
        assert_eq!(prayer_blocks(&blocks).len(), 5);

        let times = mock_times().with_qiyam(at(2, 30));
        let blocks = partitioner().partition(&times);
        assert_eq!(prayer_blocks(&blocks).len(), 6);
    }

    #[test]
    fn test_wrap_boundary_is_first_prayer_next_day() {
        // AC: the trailing interstitial ends at the first prayer shifted by
        // 24 hours
        let blocks = partitioner().partition(&mock_times());
        let last = blocks.last().unwrap();
        assert_eq!(last.kind, BlockKind::Interstitial);
        assert_eq!(last.start, at(20, 30));
        assert_eq!(last.end, at(5, 30) + Duration::hours(24));

        // With qiyam present the wrap target is qiyam plus 24 hours
        let times = mock_times().with_qiyam(at(2, 30));
        let blocks = partitioner().partition(&times);
        let last = blocks.last().unwrap();
        assert_eq!(last.end, at(2, 30) + Duration::hours(24));
    }

    #[test]
    fn test_gap_at_threshold_absorbed() {
        // AC: a gap of exactly the threshold produces no interstitial block
        let gap = Duration::minutes(MIN_INTERSTITIAL_GAP_MINS);
        let times = PrayerTimes {
            // maghrib block ends 18:45; isha at 19:15 leaves exactly 30 min
            isha: at(18, 45) + gap,
            ..mock_times()
        };
        let blocks = partitioner().partition(&times);

        let maghrib_index =
            blocks.iter().position(|b| b.prayer == Some(PrayerKind::Maghrib)).unwrap();
        assert_eq!(blocks[maghrib_index + 1].prayer, Some(PrayerKind::Isha));
    }

    #[test]
    fn test_gap_just_above_threshold_emitted() {
        let gap = Duration::minutes(MIN_INTERSTITIAL_GAP_MINS + 1);
        let times = PrayerTimes { isha: at(18, 45) + gap, ..mock_times() };
        let blocks = partitioner().partition(&times);

        let maghrib_index =
            blocks.iter().position(|b| b.prayer == Some(PrayerKind::Maghrib)).unwrap();
        let between = &blocks[maghrib_index + 1];
        assert_eq!(between.kind, BlockKind::Interstitial);
        assert_eq!(between.start, at(18, 45));
        assert_eq!(between.end, at(19, 16));
    }

    #[test]
    fn test_identical_times_both_emitted() {
        // AC: two prayers sharing a timestamp both keep their blocks
        let times = PrayerTimes { asr: at(12, 30), ..mock_times() };
        let blocks = partitioner().partition(&times);

        let tied: Vec<_> = prayer_blocks(&blocks).into_iter().filter(|b| b.start == at(12, 30)).collect();
        assert_eq!(tied.len(), 2);
        assert_eq!(prayer_blocks(&blocks).len(), 5);
    }

    #[test]
    fn test_overlap_preserved_by_default() {
        // AC: a fixed duration running past the next prayer is left in
        // place when trimming is off
        let times = PrayerTimes { maghrib: at(16, 0), ..mock_times() };
        let blocks = partitioner().partition(&times);

        let asr = blocks.iter().find(|b| b.prayer == Some(PrayerKind::Asr)).unwrap();
        let maghrib = blocks.iter().find(|b| b.prayer == Some(PrayerKind::Maghrib)).unwrap();
        assert_eq!(asr.end, at(16, 30));
        assert!(asr.end > maghrib.start);
    }

    #[test]
    fn test_trim_overlaps_clamps_to_next_start() {
        let config = BlockConfig { trim_overlaps: true, ..BlockConfig::default() };
        let builder = BlockPartitioner::new(config).unwrap();
        let times = PrayerTimes { maghrib: at(16, 0), ..mock_times() };
        let blocks = builder.partition(&times);

        let asr = blocks.iter().find(|b| b.prayer == Some(PrayerKind::Asr)).unwrap();
        assert_eq!(asr.end, at(16, 0));
    }

    #[test]
    fn test_trim_overlaps_keeps_tied_blocks_full() {
        // Trimming against an identical start would empty the block, so
        // tied entries keep their configured duration
        let config = BlockConfig { trim_overlaps: true, ..BlockConfig::default() };
        let builder = BlockPartitioner::new(config).unwrap();
        let times = PrayerTimes { asr: at(12, 30), ..mock_times() };
        let blocks = builder.partition(&times);

        for block in prayer_blocks(&blocks).into_iter().filter(|b| b.start == at(12, 30)) {
            assert_eq!(block.end, at(13, 15));
        }
    }

    #[test]
    fn test_blocks_sorted_with_positive_spans() {
        // AC: output is ordered by start time and every block has start
        // strictly before end
        let times = mock_times().with_qiyam(at(2, 30));
        let blocks = partitioner().partition(&times);

        for window in blocks.windows(2) {
            assert!(window[0].start <= window[1].start);
        }
        for block in &blocks {
            assert!(block.start < block.end, "empty block: {}", block.title);
        }
    }

    #[test]
    fn test_partition_is_structurally_idempotent() {
        // AC: repeated runs over the same input produce the same shape;
        // only the generated ids differ
        let builder = partitioner();
        let times = mock_times().with_qiyam(at(2, 30));

        let first = builder.partition(&times);
        let second = builder.partition(&times);

        let shape =
            |blocks: &[TimeBlock]| -> Vec<(BlockKind, String, DateTime<Utc>, DateTime<Utc>)> {
                blocks.iter().map(|b| (b.kind, b.title.clone(), b.start, b.end)).collect()
            };
        assert_eq!(shape(&first), shape(&second));
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_titles_localized() {
        let blocks = partitioner().partition(&mock_times());
        let fajr = blocks.iter().find(|b| b.prayer == Some(PrayerKind::Fajr)).unwrap();
        assert_eq!(fajr.title, "فترة صلاة فجر");
        assert_eq!(fajr.symbol, '●');

        let english = partitioner().with_language(Language::En);
        let blocks = english.partition(&mock_times());
        let fajr = blocks.iter().find(|b| b.prayer == Some(PrayerKind::Fajr)).unwrap();
        assert_eq!(fajr.title, "Fajr prayer");
        let between = blocks.iter().find(|b| b.start == at(13, 15)).unwrap();
        assert_eq!(between.title, "Between Dhuhr and Asr");
        assert_eq!(between.symbol, '○');
    }

    #[test]
    fn test_rejects_non_positive_durations() {
        let config = BlockConfig { default_block_mins: 0, ..BlockConfig::default() };
        let err = BlockPartitioner::new(config).unwrap_err();
        assert!(matches!(err, MiqatError::Validation(_)));

        let config = BlockConfig { min_interstitial_gap_mins: -1, ..BlockConfig::default() };
        assert!(BlockPartitioner::new(config).is_err());
    }

    #[test]
    fn test_partition_raw_reports_missing_field() {
        let raw = RawPrayerTimes {
            fajr: Some(at(5, 30)),
            dhuhr: Some(at(12, 30)),
            asr: Some(at(15, 45)),
            maghrib: Some(at(18, 15)),
            isha: None,
            qiyam: None,
        };
        let err = partitioner().partition_raw(raw).unwrap_err();
        assert!(matches!(err, MiqatError::Validation(ref msg) if msg.contains("isha")));
    }

    proptest::proptest! {
        #[test]
        fn partition_structure_holds_for_arbitrary_days(
            offsets in proptest::collection::btree_set(0i64..86_400, 5),
            qiyam_offset in proptest::option::of(0i64..86_400),
            trim in proptest::bool::ANY,
        ) {
            let base = Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap();
            let offsets: Vec<i64> = offsets.into_iter().collect();
            let times = PrayerTimes {
                fajr: base + Duration::seconds(offsets[0]),
                dhuhr: base + Duration::seconds(offsets[1]),
                asr: base + Duration::seconds(offsets[2]),
                maghrib: base + Duration::seconds(offsets[3]),
                isha: base + Duration::seconds(offsets[4]),
                qiyam: qiyam_offset.map(|secs| base + Duration::seconds(secs)),
            };

            let config = BlockConfig { trim_overlaps: trim, ..BlockConfig::default() };
            let builder = BlockPartitioner::new(config).unwrap();
            let blocks = builder.partition(&times);

            let prayer_count = blocks.iter().filter(|b| b.kind == BlockKind::Prayer).count();
            assert_eq!(prayer_count, times.entries().len());

            for block in &blocks {
                assert!(block.start < block.end, "empty block span");
            }
            for window in blocks.windows(2) {
                assert!(window[0].start <= window[1].start, "out of order");
                let gap = window[1].start - window[0].end;
                assert!(
                    gap <= Duration::minutes(MIN_INTERSTITIAL_GAP_MINS),
                    "uncovered gap above threshold: {gap}"
                );
            }

            let shape =
                |bs: &[TimeBlock]| bs.iter().map(|b| (b.kind, b.start, b.end)).collect::<Vec<_>>();
            assert_eq!(shape(&blocks), shape(&builder.partition(&times)));
        }
    }
}
