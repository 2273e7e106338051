//! Block status against a clock instant
//!
//! Spans are half-open: a block is active from its start up to but not
//! including its end. The helpers taking a slice assume the order produced
//! by the partitioner, ascending by start time.

use chrono::{DateTime, Utc};
use miqat_domain::TimeBlock;
use serde::{Deserialize, Serialize};

/// Where a block stands relative to an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Upcoming,
    Active,
    Completed,
}

/// Status of a block at an instant
pub fn block_status(block: &TimeBlock, now: DateTime<Utc>) -> BlockStatus {
    if now < block.start {
        BlockStatus::Upcoming
    } else if now < block.end {
        BlockStatus::Active
    } else {
        BlockStatus::Completed
    }
}

/// Whole minutes until the block ends, rounded up; zero once it has ended
pub fn remaining_minutes(block: &TimeBlock, now: DateTime<Utc>) -> i64 {
    let ms = (block.end - now).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        // signed div_ceil is unstable; ms > 0 here so this is ceiling division
        (ms + 59_999) / 60_000
    }
}

/// First block whose span contains the instant
///
/// Overlapping spans resolve to the earliest block in the sequence.
pub fn active_block(blocks: &[TimeBlock], now: DateTime<Utc>) -> Option<&TimeBlock> {
    blocks.iter().find(|block| block.contains(now))
}

/// Next block starting strictly after the instant
pub fn next_block(blocks: &[TimeBlock], now: DateTime<Utc>) -> Option<&TimeBlock> {
    blocks.iter().find(|block| block.start > now)
}
