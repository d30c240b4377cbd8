//! Word lifecycle transitions
//!
//! Pure functions over a single `WordRecord`. A word becomes learnt from
//! repetition only when both conditions hold on a successful answer:
//! - more than `threshold - 1` correct answers, counting this one
//! - more than `threshold` days since the previous exposure
//!
//! `is_word_learnt` never goes back to false.

use chrono::{DateTime, Utc};

use super::models::{RepetitionOutcome, WordRecord};

const SECONDS_IN_DAY: f64 = 86_400.0;

/// Fractional days between two instants; negative if `later` is earlier
pub fn elapsed_days(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 1000.0 / SECONDS_IN_DAY
}

/// Apply one answer to a record
pub fn apply_repetition(
    record: &mut WordRecord,
    success: bool,
    now: DateTime<Utc>,
    threshold: u32,
) -> RepetitionOutcome {
    let since_last = elapsed_days(record.time_seen, now);

    record.history_seen = record.history_seen.saturating_add(1);
    if success {
        record.history_correct = record.history_correct.saturating_add(1);
    }
    record.time_seen = now;

    let count_met = record.history_correct > threshold.saturating_sub(1);
    let spacing_met = since_last > threshold as f64;

    let became_learnt = !record.is_word_learnt && success && count_met && spacing_met;
    if became_learnt {
        record.is_word_learnt = true;
    }

    RepetitionOutcome {
        record: record.clone(),
        became_learnt,
    }
}

/// Explicit "I already know this" override. Counters are left untouched.
pub fn apply_mark_known(record: &mut WordRecord, now: DateTime<Utc>) -> bool {
    let changed = !record.is_word_learnt;
    record.is_word_learnt = true;
    record.time_seen = now;
    changed
}
