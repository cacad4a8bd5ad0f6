//! Paged selection of active nudges.
//!
//! Two read paths share the day-matching step but order differently:
//! fixed-date views sort by parsed creation timestamp (newest first),
//! recurring views keep the collection order since creation time is
//! meaningless for a repeating weekly item.
//!
//! Both are pure functions over the snapshot they are given: no I/O, no
//! mutation, identical output for identical input.

use super::datetime::created_at_sort_key;
use super::day_matcher::matches;
use super::models::{DayFilter, NudgeRecord, PageRequest};

/// Select the requested page of nudges for a fixed-date oriented view.
///
/// Surviving records are ordered by parsed `createdAt` descending;
/// unparseable timestamps sort as the epoch (oldest), ties keep their
/// relative input order. A page past the end yields an empty vec, not
/// an error.
pub fn select_recent(
    records: &[NudgeRecord],
    filter: &DayFilter,
    page: &PageRequest,
) -> Vec<NudgeRecord> {
    let mut keyed: Vec<_> = records
        .iter()
        .filter(|record| matches(record, filter))
        .map(|record| (created_at_sort_key(record.created_at.as_deref()), record))
        .collect();

    // Stable sort, newest first
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    paginate(keyed.into_iter().map(|(_, record)| record), page)
}

/// Select the requested page of nudges for a weekly-pattern oriented view.
///
/// No timestamp sort: records stay in their original collection order.
pub fn select_recurring(
    records: &[NudgeRecord],
    filter: &DayFilter,
    page: &PageRequest,
) -> Vec<NudgeRecord> {
    paginate(
        records.iter().filter(|record| matches(record, filter)),
        page,
    )
}

fn paginate<'a, I>(records: I, page: &PageRequest) -> Vec<NudgeRecord>
where
    I: Iterator<Item = &'a NudgeRecord>,
{
    records
        .skip(page.start())
        .take(page.limit)
        .cloned()
        .collect()
}
