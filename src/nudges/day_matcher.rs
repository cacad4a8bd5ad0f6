//! Active-day matching for nudge records.

use chrono::Datelike;

use super::datetime::parse_nudge_date;
use super::models::{DayFilter, NudgeRecord, Schedule};

/// Decide whether a nudge is active on the filtered days.
///
/// Recurring nudges match when their pattern intersects the selected
/// days; a missing or empty pattern never matches (fail-closed). A
/// fixed-date nudge matches when its date falls on a selected day; a
/// missing or unparseable date always matches (fail-open) so a
/// data-entry mistake shows the nudge on an unexpected day rather than
/// silently hiding it.
///
/// Never panics and never returns an error.
pub fn matches(record: &NudgeRecord, filter: &DayFilter) -> bool {
    let selected = filter.resolved_indices();

    match &record.schedule {
        Schedule::Recurring { recurrence_days } => match recurrence_days {
            Some(days) if !days.is_empty() => days.iter().any(|day| selected.contains(day)),
            _ => false,
        },
        Schedule::Scheduled { date } => {
            let Some(raw) = date else {
                return true;
            };
            match parse_nudge_date(raw) {
                Some(parsed) => {
                    let index = i64::from(parsed.weekday().num_days_from_sunday());
                    selected.contains(&index)
                }
                None => true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nudges::models::Weekday;

    fn scheduled(date: Option<&str>) -> NudgeRecord {
        NudgeRecord {
            id: "test".to_string(),
            schedule: Schedule::Scheduled {
                date: date.map(str::to_string),
            },
            created_at: None,
            subject: None,
            message: None,
            is_read: false,
        }
    }

    fn recurring(days: Option<Vec<i64>>) -> NudgeRecord {
        NudgeRecord {
            id: "test".to_string(),
            schedule: Schedule::Recurring {
                recurrence_days: days,
            },
            created_at: None,
            subject: None,
            message: None,
            is_read: false,
        }
    }

    #[test]
    fn test_recurring_matches_on_intersection() {
        // Monday and Wednesday pattern
        let record = recurring(Some(vec![1, 3]));

        assert!(matches(&record, &DayFilter::from_days([Weekday::Monday])));
        assert!(matches(
            &record,
            &DayFilter::from_days([Weekday::Sunday, Weekday::Wednesday])
        ));
        assert!(!matches(&record, &DayFilter::from_days([Weekday::Tuesday])));
    }

    #[test]
    fn test_recurring_matches_empty_filter() {
        let record = recurring(Some(vec![4]));
        assert!(matches(&record, &DayFilter::all()));
    }

    #[test]
    fn test_recurring_fails_closed_without_pattern() {
        // No pattern cannot intersect anything, even the empty filter
        assert!(!matches(&recurring(None), &DayFilter::all()));
        assert!(!matches(&recurring(Some(vec![])), &DayFilter::all()));
        assert!(!matches(
            &recurring(None),
            &DayFilter::from_days([Weekday::Monday])
        ));
        assert!(!matches(
            &recurring(Some(vec![])),
            &DayFilter::from_days([Weekday::Monday])
        ));
    }

    #[test]
    fn test_recurring_out_of_range_days_never_intersect() {
        assert!(!matches(
            &recurring(Some(vec![7, -1, 42])),
            &DayFilter::all()
        ));
        // A single valid entry is enough
        assert!(matches(
            &recurring(Some(vec![7, 2])),
            &DayFilter::from_days([Weekday::Tuesday])
        ));
    }

    #[test]
    fn test_scheduled_matches_weekday_of_date() {
        // 15-01-2024 is a Monday
        let record = scheduled(Some("15-01-2024"));

        assert!(matches(&record, &DayFilter::from_days([Weekday::Monday])));
        assert!(!matches(&record, &DayFilter::from_days([Weekday::Friday])));
        assert!(matches(&record, &DayFilter::all()));
    }

    #[test]
    fn test_scheduled_sunday_maps_to_index_zero() {
        // 14-01-2024 is a Sunday
        let record = scheduled(Some("14-01-2024"));
        assert!(matches(&record, &DayFilter::from_days([Weekday::Sunday])));
        assert!(!matches(&record, &DayFilter::from_days([Weekday::Saturday])));
    }

    #[test]
    fn test_scheduled_fails_open_on_missing_date() {
        let record = scheduled(None);
        assert!(matches(&record, &DayFilter::all()));
        assert!(matches(&record, &DayFilter::from_days([Weekday::Friday])));
    }

    #[test]
    fn test_scheduled_fails_open_on_malformed_date() {
        for raw in ["not-a-date", "31-02-2024", "2024-01-15", ""] {
            let record = scheduled(Some(raw));
            assert!(
                matches(&record, &DayFilter::from_days([Weekday::Friday])),
                "expected fail-open for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_empty_filter_is_independent_of_date_parsing() {
        // With no day restriction, fixed-date nudges match whether or not
        // their date parses
        assert!(matches(&scheduled(Some("15-01-2024")), &DayFilter::all()));
        assert!(matches(&scheduled(Some("garbage")), &DayFilter::all()));
        assert!(matches(&scheduled(None), &DayFilter::all()));
    }
}
