//! Nudge service for creating nudges and serving paged views.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::NudgeSettings;

use super::datetime::CREATED_AT_FORMAT;
use super::models::{DayFilter, NudgeRecord, PageRequest, Schedule};
use super::selector::{select_recent, select_recurring};
use super::store::NudgeStore;

/// Service wiring the nudge store to the selection logic.
///
/// Reads load a snapshot from the store and delegate to the pure
/// selectors; the service itself holds no state across calls.
pub struct NudgeService {
    store: Arc<dyn NudgeStore>,
    settings: NudgeSettings,
}

impl NudgeService {
    pub fn new(store: Arc<dyn NudgeStore>, settings: NudgeSettings) -> Self {
        Self { store, settings }
    }

    /// Create a one-off nudge pinned to a calendar date.
    ///
    /// The date string is stored as given; read-side leniency decides
    /// what to do with a malformed value.
    pub fn schedule_nudge(
        &self,
        client_id: &str,
        subject: &str,
        message: Option<String>,
        date: &str,
    ) -> Result<NudgeRecord> {
        let record = self.new_record(
            subject,
            message,
            Schedule::Scheduled {
                date: Some(date.to_string()),
            },
        );
        self.store.create_nudge(client_id, record.clone())?;
        debug!("Scheduled nudge {} for client {}", record.id, client_id);
        Ok(record)
    }

    /// Create a weekly-recurring nudge active on the given weekday
    /// indices (0 = Sunday .. 6 = Saturday).
    pub fn schedule_recurring(
        &self,
        client_id: &str,
        subject: &str,
        message: Option<String>,
        recurrence_days: Vec<i64>,
    ) -> Result<NudgeRecord> {
        if recurrence_days.is_empty() {
            warn!(
                "Recurring nudge for client {} has no pattern and will never show",
                client_id
            );
        } else if recurrence_days.iter().any(|day| !(0..=6).contains(day)) {
            warn!(
                "Recurrence pattern for client {} contains out-of-range days: {:?}",
                client_id, recurrence_days
            );
        }

        let record = self.new_record(
            subject,
            message,
            Schedule::Recurring {
                recurrence_days: Some(recurrence_days),
            },
        );
        self.store.create_nudge(client_id, record.clone())?;
        debug!(
            "Scheduled recurring nudge {} for client {}",
            record.id, client_id
        );
        Ok(record)
    }

    /// Serve a page of the fixed-date oriented view (newest first).
    ///
    /// When `limit` is None the default page limit from settings applies.
    pub fn recent_page(
        &self,
        client_id: &str,
        filter: &DayFilter,
        page: usize,
        limit: Option<usize>,
    ) -> Result<Vec<NudgeRecord>> {
        let snapshot = self.store.get_client_nudges(client_id)?;
        Ok(select_recent(&snapshot, filter, &self.page_request(page, limit)))
    }

    /// Serve a page of the weekly-pattern oriented view (collection order).
    pub fn recurring_page(
        &self,
        client_id: &str,
        filter: &DayFilter,
        page: usize,
        limit: Option<usize>,
    ) -> Result<Vec<NudgeRecord>> {
        let snapshot = self.store.get_client_nudges(client_id)?;
        Ok(select_recurring(
            &snapshot,
            filter,
            &self.page_request(page, limit),
        ))
    }

    /// Mark a nudge as read.
    /// Returns Ok(None) if the nudge doesn't exist or belongs to another client.
    pub fn mark_read(&self, client_id: &str, nudge_id: &str) -> Result<Option<NudgeRecord>> {
        self.store.mark_nudge_read(client_id, nudge_id)
    }

    /// Count of unread nudges for a client.
    pub fn unread_count(&self, client_id: &str) -> Result<usize> {
        self.store.get_unread_count(client_id)
    }

    fn page_request(&self, page: usize, limit: Option<usize>) -> PageRequest {
        PageRequest::new(page, limit.unwrap_or(self.settings.default_page_limit))
    }

    fn new_record(&self, subject: &str, message: Option<String>, schedule: Schedule) -> NudgeRecord {
        NudgeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            schedule,
            created_at: Some(chrono::Utc::now().format(CREATED_AT_FORMAT).to_string()),
            subject: Some(subject.to_string()),
            message,
            is_read: false,
        }
    }
}
