use std::fmt;

use chrono::{DateTime, Utc};
use cowin::{CalendarQuery, CowinClient};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::filter::filter_centers;
use crate::notifier::SlotNotifier;
use crate::scan_types::*;

/// Stages a single check moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    /// Nothing done yet
    Idle,
    /// Query built from the request
    QueryBuilt,
    /// Calendar fetched from the API
    Fetched,
    /// Eligible centers selected
    Filtered,
    /// Notification sent
    Notified,
    /// Finished successfully
    Done,
    /// A stage failed; terminal
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Summary of a successful check
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Final state, always [`RunState::Done`]
    pub state: RunState,
    /// Number of centers in the notification
    pub centers: usize,
    /// Number of eligible sessions across those centers
    pub sessions: usize,
    /// Message id reported by the email service
    pub message_id: String,
    /// When the check finished
    pub checked_at: DateTime<Utc>,
}

/// Runs one request through query, fetch, filter and notify
pub struct SlotChecker {
    client: CowinClient,
    notifier: SlotNotifier,
}

impl SlotChecker {
    /// Create a checker from its collaborators
    pub fn new(client: CowinClient, notifier: SlotNotifier) -> Self {
        Self { client, notifier }
    }

    /// Query, fetch and filter without notifying.
    pub async fn check(&self, request: &RequestSpec) -> Result<Vec<FilteredCenter>, SlotError> {
        let mut state = RunState::Idle;
        self.collect(request, &mut state).await
    }

    /// Run the full pipeline. Any stage failure ends the run; nothing is retried and
    /// nothing is sent unless every earlier stage succeeded.
    pub async fn run(&self, request: &RequestSpec) -> Result<RunReport, SlotError> {
        let mut state = RunState::Idle;

        match self.run_stages(request, &mut state).await {
            Ok(report) => Ok(report),
            Err(e) => {
                let reached = fail(&mut state);
                error!("Slot check {} after {}: {}", state, reached, e);
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        request: &RequestSpec,
        state: &mut RunState,
    ) -> Result<RunReport, SlotError> {
        let centers = self.collect(request, state).await?;

        let message_id = self
            .notifier
            .notify(&centers, request.recipient.as_deref())
            .await?;
        advance(state, RunState::Notified);

        let report = RunReport {
            state: RunState::Done,
            centers: centers.len(),
            sessions: centers.iter().map(|c| c.sessions.len()).sum(),
            message_id,
            checked_at: Utc::now(),
        };
        advance(state, RunState::Done);

        info!(
            "Notified {} sessions across {} centers",
            report.sessions, report.centers
        );

        Ok(report)
    }

    async fn collect(
        &self,
        request: &RequestSpec,
        state: &mut RunState,
    ) -> Result<Vec<FilteredCenter>, SlotError> {
        let query = CalendarQuery::from_location(request.location, request.date);
        advance(state, RunState::QueryBuilt);

        let response = self.client.fetch(&query).await?;
        advance(state, RunState::Fetched);
        debug!("API returned {} centers", response.centers.len());

        let centers = filter_centers(response.centers, request.age_group(), request.vaccine)?;
        advance(state, RunState::Filtered);

        Ok(centers)
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!("Slot check {} -> {}", state, next);
    *state = next;
}

// Moves to Failed and returns the last stage that completed.
fn fail(state: &mut RunState) -> RunState {
    let reached = *state;
    advance(state, RunState::Failed);
    reached
}
