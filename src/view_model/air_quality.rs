//! Air-quality view-model.

use tokio::sync::mpsc::UnboundedSender;

use super::fetch_state::FetchState;
use super::task::FetchTask;
use crate::app::AppMessage;
use crate::client::{DashboardClient, AIR_QUALITY_PATH};
use crate::error::FetchResult;
use crate::models::AirQualityReading;

/// Owns the current reading's fetch state.
#[derive(Debug)]
pub struct AirQualityViewModel {
    client: DashboardClient,
    state: FetchState<AirQualityReading>,
    /// Bumped on every load; results carrying an older value are dropped
    generation: u64,
    task: Option<FetchTask>,
}

impl AirQualityViewModel {
    pub fn new(client: DashboardClient) -> Self {
        Self {
            client,
            state: FetchState::Loading,
            generation: 0,
            task: None,
        }
    }

    pub fn state(&self) -> &FetchState<AirQualityReading> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a spawned fetch has not delivered its result.
    pub fn is_in_flight(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start a fetch. The result arrives as [`AppMessage::AirQualityLoaded`].
    ///
    /// Any fetch still in flight is aborted.
    pub fn load(&mut self, tx: &UnboundedSender<AppMessage>) {
        self.generation += 1;
        self.state = FetchState::Loading;

        let generation = self.generation;
        let client = self.client.clone();
        let tx = tx.clone();
        tracing::debug!("Loading air quality (generation {})", generation);

        self.task = Some(FetchTask::spawn(async move {
            let result = Self::fetch(&client).await;
            let _ = tx.send(AppMessage::AirQualityLoaded { generation, result });
        }));
    }

    /// Refresh entry point; same as [`load`](Self::load).
    pub fn reload(&mut self, tx: &UnboundedSender<AppMessage>) {
        self.load(tx);
    }

    /// Fetch and decode one reading.
    pub async fn fetch(client: &DashboardClient) -> FetchResult<AirQualityReading> {
        let body = client.fetch_json(AIR_QUALITY_PATH).await?;
        Ok(AirQualityReading::from_json(&body)?)
    }

    /// Apply a delivered result. Returns `false` when it was stale.
    pub fn apply(&mut self, generation: u64, result: FetchResult<AirQualityReading>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Ignoring stale air quality result (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.task = None;

        match &result {
            Ok(reading) => {
                let missing = reading.missing_fields();
                if !missing.is_empty() {
                    tracing::debug!("Air quality reading missing fields: {:?}", missing);
                }
            }
            Err(e) => {
                tracing::error!("[{}] Error fetching air quality data: {}", e.error_code(), e);
            }
        }

        let state = std::mem::replace(&mut self.state, FetchState::Loading);
        self.state = state.resolve(result);
        tracing::debug!("Air quality is {} (generation {})", self.state.label(), generation);
        true
    }
}
