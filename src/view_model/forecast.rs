//! PM2.5 forecast view-model.

use tokio::sync::mpsc::UnboundedSender;

use super::fetch_state::FetchState;
use super::task::FetchTask;
use crate::app::AppMessage;
use crate::client::{DashboardClient, FORECAST_PATH};
use crate::error::FetchResult;
use crate::models::{ForecastDecode, ForecastSeries};

/// Message shown when the forecast request fails.
pub const FORECAST_ERROR_MESSAGE: &str = "Error fetching forecast data";

/// Three-way view of the forecast, separating "loaded but empty" from
/// "still loading".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForecastSignal<'a> {
    Loading,
    Empty,
    Series(&'a ForecastSeries),
    Failed(&'a str),
}

/// Owns the forecast series' fetch state.
#[derive(Debug)]
pub struct ForecastViewModel {
    client: DashboardClient,
    state: FetchState<ForecastSeries>,
    generation: u64,
    task: Option<FetchTask>,
}

impl ForecastViewModel {
    pub fn new(client: DashboardClient) -> Self {
        Self {
            client,
            state: FetchState::Loading,
            generation: 0,
            task: None,
        }
    }

    pub fn state(&self) -> &FetchState<ForecastSeries> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn signal(&self) -> ForecastSignal<'_> {
        match &self.state {
            FetchState::Loading => ForecastSignal::Loading,
            FetchState::Ready(series) if series.is_empty() => ForecastSignal::Empty,
            FetchState::Ready(series) => ForecastSignal::Series(series),
            FetchState::Failed(message) => ForecastSignal::Failed(message),
        }
    }

    /// Start a fetch. The result arrives as [`AppMessage::ForecastLoaded`].
    pub fn load(&mut self, tx: &UnboundedSender<AppMessage>) {
        self.generation += 1;
        self.state = FetchState::Loading;

        let generation = self.generation;
        let client = self.client.clone();
        let tx = tx.clone();
        tracing::debug!("Loading forecast (generation {})", generation);

        self.task = Some(FetchTask::spawn(async move {
            let result = Self::fetch(&client).await;
            let _ = tx.send(AppMessage::ForecastLoaded { generation, result });
        }));
    }

    pub fn reload(&mut self, tx: &UnboundedSender<AppMessage>) {
        self.load(tx);
    }

    pub async fn fetch(client: &DashboardClient) -> FetchResult<ForecastDecode> {
        let body = client.fetch_json(FORECAST_PATH).await?;
        Ok(ForecastSeries::from_json(&body))
    }

    /// Apply a delivered result. Returns `false` when it was stale.
    ///
    /// "No data" is not a failure: the state becomes ready with an empty
    /// series. Any fetch error collapses to [`FORECAST_ERROR_MESSAGE`].
    pub fn apply(&mut self, generation: u64, result: FetchResult<ForecastDecode>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Ignoring stale forecast result (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.task = None;

        let outcome: Result<ForecastSeries, &str> = match result {
            Ok(ForecastDecode::Series(series)) => {
                tracing::debug!("Forecast loaded with {} points", series.len());
                Ok(series)
            }
            Ok(ForecastDecode::NoData { reason }) => {
                tracing::warn!("No forecast data: {}", reason);
                Ok(ForecastSeries::default())
            }
            Err(e) => {
                tracing::error!("[{}] {}: {}", e.error_code(), FORECAST_ERROR_MESSAGE, e);
                Err(FORECAST_ERROR_MESSAGE)
            }
        };

        let state = std::mem::replace(&mut self.state, FetchState::Loading);
        self.state = state.resolve(outcome);
        tracing::debug!("Forecast is {} (generation {})", self.state.label(), generation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    const URL: &str = "http://test/api/forecast/pm25";

    async fn loaded(response: MockResponse) -> ForecastViewModel {
        let mock = MockHttpClient::new();
        mock.set_response(URL, response);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut vm =
            ForecastViewModel::new(DashboardClient::with_base_url("http://test", Arc::new(mock)));
        vm.load(&tx);

        match tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
            Ok(Some(AppMessage::ForecastLoaded { generation, result })) => {
                assert!(vm.apply(generation, result));
            }
            other => panic!("unexpected message: {:?}", other),
        }
        vm
    }

    #[tokio::test]
    async fn test_series_is_ready_in_order() {
        let vm = loaded(MockResponse::json(json!({
            "forecast": [{"ds": "2024-01-01", "yhat": 10}, {"ds": "2024-01-02", "yhat": 12}]
        })))
        .await;

        match vm.signal() {
            ForecastSignal::Series(series) => {
                let labels: Vec<&str> = series.labels().collect();
                assert_eq!(labels, vec!["2024-01-01", "2024-01-02"]);
            }
            other => panic!("unexpected signal {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_ready_empty() {
        let vm = loaded(MockResponse::json(json!({}))).await;
        assert_eq!(vm.state(), &FetchState::Ready(ForecastSeries::default()));
        assert_eq!(vm.signal(), ForecastSignal::Empty);
    }

    #[tokio::test]
    async fn test_empty_sequence_is_ready_empty() {
        let vm = loaded(MockResponse::json(json!({"forecast": []}))).await;
        assert_eq!(vm.signal(), ForecastSignal::Empty);
    }

    #[tokio::test]
    async fn test_http_error_uses_fixed_message() {
        let vm = loaded(MockResponse::status(500, "Internal Server Error")).await;
        assert_eq!(vm.signal(), ForecastSignal::Failed(FORECAST_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_network_error_uses_fixed_message() {
        let vm = loaded(MockResponse::Error(HttpError::Timeout("30s".to_string()))).await;
        assert_eq!(vm.state().failure(), Some(FORECAST_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_json_uses_fixed_message() {
        let vm = loaded(MockResponse::status(200, "not json")).await;
        assert_eq!(vm.state().failure(), Some(FORECAST_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_stale_result_is_ignored() {
        let mock = MockHttpClient::new();
        mock.set_response(URL, MockResponse::Pending);
        let (tx, _rx) = mpsc::unbounded_channel();

        let mut vm =
            ForecastViewModel::new(DashboardClient::with_base_url("http://test", Arc::new(mock)));
        vm.load(&tx);
        vm.reload(&tx);

        assert!(!vm.apply(1, Ok(ForecastDecode::Series(ForecastSeries::default()))));
        assert_eq!(vm.signal(), ForecastSignal::Loading);
        assert!(vm.is_in_flight());
    }
}
