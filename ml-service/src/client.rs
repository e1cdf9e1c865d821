//! HTTP client for the service
//!
//! Batch prediction checks that the service answered once per submitted
//! transaction; a short or long answer is an error, never silently padded.

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    AmountInput, AnomalyRequest, AnomalyResponse, BatchPredictRequest, BatchPredictResponse, HealthResponse,
    PredictionResponse, TransactionInput,
};

const PATH_HEALTH: &str = "/health";
const PATH_PREDICT_BATCH: &str = "/predict-batch";
const PATH_DETECT_ANOMALIES: &str = "/detect-anomalies";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("sent {expected} transactions but received {actual} predictions")]
    CountMismatch { expected: usize, actual: usize },
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    http: HttpClient,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, HttpClient::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: HttpClient) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self.http.get(self.url_for(PATH_HEALTH)).send().await?;
        parse(response).await
    }

    /// One prediction per transaction, in submission order
    pub async fn predict_batch(&self, transactions: &[TransactionInput]) -> ClientResult<Vec<PredictionResponse>> {
        let request = BatchPredictRequest {
            transactions: transactions.to_vec(),
        };
        let response: BatchPredictResponse = self.post(PATH_PREDICT_BATCH, &request).await?;

        if response.predictions.len() != transactions.len() {
            return Err(ClientError::CountMismatch {
                expected: transactions.len(),
                actual: response.predictions.len(),
            });
        }

        Ok(response.predictions)
    }

    pub async fn detect_anomalies(
        &self,
        transactions: &[AmountInput],
        history: &[AmountInput],
    ) -> ClientResult<AnomalyResponse> {
        let request = AnomalyRequest {
            transactions: transactions.to_vec(),
            history: history.to_vec(),
        };
        self.post(PATH_DETECT_ANOMALIES, &request).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.http.post(self.url_for(path)).json(body).send().await?;
        parse(response).await
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn parse<R: DeserializeOwned>(response: reqwest::Response) -> ClientResult<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Service responded {} : {}", status, body);
        return Err(ClientError::Service {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}
