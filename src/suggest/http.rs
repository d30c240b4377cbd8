//! HTTP client for the prediction and similarity service
//!
//! - `POST {base}/predict`    `{"text": .., "n": ..}` → `{"predictions": [..]}`
//! - `POST {base}/similarity` `{"a": .., "b": ..}`    → `{"score": 0.73 | null}`

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{NextWordPredictor, SimilarityScorer};
use crate::config::NlpConfig;
use crate::error::{Result, VocabError};

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
    n: usize,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    a: &'a str,
    b: &'a str,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    score: Option<f32>,
}

pub struct HttpNlpClient {
    client: Client,
    base_url: String,
}

impl HttpNlpClient {
    pub fn new(config: &NlpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VocabError::Nlp(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Req,
    ) -> Result<Resp> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| VocabError::Nlp(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            log::warn!("NLP request to {} returned status {}", url, response.status());
            return Err(VocabError::Nlp(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| VocabError::Nlp(format!("Invalid response from {}: {}", url, e)))
    }
}

impl NextWordPredictor for HttpNlpClient {
    fn predict_next_words(&self, text: &str, n: usize) -> Result<Vec<String>> {
        let response: PredictResponse = self.post("predict", &PredictRequest { text, n })?;
        Ok(response.predictions)
    }
}

impl SimilarityScorer for HttpNlpClient {
    fn similarity(&self, a: &str, b: &str) -> Result<Option<f32>> {
        let response: SimilarityResponse = self.post("similarity", &SimilarityRequest { a, b })?;
        Ok(response.score)
    }
}
