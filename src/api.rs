// API client module: a small blocking HTTP client that sends one headline
// to the zero-shot classification endpoint and decodes the per-topic
// scores. One request per call, no retries, nothing cached between calls.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// One topic label with the model's confidence for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Expected in `[0, 1]`; not validated.
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Prediction {
            label: label.into(),
            score,
        }
    }
}

/// Everything that can go wrong between sending a headline and holding a
/// usable prediction set.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The request never completed: DNS, refused connection, timeout.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HF error {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Success status, but the body is not JSON at all.
    #[error("reply is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// Valid JSON that is not a non-empty list of label/score objects over
    /// the candidate topics. Carries the raw body for display.
    #[error("unexpected reply: {payload}")]
    Unexpected { payload: String },
}

/// Anything that can turn a headline into a prediction set. The interactive
/// loop only depends on this, so tests can script replies.
pub trait Classify {
    fn classify(&self, headline: &str) -> Result<Vec<Prediction>, ClassifyError>;
}

/// Request body understood by the inference API.
#[derive(Serialize, Debug)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: Parameters<'a>,
}

#[derive(Serialize, Debug)]
struct Parameters<'a> {
    candidate_labels: &'a [String],
}

/// Reply shapes we know how to read. Older pipeline deployments answer with
/// parallel `labels`/`scores` arrays instead of a list of objects.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Reply {
    Ranked(Vec<Prediction>),
    Parallel { labels: Vec<String>, scores: Vec<f64> },
}

/// Blocking client bound to one model endpoint and one topic set.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    topics: Vec<String>,
}

impl ApiClient {
    /// Build a client from the resolved configuration. The request timeout
    /// is applied to every call made through this client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
            topics: config.topics.clone(),
        })
    }
}

impl Classify for ApiClient {
    fn classify(&self, headline: &str) -> Result<Vec<Prediction>, ClassifyError> {
        let payload = ClassifyRequest {
            inputs: headline,
            parameters: Parameters {
                candidate_labels: &self.topics,
            },
        };
        debug!(endpoint = %self.endpoint, headline, "sending classification request");

        // An unusable credential is rejected by reqwest at send time, so it
        // comes back as a transport failure rather than a panic here.
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(ClassifyError::Transport)?;

        let status = res.status();
        let body = res.text().map_err(ClassifyError::Transport)?;
        debug!(%status, bytes = body.len(), "classification reply received");

        if !status.is_success() {
            return Err(ClassifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        parse_reply(&body, &self.topics)
    }
}

/// Decode a success body into a prediction set over `topics`.
///
/// The set keeps the server's order. An empty set, a label outside `topics`
/// or any other JSON shape is reported as [`ClassifyError::Unexpected`].
pub fn parse_reply(body: &str, topics: &[String]) -> Result<Vec<Prediction>, ClassifyError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(ClassifyError::Decode)?;
    let unexpected = || {
        warn!(payload = body, "unexpected classification reply");
        ClassifyError::Unexpected {
            payload: body.trim().to_string(),
        }
    };

    let predictions = match serde_json::from_value::<Reply>(value) {
        Ok(Reply::Ranked(predictions)) => predictions,
        Ok(Reply::Parallel { labels, scores }) if labels.len() == scores.len() => labels
            .into_iter()
            .zip(scores)
            .map(|(label, score)| Prediction { label, score })
            .collect(),
        _ => return Err(unexpected()),
    };

    if predictions.is_empty() || predictions.iter().any(|p| !topics.contains(&p.label)) {
        return Err(unexpected());
    }
    Ok(predictions)
}
