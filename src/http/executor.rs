use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderValue, PRAGMA};
use reqwest::{Client, Method, Request, StatusCode, Url};
use tokio::time::Instant;
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::RequestOutcome;
use crate::payload::{JSON_CONTENT_TYPE, PayloadSource};

pub const TIMEOUT_ERROR: &str = "Timeout";
pub const CONNECTION_ERROR: &str = "ConnectionError";
pub const TRANSPORT_ERROR: &str = "TransportError";
pub const BODY_READ_ERROR: &str = "BodyReadError";

const NO_CACHE: &str = "no-cache";

/// POST body and the media type it is sent as.
#[derive(Debug, Clone)]
pub struct RequestBody {
    pub bytes: Bytes,
    pub content_type: HeaderValue,
}

/// One request of the run, built right before dispatch.
#[derive(Debug, Clone)]
pub struct RequestTask {
    pub index: usize,
    pub url: Url,
    pub body: Option<RequestBody>,
    pub authorization: Option<HeaderValue>,
}

/// Everything needed to build task `i` of the run.
#[derive(Debug, Clone)]
pub struct TaskPlan {
    url: Url,
    payloads: PayloadSource,
    authorization: Option<HeaderValue>,
    total: usize,
}

impl TaskPlan {
    /// # Errors
    ///
    /// Returns an error when the bearer token cannot be sent as a header value.
    pub fn new(
        url: Url,
        payloads: PayloadSource,
        bearer_token: Option<&str>,
        total: usize,
    ) -> AppResult<Self> {
        let authorization = bearer_token
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {}", token.trim())).map(|mut value| {
                    value.set_sensitive(true);
                    value
                })
            })
            .transpose()
            .map_err(|err| AppError::http(HttpError::InvalidBearerToken { source: err }))?;
        Ok(Self {
            url,
            payloads,
            authorization,
            total,
        })
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn payloads(&self) -> &PayloadSource {
        &self.payloads
    }

    #[must_use]
    pub fn task(&self, index: usize) -> RequestTask {
        RequestTask {
            index,
            url: self.url.clone(),
            body: self
                .payloads
                .payload_for(index)
                .map(|payload| RequestBody {
                    bytes: payload.body.clone(),
                    content_type: HeaderValue::from_static(JSON_CONTENT_TYPE),
                }),
            authorization: self.authorization.clone(),
        }
    }
}

/// Sends tasks over a shared client. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Sends one task and classifies the result. Never fails: transport
    /// errors become failed outcomes.
    pub async fn execute(&self, task: RequestTask) -> RequestOutcome {
        let index = task.index;
        let request = match self.build_request(task) {
            Ok(request) => request,
            Err(err) => {
                debug!("Request {} could not be built: {}", index, err);
                return RequestOutcome::failure(index, Duration::ZERO, TRANSPORT_ERROR, None);
            }
        };

        let start = Instant::now();
        let sent = self.client.execute(request).await;
        let latency = start.elapsed();

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                debug!("Request {} failed: {}", index, err);
                return RequestOutcome::failure(index, latency, transport_label(&err), None);
            }
        };

        let status = response.status();
        let body_start = Instant::now();
        let drained = drain_response_body(response).await;
        let body_time = body_start.elapsed();

        let outcome = match drained {
            Ok(bytes) if status.is_success() => RequestOutcome::success(index, latency, Some(bytes)),
            Ok(bytes) => RequestOutcome::failure(index, latency, status_label(status), Some(bytes)),
            Err(err) => {
                debug!("Request {} body read failed: {}", index, err);
                let reason = if status.is_success() {
                    BODY_READ_ERROR.to_owned()
                } else {
                    status_label(status)
                };
                RequestOutcome::failure(index, latency, reason, None)
            }
        };
        outcome.with_body_time(body_time)
    }

    fn build_request(&self, task: RequestTask) -> Result<Request, reqwest::Error> {
        let method = if task.body.is_some() {
            Method::POST
        } else {
            Method::GET
        };
        let mut builder = self
            .client
            .request(method, task.url)
            .header(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE))
            .header(PRAGMA, HeaderValue::from_static(NO_CACHE));
        if let Some(body) = task.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.bytes);
        }
        let mut request = builder.build()?;
        if let Some(authorization) = task.authorization {
            request.headers_mut().insert(AUTHORIZATION, authorization);
        }
        Ok(request)
    }
}

/// Status classification: the canonical reason phrase without spaces or
/// punctuation (`500` -> `InternalServerError`), else the numeric code.
#[must_use]
pub fn status_label(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || status.as_u16().to_string(),
        |reason| {
            reason
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect()
        },
    )
}

fn transport_label(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        TIMEOUT_ERROR
    } else if err.is_connect() {
        CONNECTION_ERROR
    } else {
        TRANSPORT_ERROR
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
