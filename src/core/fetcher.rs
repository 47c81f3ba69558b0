use crate::domain::model::{
    AttemptOutcome, FetchErrorKind, FetchFailure, FetchTarget, FetchedPage, Protocol,
    RetrievalAttempt,
};
use crate::domain::ports::{Transport, TransportError, TransportResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ATTEMPT_BUDGET: u32 = 4;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_USER_AGENT: &str = concat!("address-scout/", env!("CARGO_PKG_VERSION"));

/// Attempts 0 and 1 go over plain HTTP, every later attempt over HTTPS.
pub fn protocol_for_attempt(attempt_number: u32) -> Protocol {
    if attempt_number < 2 {
        Protocol::Http
    } else {
        Protocol::Https
    }
}

/// reqwest 實作：單次 GET，完整讀取回應內容
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError {
                kind: FetchErrorKind::NetworkError,
                message: format!("HTTP status {}", status),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        Ok(TransportResponse { body, final_url })
    }
}

fn classify_reqwest_error(error: reqwest::Error) -> TransportError {
    let kind = if error.is_timeout() {
        FetchErrorKind::Timeout
    } else {
        FetchErrorKind::NetworkError
    };
    TransportError {
        kind,
        message: error.to_string(),
    }
}

/// Retry driver: walks the attempt schedule until one attempt succeeds or the
/// budget runs out. It does not look at why an attempt failed.
#[derive(Debug, Clone)]
pub struct RetryingFetcher<T: Transport> {
    transport: T,
    attempt_budget: u32,
    request_timeout: Duration,
}

impl<T: Transport> RetryingFetcher<T> {
    pub fn new(transport: T, attempt_budget: u32, request_timeout: Duration) -> Self {
        Self {
            transport,
            attempt_budget,
            request_timeout,
        }
    }

    pub fn attempt_budget(&self) -> u32 {
        self.attempt_budget
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch(
        &self,
        target: &FetchTarget,
    ) -> std::result::Result<FetchedPage, FetchFailure> {
        self.fetch_with_log(target).await.0
    }

    /// Same as [`fetch`](Self::fetch), also returning every attempt made.
    pub async fn fetch_with_log(
        &self,
        target: &FetchTarget,
    ) -> (
        std::result::Result<FetchedPage, FetchFailure>,
        Vec<RetrievalAttempt>,
    ) {
        let mut log = Vec::new();
        let mut last_error = TransportError {
            kind: FetchErrorKind::NetworkError,
            message: "no attempt made".to_string(),
        };

        for attempt_number in 0..self.attempt_budget {
            let protocol = protocol_for_attempt(attempt_number);
            let url = target.url(protocol);
            tracing::debug!("Attempt {} → {}", attempt_number + 1, url);

            match self.transport.get(&url, self.request_timeout).await {
                Ok(response) => {
                    log.push(RetrievalAttempt {
                        url,
                        protocol,
                        attempt_number,
                        outcome: AttemptOutcome::Success {
                            final_url: response.final_url.clone(),
                        },
                    });
                    let page = FetchedPage {
                        markup: response.body,
                        final_url: response.final_url,
                        attempts: attempt_number + 1,
                    };
                    return (Ok(page), log);
                }
                Err(error) => {
                    tracing::debug!(
                        "Retry {}: failed to fetch {} ({:?}: {})",
                        attempt_number + 1,
                        url,
                        error.kind,
                        error.message
                    );
                    log.push(RetrievalAttempt {
                        url,
                        protocol,
                        attempt_number,
                        outcome: AttemptOutcome::Failed(error.kind),
                    });
                    last_error = error;
                }
            }
        }

        tracing::warn!(
            "Exceeded maximum retries ({}) for {}",
            self.attempt_budget,
            target.domain
        );
        let failure = FetchFailure {
            kind: last_error.kind,
            attempts: log.len() as u32,
            message: last_error.message,
        };
        (Err(failure), log)
    }
}
