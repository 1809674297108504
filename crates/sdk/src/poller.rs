//! Tracks a mutating operation that completes asynchronously server-side.
//!
//! The service signals completion in one of two ways, so a poller picks its
//! strategy once, at construction, from the original response:
//!
//! - a 201/202 response carries a tracking URL in the `Azure-AsyncOperation`
//!   (or `Location`) header whose body reports an operation `status`;
//! - otherwise the resource itself is polled at the original request URL
//!   until `properties.provisioningState` reports `Succeeded`.
//!
//! Waiting is cooperative: dropping the [`Poller::wait_for_completion`]
//! future between the sleep and the next request abandons the wait and
//! leaves the poller's state as whatever it last was.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::client::{BaseClient, GetRequest};
use crate::error::Error;

const ASYNC_OPERATION_HEADER: &str = "Azure-AsyncOperation";
const LOCATION_HEADER: &str = "Location";
const RETRY_AFTER_HEADER: &str = "Retry-After";

/// Default delay between polls when the service gives no retry hint.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Lifecycle of a pending operation. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Started,
    Polling,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Poll a separate tracking URL and read its `status` field.
    HeaderStatus,
    /// Poll the resource itself and read `properties.provisioningState`.
    ///
    /// This strategy has no failed terminal state: any value other than
    /// `Succeeded` keeps polling.
    ProvisioningState,
}

enum PollOutcome {
    InProgress,
    Done,
    Failed { code: String, message: String },
}

/// A handle on a long-running operation. Obtained from the `*_then_poll`
/// methods on [`BaseClient`]; the caller drives it with
/// [`wait_for_completion`](Poller::wait_for_completion).
#[derive(Debug)]
pub struct Poller {
    client: BaseClient,
    strategy: Strategy,
    state: PollState,
    poll_interval: Duration,
    poll_location: String,
    failure: Option<(String, String)>,
}

impl Poller {
    /// Builds a poller from the response to the original mutating request.
    ///
    /// A 201/202 response selects the header/status strategy and must carry
    /// a tracking header; anything else selects the provisioning-state
    /// strategy against the original request URL.
    pub fn from_response(client: BaseClient, response: Response) -> Result<Self, Error> {
        let status = response.status();

        let (strategy, poll_location) =
            if status == StatusCode::CREATED || status == StatusCode::ACCEPTED {
                let location = header_value(&response, ASYNC_OPERATION_HEADER)
                    .or_else(|| header_value(&response, LOCATION_HEADER))
                    .ok_or(Error::NoPollLocation)?;
                (Strategy::HeaderStatus, location)
            } else {
                (Strategy::ProvisioningState, response.url().to_string())
            };

        let poll_interval = match header_value(&response, RETRY_AFTER_HEADER) {
            Some(value) => {
                let seconds = value
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidRetryAfter(value))?;
                Duration::from_secs(seconds)
            }
            None => DEFAULT_POLL_INTERVAL,
        };

        debug!(?strategy, %poll_location, ?poll_interval, "constructed poller");

        Ok(Self {
            client,
            strategy,
            state: PollState::Polling,
            poll_interval,
            poll_location,
            failure: None,
        })
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn poll_location(&self) -> &str {
        &self.poll_location
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Polls until the operation reaches a terminal state, sleeping for the
    /// poll interval before each request. Calling this again after the
    /// operation completed is a no-op returning the terminal outcome.
    pub async fn wait_for_completion(&mut self) -> Result<(), Error> {
        loop {
            match self.state {
                PollState::Succeeded => return Ok(()),
                PollState::Failed => {
                    let (code, message) = self.failure.clone().unwrap_or_default();
                    return Err(Error::RemoteOperationFailed { code, message });
                }
                PollState::Started | PollState::Polling => {}
            }

            tokio::time::sleep(self.poll_interval).await;
            self.state = PollState::Polling;

            match self.poll_once().await? {
                PollOutcome::InProgress => continue,
                PollOutcome::Done => {
                    self.state = PollState::Succeeded;
                }
                PollOutcome::Failed { code, message } => {
                    self.state = PollState::Failed;
                    self.failure = Some((code.clone(), message.clone()));
                    return Err(Error::RemoteOperationFailed { code, message });
                }
            }
        }
    }

    async fn poll_once(&mut self) -> Result<PollOutcome, Error> {
        let request = GetRequest {
            expected_status_codes: vec![
                202, // in progress
                200, // finished
            ],
            uri: self.poll_location.clone(),
        };
        let response = self.client.get(request).await?;

        if response.status() == StatusCode::ACCEPTED {
            return Ok(PollOutcome::InProgress);
        }

        match self.strategy {
            Strategy::HeaderStatus => self.evaluate_operation_status(response).await,
            Strategy::ProvisioningState => self.evaluate_provisioning_state(response).await,
        }
    }

    async fn evaluate_operation_status(&self, response: Response) -> Result<PollOutcome, Error> {
        let details: OperationStatusBody = decode(response, &self.poll_location).await?;

        if details.status.is_empty() || details.status.eq_ignore_ascii_case("Succeeded") {
            return Ok(PollOutcome::Done);
        }

        if details.status.eq_ignore_ascii_case("Failed") {
            let error = details.error.unwrap_or_default();
            return Ok(PollOutcome::Failed {
                code: error.code,
                message: error.message,
            });
        }

        Err(Error::UnrecognizedOperationStatus(details.status))
    }

    async fn evaluate_provisioning_state(&self, response: Response) -> Result<PollOutcome, Error> {
        let details: ProvisioningStateBody = decode(response, &self.poll_location).await?;

        if details
            .properties
            .provisioning_state
            .eq_ignore_ascii_case("Succeeded")
        {
            return Ok(PollOutcome::Done);
        }

        Ok(PollOutcome::InProgress)
    }
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
    uri: &str,
) -> Result<T, Error> {
    response.json::<T>().await.map_err(|err| Error::Decode {
        uri: uri.to_string(),
        message: err.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct OperationStatusBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<OperationErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct OperationErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProvisioningStateBody {
    #[serde(default)]
    properties: ProvisioningStateProperties,
}

#[derive(Debug, Default, Deserialize)]
struct ProvisioningStateProperties {
    #[serde(default, rename = "provisioningState")]
    provisioning_state: String,
}
