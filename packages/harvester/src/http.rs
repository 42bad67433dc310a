//! HTTP access to remote row batches.
//!
//! Batches run to hundreds of megabytes, so [`open`] hands back the
//! response with its body unread and the caller streams it line by line.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("ruslaw-harvester/", env!("CARGO_PKG_VERSION"));

/// Attempts per request, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled for each further retry.
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Client with the harvester's user agent and request timeout.
pub fn create_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?)
}

/// Backoff before retry number `retry` (1-based).
fn retry_delay(retry: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS << retry.saturating_sub(1))
}

/// Send a GET for `url` and return the response once its status is final.
///
/// Connection errors, timeouts and 5xx statuses are retried; a 4xx status
/// fails at once. Only the status line is read here.
pub fn open(client: &Client, url: &str) -> Result<Response> {
    let mut last_error = String::from("no attempt made");

    for attempt in 1..=MAX_ATTEMPTS {
        if attempt > 1 {
            let delay = retry_delay(attempt - 1);
            tracing::debug!(url, attempt, ?delay, "Retrying batch request");
            thread::sleep(delay);
        }

        last_error = match client.get(url).send() {
            Ok(response) if response.status().is_server_error() => {
                format!("Server error: {}", response.status())
            }
            Ok(response) => return Ok(response.error_for_status()?),
            Err(e) if e.is_connect() || e.is_timeout() => e.to_string(),
            Err(e) => return Err(HarvesterError::Http(e)),
        };

        tracing::warn!(
            url,
            error = %last_error,
            attempt,
            max_attempts = MAX_ATTEMPTS,
            "Transient batch request failure"
        );
    }

    Err(HarvesterError::RetriesExhausted {
        attempts: MAX_ATTEMPTS,
        message: last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client().is_ok());
    }

    #[test]
    fn test_retry_delay_doubles() {
        assert_eq!(retry_delay(1), Duration::from_millis(500));
        assert_eq!(retry_delay(2), Duration::from_millis(1000));
    }
}
