use super::validate::{classify, AttemptOutcome};
use crate::error::{EyeGenError, Result};
use crate::models::{UpstreamPayload, UpstreamResponse};
use reqwest::header::HeaderMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget, first try included.
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

/// Send one upstream generation request, retrying transport errors and
/// retryable classifications up to the attempt budget. Permanent failures
/// short-circuit without consuming further attempts. The delay between
/// attempts suspends only the calling task.
pub async fn send_with_retry(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    payload: &UpstreamPayload,
    policy: &RetryPolicy,
) -> Result<String> {
    let mut last_failure = String::from("no attempts made");

    for attempt in 1..=policy.max_attempts {
        match dispatch_once(client, url, headers.clone(), payload).await {
            Ok(AttemptOutcome::Success(encoded)) => return Ok(encoded),
            Ok(AttemptOutcome::PermanentFailure(reason)) => {
                log::error!(
                    "upstream request failed permanently on attempt {}/{}: {}",
                    attempt,
                    policy.max_attempts,
                    reason
                );
                return Err(EyeGenError::UpstreamError(reason));
            }
            Ok(AttemptOutcome::RetryableFailure(reason)) => {
                log::warn!(
                    "retryable upstream failure on attempt {}/{}: {}",
                    attempt,
                    policy.max_attempts,
                    reason
                );
                last_failure = reason;
            }
            Err(e) => {
                let reason = format!("transport error: {}", e);
                log::warn!(
                    "upstream request error on attempt {}/{}: {}",
                    attempt,
                    policy.max_attempts,
                    reason
                );
                last_failure = reason;
            }
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.retry_delay).await;
        }
    }

    log::error!(
        "upstream request exhausted all {} attempts: {}",
        policy.max_attempts,
        last_failure
    );
    Err(EyeGenError::UpstreamError(format!(
        "all {} attempts failed, last failure: {}",
        policy.max_attempts, last_failure
    )))
}

async fn dispatch_once(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    payload: &UpstreamPayload,
) -> std::result::Result<AttemptOutcome, reqwest::Error> {
    let response = client
        .post(url)
        .headers(headers)
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    // 5xx bodies are often not JSON at all; classification by status must
    // still see them, so parse failures collapse to an empty body.
    let body: UpstreamResponse = serde_json::from_str(&text).unwrap_or_default();

    Ok(classify(status, &body))
}
