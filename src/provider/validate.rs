use crate::models::UpstreamResponse;
use reqwest::StatusCode;

const FETCH_FAILED_SENTINEL: &str = "fetch failed";
const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Classified result of one upstream call. Retryable failures go back
/// through the retry loop; permanent failures short-circuit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The base64 image payload, still in its transport encoding.
    Success(String),
    RetryableFailure(String),
    PermanentFailure(String),
}

/// Classify an upstream response by status code and parsed body.
pub fn classify(status: StatusCode, body: &UpstreamResponse) -> AttemptOutcome {
    if status.is_server_error() {
        return AttemptOutcome::RetryableFailure(format!("upstream server error ({})", status));
    }

    // The upstream reports its own fetch failures inside a 2xx body.
    if body.error.as_deref() == Some(FETCH_FAILED_SENTINEL) {
        return AttemptOutcome::RetryableFailure("upstream transient fetch failure".to_string());
    }

    if !status.is_success() {
        return AttemptOutcome::PermanentFailure(format!(
            "upstream rejected the request ({})",
            status
        ));
    }

    match body.image_url.as_deref() {
        Some(url) if url.starts_with(PNG_DATA_URI_PREFIX) => {
            AttemptOutcome::Success(url[PNG_DATA_URI_PREFIX.len()..].to_string())
        }
        _ => AttemptOutcome::PermanentFailure(
            "malformed upstream payload: no base64 PNG data".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(raw: &str) -> UpstreamResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_success_extracts_encoded_payload() {
        let outcome = classify(
            StatusCode::OK,
            &body(r#"{"imageUrl": "data:image/png;base64,AAAA"}"#),
        );
        assert_eq!(outcome, AttemptOutcome::Success("AAAA".to_string()));
    }

    #[test]
    fn test_fetch_failed_sentinel_is_retryable() {
        let outcome = classify(StatusCode::OK, &body(r#"{"error": "fetch failed"}"#));
        assert!(matches!(outcome, AttemptOutcome::RetryableFailure(_)));
    }

    #[test]
    fn test_server_error_is_retryable_regardless_of_body() {
        let outcome = classify(
            StatusCode::SERVICE_UNAVAILABLE,
            &body(r#"{"imageUrl": "data:image/png;base64,AAAA"}"#),
        );
        assert!(matches!(outcome, AttemptOutcome::RetryableFailure(_)));

        let outcome = classify(StatusCode::INTERNAL_SERVER_ERROR, &UpstreamResponse::default());
        assert!(matches!(outcome, AttemptOutcome::RetryableFailure(_)));
    }

    #[test]
    fn test_client_error_is_permanent() {
        let outcome = classify(StatusCode::NOT_FOUND, &UpstreamResponse::default());
        assert!(matches!(outcome, AttemptOutcome::PermanentFailure(_)));
    }

    #[test]
    fn test_missing_image_field_is_permanent() {
        let outcome = classify(StatusCode::OK, &body(r#"{"status": "done"}"#));
        assert!(matches!(outcome, AttemptOutcome::PermanentFailure(_)));
    }

    #[test]
    fn test_wrong_mime_prefix_is_permanent() {
        let outcome = classify(
            StatusCode::OK,
            &body(r#"{"imageUrl": "data:image/jpeg;base64,AAAA"}"#),
        );
        assert!(matches!(outcome, AttemptOutcome::PermanentFailure(_)));

        let outcome = classify(
            StatusCode::OK,
            &body(r#"{"imageUrl": "https://example.com/image.png"}"#),
        );
        assert!(matches!(outcome, AttemptOutcome::PermanentFailure(_)));
    }
}
