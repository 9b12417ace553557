use super::headers::build_headers;
use super::retry::{send_with_retry, RetryPolicy};
use super::size::parse_size;
use super::ImageProvider;
use crate::config::UpstreamConfig;
use crate::error::{EyeGenError, Result};
use crate::models::{
    catalog, GeneratedImage, GenerationRequest, GenerationResult, ModelList, UpstreamPayload,
};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use rand::Rng;

const MAX_SEED: u32 = 1_000_000;

/// Adapter for the eyedance.net generation endpoint. One logical batch
/// request fans out into `n` concurrent upstream attempts; the batch
/// succeeds only if every attempt does.
pub struct EyeDanceProvider {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl EyeDanceProvider {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                EyeGenError::ConfigError(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Generate `request.n` images concurrently. Results come back in
    /// submission order. The first attempt that exhausts its retries or
    /// fails permanently fails the whole batch; sibling attempts still in
    /// flight are left to finish and their results are discarded rather
    /// than cancelled mid-request.
    pub async fn generate_images(&self, request: GenerationRequest) -> Result<GenerationResult> {
        let entry = self.validate(&request)?;
        let (width, height) = parse_size(request.size.as_deref());

        let payloads: Vec<UpstreamPayload> = {
            let mut rng = rand::thread_rng();
            (0..request.n)
                .map(|_| UpstreamPayload {
                    prompt: request.prompt.clone(),
                    width,
                    height,
                    steps: request.steps,
                    batch_size: 1,
                    model: entry.id.to_string(),
                    seed: rng.gen_range(0..=MAX_SEED),
                })
                .collect()
        };

        log::info!(
            "dispatching {} concurrent '{}' generation request(s) upstream",
            payloads.len(),
            entry.id
        );

        let policy = RetryPolicy {
            max_attempts: self.config.max_retries(),
            retry_delay: self.config.retry_delay(),
        };

        let handles: Vec<_> = payloads
            .into_iter()
            .map(|payload| {
                let client = self.client.clone();
                let url = self.config.base_url().to_string();
                let headers = build_headers(&payload.model);
                let policy = policy.clone();
                tokio::spawn(async move {
                    send_with_retry(&client, &url, headers, &payload, &policy).await
                })
            })
            .collect();

        // Awaiting every handle keeps slot order deterministic and lets
        // doomed batches drain their remaining attempts to completion.
        let mut images = Vec::with_capacity(handles.len());
        let mut first_failure: Option<EyeGenError> = None;
        for outcome in join_all(handles).await {
            match outcome {
                Ok(Ok(encoded)) => images.push(GeneratedImage { b64_json: encoded }),
                Ok(Err(e)) => {
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
                Err(e) => {
                    if first_failure.is_none() {
                        first_failure =
                            Some(EyeGenError::UpstreamError(format!("generation task failed: {}", e)));
                    }
                }
            }
        }

        if let Some(failure) = first_failure {
            log::error!("batch generation failed: {}", failure);
            return Err(failure);
        }

        Ok(GenerationResult {
            created: Utc::now().timestamp(),
            data: images,
        })
    }

    pub fn list_models(&self) -> ModelList {
        catalog::model_list()
    }

    fn validate(&self, request: &GenerationRequest) -> Result<&'static catalog::ModelEntry> {
        if request.prompt.trim().is_empty() {
            return Err(EyeGenError::InvalidRequest(
                "'prompt' must not be empty".to_string(),
            ));
        }
        if request.n == 0 {
            return Err(EyeGenError::InvalidRequest(
                "'n' must be at least 1".to_string(),
            ));
        }

        let model_id = request
            .model
            .as_deref()
            .unwrap_or_else(|| self.config.default_model());
        let entry = catalog::find_model(model_id).ok_or_else(|| {
            EyeGenError::InvalidRequest(format!(
                "unsupported model '{}', available models: {:?}",
                model_id,
                catalog::known_model_ids()
            ))
        })?;

        if entry.prefers_ascii_prompts && !request.prompt.is_ascii() {
            log::warn!(
                "model '{}' works best with English prompts; non-ASCII characters detected, output quality may degrade",
                entry.id
            );
        }

        Ok(entry)
    }
}

#[async_trait]
impl ImageProvider for EyeDanceProvider {
    async fn generate_images(&self, request: GenerationRequest) -> Result<GenerationResult> {
        EyeDanceProvider::generate_images(self, request).await
    }

    fn list_models(&self) -> ModelList {
        EyeDanceProvider::list_models(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> EyeDanceProvider {
        EyeDanceProvider::new(
            UpstreamConfig::new()
                .with_base_url(server.uri())
                .with_retry_delay(0),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_batch_success_returns_one_image_per_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"imageUrl": "data:image/png;base64,AAAA"})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let request = GenerationRequest::new("a red fox").with_count(3);
        let result = provider.generate_images(request).await.unwrap();

        assert_eq!(result.data.len(), 3);
        for image in &result.data {
            assert_eq!(image.b64_json, "AAAA");
        }
    }

    #[tokio::test]
    async fn test_single_permanent_failure_fails_the_whole_batch() {
        let server = MockServer::start().await;
        // Two attempts find a working upstream, the third is rejected
        // outright; no partial result may escape.
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"imageUrl": "data:image/png;base64,AAAA"})),
            )
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let request = GenerationRequest::new("a red fox").with_count(3);
        let result = provider.generate_images(request).await;

        match result {
            Err(EyeGenError::UpstreamError(reason)) => {
                assert!(reason.contains("400"), "{}", reason);
            }
            other => panic!("expected aggregate upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_model_is_rejected_before_any_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let request = GenerationRequest::new("a red fox").with_model("dall-e-3");
        let result = provider.generate_images(request).await;

        match result {
            Err(e @ EyeGenError::InvalidRequest(_)) => assert_eq!(e.http_status(), 400),
            other => panic!("expected invalid request, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected() {
        let server = MockServer::start().await;
        let provider = provider_for(&server);

        let result = provider
            .generate_images(GenerationRequest::new("   "))
            .await;
        assert!(matches!(result, Err(EyeGenError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_zero_count_is_rejected() {
        let server = MockServer::start().await;
        let provider = provider_for(&server);

        let result = provider
            .generate_images(GenerationRequest::new("a red fox").with_count(0))
            .await;
        assert!(matches!(result, Err(EyeGenError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_default_model_comes_from_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"imageUrl": "data:image/png;base64,AAAA"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        // No model on the request resolves to the configured default, which
        // is in the catalog.
        let result = provider
            .generate_images(GenerationRequest::new("a red fox"))
            .await
            .unwrap();
        assert_eq!(result.data.len(), 1);
    }

    #[tokio::test]
    async fn test_every_listed_model_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"imageUrl": "data:image/png;base64,AAAA"})),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        for card in provider.list_models().data {
            let request = GenerationRequest::new("a red fox").with_model(card.id);
            assert!(provider.generate_images(request).await.is_ok());
        }
    }
}
