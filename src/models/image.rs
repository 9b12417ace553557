use serde::{Deserialize, Serialize};

fn default_image_count() -> u32 {
    1
}

fn default_steps() -> u32 {
    20
}

/// One logical batch request, as accepted from the front-end. Defaults are
/// applied once at the deserialization boundary; every field is typed from
/// here on.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: Option<String>,
    /// "WIDTHxHEIGHT"; anything unparseable falls back to 600x450.
    pub size: Option<String>,
    #[serde(default = "default_image_count")]
    pub n: u32,
    #[serde(default = "default_steps")]
    pub steps: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            size: None,
            n: default_image_count(),
            steps: default_steps(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }
}

/// Wire payload for one upstream call. Each payload belongs to exactly one
/// in-flight attempt and carries its own independently drawn seed.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamPayload {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub batch_size: u32,
    pub model: String,
    pub seed: u32,
}

/// Success body of the upstream generation endpoint. A transient failure
/// arrives as `{"error": "fetch failed"}` instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedImage {
    pub b64_json: String,
}

/// Aggregate batch result. Produced only when every attempt succeeded;
/// `data` preserves submission order.
#[derive(Debug, Serialize)]
pub struct GenerationResult {
    pub created: i64,
    pub data: Vec<GeneratedImage>,
}
