use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://eyedance.net/api/generate";
pub const DEFAULT_MODEL: &str = "eyedance-qwen-image";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            base_url: None,
            default_model: None,
            request_timeout_secs: None,
            max_retries: None,
            retry_delay_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("EYEDANCE_BASE_URL").ok();
        let default_model = env::var("EYEDANCE_DEFAULT_MODEL").ok();
        let request_timeout_secs = env::var("EYEDANCE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok());
        let max_retries = env::var("EYEDANCE_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok());
        let retry_delay_secs = env::var("EYEDANCE_RETRY_DELAY")
            .ok()
            .and_then(|s| s.parse().ok());

        UpstreamConfig {
            base_url,
            default_model,
            request_timeout_secs,
            max_retries,
            retry_delay_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_retry_delay(mut self, secs: u64) -> Self {
        self.retry_delay_secs = Some(secs);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn default_model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs.unwrap_or(DEFAULT_RETRY_DELAY_SECS))
    }
}

#[derive(Debug, Clone)]
pub struct OssConfig {
    pub sts_token_url: Option<String>,
    pub endpoint: Option<String>,
    pub bucket: Option<String>,
    pub upload_prefix: Option<String>,
    pub cdn_base_url: Option<String>,
}

impl Default for OssConfig {
    fn default() -> Self {
        OssConfig {
            sts_token_url: None,
            endpoint: None,
            bucket: None,
            upload_prefix: None,
            cdn_base_url: None,
        }
    }
}

impl OssConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let sts_token_url = env::var("OSS_STS_TOKEN_URL").ok();
        let endpoint = env::var("OSS_ENDPOINT").ok();
        let bucket = env::var("OSS_BUCKET").ok();
        let upload_prefix = env::var("OSS_UPLOAD_PREFIX").ok();
        let cdn_base_url = env::var("OSS_CDN_BASE_URL").ok();

        OssConfig {
            sts_token_url,
            endpoint,
            bucket,
            upload_prefix,
            cdn_base_url,
        }
    }

    pub fn with_sts_token_url(mut self, url: impl Into<String>) -> Self {
        self.sts_token_url = Some(url.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn with_upload_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.upload_prefix = Some(prefix.into());
        self
    }

    pub fn with_cdn_base_url(mut self, url: impl Into<String>) -> Self {
        self.cdn_base_url = Some(url.into());
        self
    }

    pub fn sts_token_url(&self) -> &str {
        self.sts_token_url
            .as_deref()
            .unwrap_or("https://visualgpt.io/api/v1/oss/sts-token")
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or("https://oss-us-west-1.aliyuncs.com")
    }

    pub fn bucket(&self) -> &str {
        self.bucket.as_deref().unwrap_or("nc-cdn")
    }

    pub fn upload_prefix(&self) -> &str {
        self.upload_prefix
            .as_deref()
            .unwrap_or("visualgpt/user-upload/")
    }

    pub fn cdn_base_url(&self) -> &str {
        self.cdn_base_url
            .as_deref()
            .unwrap_or("https://cdn.visualgpt.io/")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub use_oss: bool,
    pub upstream: UpstreamConfig,
    pub oss: Option<OssConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_oss: false,
            upstream: UpstreamConfig::default(),
            oss: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let use_oss = env::var("USE_OSS").ok().map_or(false, |val| val == "true");

        Config {
            use_oss,
            upstream: UpstreamConfig::from_env(),
            oss: if use_oss {
                Some(OssConfig::from_env())
            } else {
                None
            },
        }
    }

    pub fn with_upstream(mut self, config: UpstreamConfig) -> Self {
        self.upstream = config;
        self
    }

    pub fn with_oss(mut self, config: OssConfig) -> Self {
        self.oss = Some(config);
        self.use_oss = true;
        self
    }
}
