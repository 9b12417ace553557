use crate::config::OssConfig;
use crate::error::{EyeGenError, Result};
use serde::Deserialize;
use uuid::Uuid;

const STS_SUCCESS_CODE: u64 = 100_000;

#[derive(Debug, Deserialize)]
struct StsTokenResponse {
    code: u64,
    message: Option<String>,
    data: Option<StsToken>,
}

/// Temporary credentials handed out by the STS endpoint, valid for one
/// upload session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StsToken {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub security_token: String,
}

/// Pushes image bytes to the CDN-backed OSS bucket: fetch a temporary
/// credential, PUT the object, return the public CDN URL. No retry or
/// concurrency policy; callers decide how to schedule uploads.
pub struct OssUploader {
    client: reqwest::Client,
    config: OssConfig,
}

impl OssUploader {
    pub fn new(config: OssConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn upload_image(&self, image_bytes: Vec<u8>, filename: &str) -> Result<String> {
        let token = self.fetch_upload_token().await?;

        let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("png");
        let object_key = format!("{}{}.{}", self.config.upload_prefix(), Uuid::new_v4(), extension);
        let url = object_url(self.config.endpoint(), self.config.bucket(), &object_key);

        log::info!("uploading image to OSS object '{}'", object_key);

        let response = self
            .client
            .put(&url)
            .header("x-oss-security-token", &token.security_token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image_bytes)
            .send()
            .await
            .map_err(|e| EyeGenError::RequestError(format!("OSS upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(EyeGenError::StorageError(format!(
                "OSS upload rejected with status {}",
                response.status()
            )));
        }

        let cdn_url = format!("{}{}", self.config.cdn_base_url(), object_key);
        log::info!("OSS upload complete: {}", cdn_url);
        Ok(cdn_url)
    }

    async fn fetch_upload_token(&self) -> Result<StsToken> {
        log::info!("requesting temporary OSS credentials");

        let response = self
            .client
            .get(self.config.sts_token_url())
            .send()
            .await
            .map_err(|e| EyeGenError::RequestError(format!("STS token request failed: {}", e)))?;

        let token_response: StsTokenResponse = response.json().await.map_err(|e| {
            EyeGenError::ResponseError(format!("failed to parse STS token response: {}", e))
        })?;

        if token_response.code != STS_SUCCESS_CODE {
            return Err(EyeGenError::StorageError(format!(
                "STS token request rejected: {}",
                token_response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        token_response.data.ok_or_else(|| {
            EyeGenError::ResponseError("STS token response missing credential data".to_string())
        })
    }
}

/// Virtual-hosted bucket URL for one object key.
fn object_url(endpoint: &str, bucket: &str, object_key: &str) -> String {
    let (scheme, host) = endpoint.split_once("://").unwrap_or(("https", endpoint));
    format!("{}://{}.{}/{}", scheme, bucket, host, object_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_object_url_uses_bucket_subdomain() {
        let url = object_url(
            "https://oss-us-west-1.aliyuncs.com",
            "nc-cdn",
            "visualgpt/user-upload/abc.png",
        );
        assert_eq!(
            url,
            "https://nc-cdn.oss-us-west-1.aliyuncs.com/visualgpt/user-upload/abc.png"
        );
    }

    #[tokio::test]
    async fn test_fetch_upload_token_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 100000,
                "data": {
                    "AccessKeyId": "key-id",
                    "AccessKeySecret": "key-secret",
                    "SecurityToken": "token"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let uploader = OssUploader::new(OssConfig::new().with_sts_token_url(server.uri()));
        let token = uploader.fetch_upload_token().await.unwrap();
        assert_eq!(token.access_key_id, "key-id");
        assert_eq!(token.security_token, "token");
    }

    #[tokio::test]
    async fn test_fetch_upload_token_rejected_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 40001,
                "message": "quota exceeded"
            })))
            .mount(&server)
            .await;

        let uploader = OssUploader::new(OssConfig::new().with_sts_token_url(server.uri()));
        let result = uploader.fetch_upload_token().await;

        match result {
            Err(EyeGenError::StorageError(reason)) => {
                assert!(reason.contains("quota exceeded"), "{}", reason);
            }
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_upload_token_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 100000})))
            .mount(&server)
            .await;

        let uploader = OssUploader::new(OssConfig::new().with_sts_token_url(server.uri()));
        let result = uploader.fetch_upload_token().await;
        assert!(matches!(result, Err(EyeGenError::ResponseError(_))));
    }
}
