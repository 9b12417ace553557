//! EyeGen adapts the eyedance.net image generator into a batch-capable
//! generation API: one request for N images fans out into N concurrent,
//! independently retried upstream calls and comes back as a single
//! all-or-nothing result.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod provider;
pub mod storage;

pub use config::{Config, OssConfig, UpstreamConfig};
pub use error::{EyeGenError, Result};
pub use models::{
    GeneratedImage, GenerationRequest, GenerationResult, ModelCard, ModelList, UpstreamPayload,
};
pub use provider::{EyeDanceProvider, ImageProvider};
pub use storage::OssUploader;
