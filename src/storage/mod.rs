pub mod oss;

pub use oss::OssUploader;
