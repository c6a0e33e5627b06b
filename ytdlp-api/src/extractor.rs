use async_trait::async_trait;
use yt_dlp::{ExtractOptions, Metadata, YtDlp};

/// Source of video metadata behind the extraction routes.
///
/// Implementations must return sanitized metadata.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str, options: &ExtractOptions) -> yt_dlp::Result<Metadata>;
}

#[async_trait]
impl Extractor for YtDlp {
    async fn extract(&self, url: &str, options: &ExtractOptions) -> yt_dlp::Result<Metadata> {
        self.extract_info(url, options).await
    }
}
