//! News headline interface.

use async_trait::async_trait;

use crate::error::ProviderError;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Up to `max_results` recent headlines (title plus optional summary).
    /// May be empty.
    async fn headlines(&self, symbol: &str, max_results: usize)
        -> Result<Vec<String>, ProviderError>;
}

/// Never returns any news
pub struct NoNews;

#[async_trait]
impl NewsSource for NoNews {
    async fn headlines(&self, _symbol: &str, _max_results: usize) -> Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }
}
