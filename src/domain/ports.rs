use crate::domain::model::QuoteView;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The rendering side of the booking form.
#[async_trait]
pub trait FormSurface: Send + Sync {
    async fn render(&self, view: &QuoteView) -> Result<()>;
}
