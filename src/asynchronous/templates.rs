use crate::templates::{read_error, MemoryTemplates, QueryTemplates, TemplateDirectory};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves query template names to XQuery text without blocking.
///
/// Implementations fail with [`ClientError::TemplateNotFound`] when no template has the given name.
///
/// [`ClientError::TemplateNotFound`]: crate::ClientError::TemplateNotFound
#[async_trait]
pub trait AsyncQueryTemplates: Send + Sync {
    /// Returns the text of the named template.
    async fn load(&self, name: &str) -> Result<String>;
}

#[async_trait]
impl<T: AsyncQueryTemplates + ?Sized> AsyncQueryTemplates for Arc<T> {
    async fn load(&self, name: &str) -> Result<String> {
        (**self).load(name).await
    }
}

#[async_trait]
impl AsyncQueryTemplates for MemoryTemplates {
    async fn load(&self, name: &str) -> Result<String> {
        QueryTemplates::load(self, name)
    }
}

#[async_trait]
impl AsyncQueryTemplates for TemplateDirectory {
    async fn load(&self, name: &str) -> Result<String> {
        let path = self.path_of(name)?;
        tokio::fs::read_to_string(&path).await.map_err(|e| read_error(name, e))
    }
}
