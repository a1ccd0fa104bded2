use crate::api::error;

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists(&self, id: i64) -> Result<bool, error::SystemError>;
}
