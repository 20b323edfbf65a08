use async_trait::async_trait;

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn store_ok(&self) -> bool;
}
