use crate::domain::model::Post;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings for talking to the Agility Content Fetch API.
pub trait ConfigProvider: Send + Sync {
    fn guid(&self) -> &str;
    fn api_key(&self) -> &str;
    fn reference_name(&self) -> &str;
    fn locale(&self) -> &str;
    fn api_base_url(&self) -> Option<&str>;
    fn preview(&self) -> bool;
    fn take(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
}

/// Where posts come from. Implementations return only schema-valid posts.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}
