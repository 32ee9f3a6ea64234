use reqwest::Method;

use super::{ApiError, KvmClient};
use crate::models::{ApiInfo, HostStats};

impl KvmClient {
    /// `GET /` of the API; used to validate configuration.
    pub async fn api_info(&self) -> Result<ApiInfo, ApiError> {
        self.call(Method::GET, "/", None, None).await
    }

    pub async fn host_stats(&self) -> Result<HostStats, ApiError> {
        self.call(Method::GET, "/host/stats", None, None).await
    }
}
