pub mod envelopes;
pub use envelopes::EnvelopeClient;
pub mod storage;
pub use storage::StorageClient;

use crate::common::error::AppError;

// Non-2xx responses keep their status and body for the logs.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, AppError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(AppError::Upstream { status, body })
}
