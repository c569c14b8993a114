use async_trait::async_trait;

use crate::Result;

/// Hexagonal port for the homework-review API.
///
/// Implemented over HTTP in `hwr-practicum`; the poll loop only sees the
/// decoded JSON payload.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch homework status changes since `from_date` (Unix seconds).
    async fn get_api_answer(&self, from_date: i64) -> Result<serde_json::Value>;
}

/// Source of "now" for the poll cursor.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
