use crate::app_lib::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One waitlist row. Written once per submission and never read back.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub full_name: String,
    pub email: String,
    pub field: String,
}

/// Destination for waitlist rows. Duplicates are the store's concern.
#[async_trait(?Send)]
pub trait WaitlistStore: Send + Sync {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), AppError>;
}
