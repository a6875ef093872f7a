//! Waitlist writes through the Supabase rest endpoint. Uses the public anon key;
//! row-level security on the table decides what is accepted.

use crate::{
    app_lib::{
        AppError,
        api::{build_url_with_base, post_json_empty},
        config::AppConfig,
    },
    features::waitlist::types::{WaitlistEntry, WaitlistStore},
};
use async_trait::async_trait;

pub struct SupabaseWaitlist {
    table_url: String,
    anon_key: String,
}

impl SupabaseWaitlist {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            table_url: build_url_with_base(
                &config.supabase_url,
                &format!("/rest/v1/{}", config.waitlist_table.trim()),
            ),
            anon_key: config.supabase_anon_key.trim().to_string(),
        }
    }
}

#[async_trait(?Send)]
impl WaitlistStore for SupabaseWaitlist {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), AppError> {
        let headers = vec![
            ("apikey", self.anon_key.clone()),
            ("Authorization", format!("Bearer {}", self.anon_key)),
            ("Prefer", "return=minimal".to_string()),
        ];
        post_json_empty(&self.table_url, &[entry], &headers).await
    }
}
