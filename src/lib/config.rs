//! Build-time configuration for the Supabase project and product policies with an
//! optional runtime override. The runtime config is read from
//! `window.UNIFACE_CONFIG` (if present) so static deployments can point at another
//! project without rebuilding. Every value here is public, including the anon
//! key; do not store secrets here.

use crate::app_lib::AppError;
use crate::features::waitlist::policy::EmailDomainPolicy;
use url::Url;

const DEFAULT_WAITLIST_TABLE: &str = "early_signups";
const DEFAULT_OAUTH_PROVIDER: &str = "google";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Origin used to build redirect URLs. Empty means "use the browser origin".
    pub site_url: String,
    pub waitlist_table: String,
    /// Comma separated email suffixes accepted by the waitlist. Empty is open.
    pub waitlist_domains: String,
    /// Shown when the waitlist email is outside the allowed domains. Empty uses
    /// the built-in text.
    pub waitlist_rejection_message: String,
    pub oauth_provider: String,
    /// Whether OAuth sessions count as verified without an email confirmation.
    pub trust_oauth_sessions: bool,
    /// Browser storage key for the persisted session. Empty derives it from the URL.
    pub storage_key: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self {
            supabase_url: option_env!("UNIFACE_SUPABASE_URL")
                .unwrap_or("")
                .to_string(),
            supabase_anon_key: option_env!("UNIFACE_SUPABASE_ANON_KEY")
                .unwrap_or("")
                .to_string(),
            site_url: option_env!("UNIFACE_SITE_URL").unwrap_or("").to_string(),
            waitlist_table: option_env!("UNIFACE_WAITLIST_TABLE")
                .unwrap_or(DEFAULT_WAITLIST_TABLE)
                .to_string(),
            waitlist_domains: option_env!("UNIFACE_WAITLIST_DOMAINS")
                .unwrap_or("")
                .to_string(),
            waitlist_rejection_message: option_env!("UNIFACE_WAITLIST_REJECTION_MESSAGE")
                .unwrap_or("")
                .to_string(),
            oauth_provider: option_env!("UNIFACE_OAUTH_PROVIDER")
                .unwrap_or(DEFAULT_OAUTH_PROVIDER)
                .to_string(),
            trust_oauth_sessions: option_env!("UNIFACE_TRUST_OAUTH_SESSIONS")
                .and_then(parse_flag)
                .unwrap_or(true),
            storage_key: option_env!("UNIFACE_STORAGE_KEY")
                .unwrap_or("")
                .to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Rejects configurations the app cannot start with.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the project URL or anon key is missing or
    /// the URL does not parse.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.supabase_url.trim().is_empty() {
            return Err(AppError::Config(
                "Supabase URL is not configured.".to_string(),
            ));
        }
        if self.supabase_anon_key.trim().is_empty() {
            return Err(AppError::Config(
                "Supabase anon key is not configured.".to_string(),
            ));
        }
        Url::parse(self.supabase_url.trim())
            .map_err(|err| AppError::Config(format!("Supabase URL is invalid: {err}")))?;
        Ok(())
    }

    pub fn waitlist_policy(&self) -> EmailDomainPolicy {
        let policy = EmailDomainPolicy::from_list(&self.waitlist_domains);
        match self.waitlist_rejection_message.trim() {
            "" => policy,
            message => policy.with_rejection_message(message),
        }
    }

    /// Where the provider sends the browser after email confirmation or OAuth.
    pub fn callback_url(&self, browser_origin: &str) -> String {
        let origin = if self.site_url.trim().is_empty() {
            browser_origin
        } else {
            self.site_url.as_str()
        };
        format!(
            "{}{}",
            origin.trim().trim_end_matches('/'),
            crate::routes::paths::AUTH_CALLBACK
        )
    }

    /// Storage key for the persisted session, `sb-<project-ref>-auth-token` unless
    /// overridden.
    pub fn session_storage_key(&self) -> String {
        if !self.storage_key.trim().is_empty() {
            return self.storage_key.trim().to_string();
        }
        let project_ref = Url::parse(self.supabase_url.trim())
            .ok()
            .and_then(|url| {
                url.host_str()
                    .and_then(|host| host.split('.').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "local".to_string());
        format!("sb-{project_ref}-auth-token")
    }
}

#[derive(Default)]
struct RuntimeConfig {
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    site_url: Option<String>,
    waitlist_table: Option<String>,
    waitlist_domains: Option<String>,
    waitlist_rejection_message: Option<String>,
    oauth_provider: Option<String>,
    trust_oauth_sessions: Option<bool>,
    storage_key: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.supabase_url {
        config.supabase_url = value;
    }
    if let Some(value) = runtime.supabase_anon_key {
        config.supabase_anon_key = value;
    }
    if let Some(value) = runtime.site_url {
        config.site_url = value;
    }
    if let Some(value) = runtime.waitlist_table {
        config.waitlist_table = value;
    }
    if let Some(value) = runtime.waitlist_domains {
        config.waitlist_domains = value;
    }
    if let Some(value) = runtime.waitlist_rejection_message {
        config.waitlist_rejection_message = value;
    }
    if let Some(value) = runtime.oauth_provider {
        config.oauth_provider = value;
    }
    if let Some(value) = runtime.trust_oauth_sessions {
        config.trust_oauth_sessions = value;
    }
    if let Some(value) = runtime.storage_key {
        config.storage_key = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("UNIFACE_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        supabase_url: read_runtime_value(&object, "supabase_url"),
        supabase_anon_key: read_runtime_value(&object, "supabase_anon_key"),
        site_url: read_runtime_value(&object, "site_url"),
        waitlist_table: read_runtime_value(&object, "waitlist_table"),
        // An explicit empty string opens the waitlist, so it is not normalized away.
        waitlist_domains: Reflect::get(&object, &JsValue::from_str("waitlist_domains"))
            .ok()
            .and_then(|value| value.as_string()),
        waitlist_rejection_message: read_runtime_value(&object, "waitlist_rejection_message"),
        oauth_provider: read_runtime_value(&object, "oauth_provider"),
        trust_oauth_sessions: read_runtime_value(&object, "trust_oauth_sessions")
            .as_deref()
            .and_then(parse_flag),
        storage_key: read_runtime_value(&object, "storage_key"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let text = match value.as_bool() {
        Some(flag) => flag.to_string(),
        None => value.as_string()?,
    };
    normalize_runtime_value(&text)
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
