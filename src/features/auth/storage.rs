//! Browser persistence for the current session. The stored value holds tokens, so
//! it is only ever read back into memory and never logged.

use crate::app_lib::AppError;
use crate::features::auth::types::Session;
use web_sys::Storage;

fn local_storage() -> Result<Storage, AppError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| AppError::Storage("Browser storage is unavailable.".to_string()))
}

/// Reads the stored session. Unreadable entries are removed and read as absent.
pub fn load(key: &str) -> Result<Option<Session>, AppError> {
    let storage = local_storage()?;
    let Some(raw) = storage
        .get_item(key)
        .map_err(|_| AppError::Storage("Failed to read the stored session.".to_string()))?
    else {
        return Ok(None);
    };

    match serde_json::from_str::<Session>(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(err) => {
            tracing::warn!(error = %err, "discarding unreadable stored session");
            let _ = storage.remove_item(key);
            Ok(None)
        }
    }
}

pub fn save(key: &str, session: &Session) -> Result<(), AppError> {
    let raw = serde_json::to_string(session)
        .map_err(|err| AppError::Serialization(format!("Failed to encode session: {err}")))?;
    local_storage()?
        .set_item(key, &raw)
        .map_err(|_| AppError::Storage("Failed to store the session.".to_string()))
}

pub fn clear(key: &str) -> Result<(), AppError> {
    local_storage()?
        .remove_item(key)
        .map_err(|_| AppError::Storage("Failed to clear the stored session.".to_string()))
}
