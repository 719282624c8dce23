//! Client session stored in `localStorage`: the bearer token plus the
//! signed-in user. Pages read the session through context; role checks
//! live here so gating is consistent.

use crate::models::{AppSettings, AppUser, DivisionKind, Role};

const TOKEN_KEY: &str = "access_token";
const USER_KEY: &str = "current_user";
const SETTINGS_KEY: &str = "app_settings";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: AppUser,
}

impl Session {
    pub fn is_super_admin(&self) -> bool {
        self.user.role == Role::SuperAdmin
    }

    pub fn division_id(&self) -> Option<i64> {
        self.user.division.as_ref().map(|d| d.id)
    }

    pub fn division_kind(&self) -> DivisionKind {
        self.user
            .division
            .as_ref()
            .map(|d| DivisionKind::from_name(&d.name))
            .unwrap_or(DivisionKind::Umum)
    }

    /// Division admins only see their own division; super admins see all.
    pub fn can_access_division(&self, division_id: i64) -> bool {
        self.is_super_admin() || self.division_id() == Some(division_id)
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn access_token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok()?
}

pub fn load_session() -> Option<Session> {
    let storage = storage()?;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    if token.is_empty() {
        return None;
    }
    let raw_user = storage.get_item(USER_KEY).ok()??;
    let user = serde_json::from_str::<AppUser>(&raw_user).ok()?;
    Some(Session { token, user })
}

pub fn save_session(token: &str, user: &AppUser) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
        if let Ok(raw) = serde_json::to_string(user) {
            let _ = storage.set_item(USER_KEY, &raw);
        }
    }
}

pub fn clear_session() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

pub fn logout_and_reload() {
    clear_session();
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// Last settings payload seen from the API, so reports render a company
/// header before the settings fetch resolves.
pub fn load_cached_settings() -> AppSettings {
    if let Some(storage) = storage() {
        if let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) {
            if let Ok(settings) = serde_json::from_str::<AppSettings>(&raw) {
                return settings;
            }
        }
    }
    AppSettings::default()
}

pub fn cache_settings(settings: &AppSettings) {
    if let Some(storage) = storage() {
        if let Ok(raw) = serde_json::to_string(settings) {
            let _ = storage.set_item(SETTINGS_KEY, &raw);
        }
    }
}
