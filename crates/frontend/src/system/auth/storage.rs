use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "streamzen_access_token";
const REFRESH_TOKEN_KEY: &str = "streamzen_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn set(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage is not writable, session will not survive reload");
        }
    }
}

fn get(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

pub fn save_access_token(token: &str) {
    set(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    get(ACCESS_TOKEN_KEY)
}

pub fn save_refresh_token(token: &str) {
    set(REFRESH_TOKEN_KEY, token);
}

pub fn get_refresh_token() -> Option<String> {
    get(REFRESH_TOKEN_KEY)
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
