use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use super::{api, storage};
use crate::shared::api_utils::FetchError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Сессия из localStorage ещё проверяется на сервере
    pub restoring: bool,
}

/// Сессия пользователя.
///
/// Создаётся один раз в корневом компоненте и передаётся в страницы явно,
/// через prop. Копируется дёшево (внутри только сигналы).
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl SessionContext {
    /// Создать контекст и попытаться восстановить сессию из localStorage
    pub fn restore() -> Self {
        let stored_token = storage::get_access_token();
        let (state, set_state) = signal(AuthState {
            restoring: stored_token.is_some(),
            ..Default::default()
        });
        let session = Self { state, set_state };

        if let Some(access_token) = stored_token {
            spawn_local(async move {
                session.revalidate(access_token).await;
            });
        }

        session
    }

    async fn revalidate(self, access_token: String) {
        // Validate token by fetching current user
        if let Ok(user_info) = api::get_current_user(&access_token).await {
            self.set_signed_in(access_token, user_info);
            return;
        }

        // Token invalid, try refresh
        let Some(refresh_token) = storage::get_refresh_token() else {
            self.clear();
            return;
        };

        match api::refresh_token(refresh_token).await {
            Ok(response) => {
                storage::save_access_token(&response.access_token);
                match api::get_current_user(&response.access_token).await {
                    Ok(user_info) => self.set_signed_in(response.access_token, user_info),
                    Err(e) => {
                        log::warn!("Session restore failed after refresh: {}", e);
                        self.clear();
                    }
                }
            }
            Err(e) => {
                log::info!("Stored session expired: {}", e);
                self.clear();
            }
        }
    }

    fn set_signed_in(&self, access_token: String, user_info: UserInfo) {
        self.set_state.set(AuthState {
            access_token: Some(access_token),
            user_info: Some(user_info),
            restoring: false,
        });
    }

    fn clear(&self) {
        storage::clear_tokens();
        self.set_state.set(AuthState::default());
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.access_token.is_some())
    }

    /// Нет сессии и восстанавливать нечего: страницы с авторизацией уводят на вход
    pub fn is_signed_out(&self) -> bool {
        self.state.with(|s| s.access_token.is_none() && !s.restoring)
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.with(|s| s.access_token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user_info.clone())
    }

    /// Запрос с токеном сессии.
    ///
    /// Если сервер отклонил токен, он один раз обновляется по refresh-токену
    /// и запрос повторяется. Не удалось: сессия сбрасывается, и страницы
    /// с авторизацией уводят на вход.
    pub async fn authorized<T, F, Fut>(&self, request: F) -> Result<T, String>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let Some(access_token) = self.access_token() else {
            return Err(FetchError::Unauthorized.into());
        };

        match request(access_token).await {
            Err(FetchError::Unauthorized) => {}
            other => return other.map_err(String::from),
        }

        let Some(access_token) = self.refresh_access_token().await else {
            self.clear();
            return Err("Session expired".into());
        };

        match request(access_token).await {
            Err(FetchError::Unauthorized) => {
                self.clear();
                Err("Session expired".into())
            }
            other => other.map_err(String::from),
        }
    }

    /// Новый access-токен по refresh-токену; пользователь сессии не меняется
    async fn refresh_access_token(&self) -> Option<String> {
        let refresh_token = storage::get_refresh_token()?;
        match api::refresh_token(refresh_token).await {
            Ok(response) => {
                storage::save_access_token(&response.access_token);
                self.set_state
                    .update(|s| s.access_token = Some(response.access_token.clone()));
                Some(response.access_token)
            }
            Err(e) => {
                log::info!("Session refresh rejected: {}", e);
                None
            }
        }
    }

    pub async fn sign_in(&self, username: String, password: String) -> Result<(), String> {
        let response = api::login(username, password).await?;

        storage::save_access_token(&response.access_token);
        storage::save_refresh_token(&response.refresh_token);
        self.set_signed_in(response.access_token, response.user);

        Ok(())
    }

    pub async fn sign_out(&self) {
        if let Some(refresh_token) = storage::get_refresh_token() {
            if let Err(e) = api::logout(refresh_token).await {
                log::warn!("Logout request failed: {}", e);
            }
        }
        self.clear();
    }
}
