use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::context::SessionContext;

pub const SIGN_IN_PATH: &str = "/auth/signin";

/// Перенаправить на страницу входа, как только станет ясно, что сессии нет
pub fn redirect_when_signed_out(session: SessionContext) {
    let navigate = use_navigate();
    Effect::new(move |_| {
        if session.is_signed_out() {
            navigate(SIGN_IN_PATH, NavigateOptions::default());
        }
    });
}
