pub mod navigation;

use leptos::prelude::*;
use navigation::Navigation;

use crate::shared::toast::{ToastHost, Toaster};
use crate::system::auth::context::SessionContext;

/// Каркас приложения.
///
/// ```text
/// +------------------------------------------+
/// |              Navigation                  |
/// +------------------------------------------+
/// |               Content                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(session: SessionContext, toaster: Toaster, children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Navigation session=session toaster=toaster />
            <main class="app-main">{children()}</main>
            <ToastHost toaster=toaster />
        </div>
    }
}
