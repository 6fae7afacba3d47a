use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::*;

use crate::system::auth::context::SessionContext;

/// Страница входа `/auth/signin`; после успешного входа ведёт в каталог
#[component]
pub fn SignInPage(session: SessionContext) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let navigate = use_navigate();

    // Уже вошли: сразу в каталог
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if session.is_authenticated() {
                navigate("/browse", NavigateOptions::default());
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();
        if username_val.trim().is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Please enter username and password".into()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            if let Err(e) = session.sign_in(username_val, password_val).await {
                log::warn!("Sign in failed: {}", e);
                set_error_message.set(Some("Invalid username or password".into()));
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1 class="brand">"StreamZen"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label>"Username"</label>
                        <Input value=username placeholder="admin" disabled=Signal::derive(move || is_loading.get()) />
                    </div>

                    <div class="form-group">
                        <label>"Password"</label>
                        <Input
                            value=password
                            input_type=InputType::Password
                            disabled=Signal::derive(move || is_loading.get())
                        />
                    </div>

                    <Button
                        button_type=ButtonType::Submit
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || is_loading.get())
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </Button>
                </form>
            </div>
        </div>
    }
}
