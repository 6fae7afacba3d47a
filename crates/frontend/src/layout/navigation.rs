//! Верхняя навигация: логотип, ссылки разделов, пользователь, мобильное меню.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;
use crate::shared::toast::Toaster;
use crate::system::auth::context::SessionContext;
use crate::system::auth::guard::SIGN_IN_PATH;

const NAV_ITEMS: &[(&str, &str)] = &[("Home", "/"), ("Browse", "/browse")];

/// Ссылка активна, если путь совпадает (для "/" только точное совпадение)
pub fn is_active(href: &str, pathname: &str) -> bool {
    if href == "/" {
        pathname == "/"
    } else {
        pathname == href || pathname.starts_with(&format!("{}/", href))
    }
}

#[component]
pub fn Navigation(session: SessionContext, toaster: Toaster) -> impl IntoView {
    let location = use_location();
    let (menu_open, set_menu_open) = signal(false);

    // Страницы, требующие сессии, сами уведут на вход
    let sign_out = move |_: leptos::ev::MouseEvent| {
        set_menu_open.set(false);
        spawn_local(async move {
            session.sign_out().await;
            toaster.info("You have been signed out");
        });
    };

    let links = move |mobile: bool| {
        NAV_ITEMS
            .iter()
            .map(|(label, href)| {
                let href = *href;
                let class = move || {
                    let base = if mobile { "nav-link nav-link--block" } else { "nav-link" };
                    if is_active(href, &location.pathname.get()) {
                        format!("{} nav-link--active", base)
                    } else {
                        base.to_string()
                    }
                };
                view! {
                    <A href=href attr:class=class on:click=move |_| set_menu_open.set(false)>
                        {*label}
                    </A>
                }
            })
            .collect_view()
    };

    let user_block = move |mobile: bool| {
        move || match session.user() {
            Some(user) => view! {
                <div class=if mobile { "nav-user nav-user--block" } else { "nav-user" }>
                    <span class="nav-user__name">{user.display_name().to_string()}</span>
                    <button class="btn-primary btn-small" on:click=sign_out>
                        "Sign out"
                    </button>
                </div>
            }
            .into_any(),
            None => view! {
                <A
                    href=SIGN_IN_PATH
                    attr:class=if mobile { "nav-link nav-link--block" } else { "nav-link" }
                    on:click=move |_| set_menu_open.set(false)
                >
                    "Sign in"
                </A>
            }
            .into_any(),
        }
    };

    view! {
        <nav class="navigation">
            <div class="navigation__bar">
                <A href="/" attr:class="navigation__logo">"StreamZen"</A>

                <div class="navigation__links">{links(false)}</div>

                <div class="navigation__auth">{user_block(false)}</div>

                <button
                    class="navigation__toggle"
                    aria-label="Toggle menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { icon("close") } else { icon("menu") }}
                </button>
            </div>

            <Show when=move || menu_open.get()>
                <div class="navigation__mobile">
                    <div class="navigation__mobile-links">{links(true)}</div>
                    <div class="navigation__mobile-auth">{user_block(true)}</div>
                </div>
            </Show>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/browse"));
        assert!(is_active("/browse", "/browse"));
        assert!(!is_active("/browse", "/browser"));
        assert!(!is_active("/browse", "/watch/1"));
    }
}
