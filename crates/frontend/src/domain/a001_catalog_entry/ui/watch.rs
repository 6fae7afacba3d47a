use contracts::domain::a001_catalog_entry::aggregate::CatalogEntry;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::NavigateOptions;
use thaw::Spinner;

use super::card::GenreChips;
use super::player::VideoPlayer;
use crate::domain::a001_catalog_entry::api;
use crate::shared::toast::Toaster;
use crate::system::auth::context::SessionContext;
use crate::system::auth::guard::redirect_when_signed_out;

/// Страница просмотра `/watch/:id`.
///
/// Ошибка загрузки показывает уведомление и возвращает в каталог.
#[component]
pub fn WatchPage(session: SessionContext, toaster: Toaster) -> impl IntoView {
    redirect_when_signed_out(session);

    let params = use_params_map();
    let navigate = use_navigate();
    let (entry, set_entry) = signal::<Option<CatalogEntry>>(None);

    let signed_in = Memo::new(move |_| session.is_authenticated());

    Effect::new(move |_| {
        let id = params.with(|p| p.get("id")).unwrap_or_default();
        if !signed_in.get() {
            return;
        }
        let navigate = navigate.clone();

        spawn_local(async move {
            let result = session
                .authorized(|token| {
                    let id = id.clone();
                    async move { api::fetch_by_id(&token, &id).await }
                })
                .await;
            match result {
                Ok(v) => set_entry.set(Some(v)),
                Err(e) => {
                    log::error!("Error fetching content {}: {}", id, e);
                    // Сессия сброшена: на вход уведёт guard
                    if session.is_signed_out() {
                        return;
                    }
                    toaster.error("Error loading content");
                    navigate("/browse", NavigateOptions::default());
                }
            }
        });
    });

    view! {
        {move || match entry.get() {
            None => view! { <div class="page-loading"><Spinner /></div> }.into_any(),
            Some(e) => view! { <WatchDetails entry=e /> }.into_any(),
        }}
    }
}

#[component]
fn WatchDetails(entry: CatalogEntry) -> impl IntoView {
    let type_label = entry.type_label();

    view! {
        <div class="page watch-page">
            <VideoPlayer src=entry.video_url.clone() poster=entry.poster_url.clone() />

            <div class="watch-layout">
                <section class="watch-info">
                    <h1>{entry.title.clone()}</h1>
                    <div class="watch-meta">
                        <span>{entry.release_year}</span>
                        <span>{format!("{} min", entry.duration)}</span>
                        <span>{type_label}</span>
                    </div>
                    <p class="watch-description">{entry.description.clone()}</p>
                    <GenreChips genre=entry.genre.clone() />
                </section>

                <aside class="watch-sidebar">
                    <h2>"More Like This"</h2>
                </aside>
            </div>
        </div>
    }
}
