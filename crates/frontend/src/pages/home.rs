use contracts::domain::a001_catalog_entry::aggregate::CatalogEntry;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::domain::a001_catalog_entry::api;
use crate::domain::a001_catalog_entry::ui::card::CatalogCard;
use crate::shared::icons::icon;

/// Лендинг: приветствие и блок избранного
#[component]
pub fn HomePage() -> impl IntoView {
    let (featured, set_featured) = signal::<Vec<CatalogEntry>>(Vec::new());

    spawn_local(async move {
        match api::fetch_featured().await {
            Ok(v) => set_featured.set(v),
            Err(e) => log::warn!("Featured content unavailable: {}", e),
        }
    });

    view! {
        <div class="home-page">
            <section class="hero">
                <div class="hero__shade"></div>
                <div class="hero__content">
                    <h1>"Welcome to StreamZen"</h1>
                    <p>"Your ultimate destination for streaming movies and TV shows in stunning quality"</p>
                    <A href="/browse" attr:class="btn-primary btn-large">
                        {icon("play")}
                        "Start Watching"
                    </A>
                </div>
            </section>

            <section class="featured">
                <h2>"Featured Content"</h2>
                <Show
                    when=move || !featured.with(Vec::is_empty)
                    fallback=|| view! { <p class="empty-state">"Nothing featured yet."</p> }
                >
                    <div class="catalog-grid">
                        <For
                            each=move || featured.get()
                            key=|entry| entry.id
                            children=move |entry: CatalogEntry| view! { <CatalogCard entry=entry /> }
                        />
                    </div>
                </Show>
            </section>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page empty-state">
            <h1>"Page not found"</h1>
            <A href="/">"Back to home"</A>
        </div>
    }
}
