use contracts::domain::a001_catalog_entry::aggregate::CatalogEntry;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn GenreChips(genre: Vec<String>) -> impl IntoView {
    view! {
        <div class="genre-chips">
            {genre
                .into_iter()
                .map(|g| view! { <span class="genre-chip">{g}</span> })
                .collect_view()}
        </div>
    }
}

/// Карточка записи каталога; клик ведёт на страницу просмотра
#[component]
pub fn CatalogCard(entry: CatalogEntry) -> impl IntoView {
    let href = format!("/watch/{}", entry.to_string_id());
    let type_label = entry.type_label();

    view! {
        <A href=href attr:class="catalog-card">
            <div class="catalog-card__poster">
                <img src=entry.poster_url.clone() alt=entry.title.clone() loading="lazy" />
                <div class="catalog-card__overlay">
                    <span>{type_label}</span>
                    <span>{entry.release_year}</span>
                </div>
            </div>
            <div class="catalog-card__body">
                <h3 class="catalog-card__title">{entry.title.clone()}</h3>
                <p class="catalog-card__description">{entry.description.clone()}</p>
                <div class="catalog-card__footer">
                    <GenreChips genre=entry.genre.clone() />
                    <span class="catalog-card__duration">{format!("{} min", entry.duration)}</span>
                </div>
            </div>
        </A>
    }
}
