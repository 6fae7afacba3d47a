use contracts::domain::a001_catalog_entry::aggregate::CatalogEntry;
use contracts::domain::a001_catalog_entry::query::{CatalogQuery, ALL};
use contracts::enums::content_type::ContentType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::card::CatalogCard;
use crate::domain::a001_catalog_entry::api;
use crate::system::auth::context::SessionContext;
use crate::system::auth::guard::redirect_when_signed_out;

const GENRE_OPTIONS: &[(&str, &str)] = &[
    ("action", "Action"),
    ("comedy", "Comedy"),
    ("drama", "Drama"),
    ("sci-fi", "Sci-Fi"),
];

const YEAR_OPTIONS: &[&str] = &["2024", "2023", "2022", "2021"];

/// Каталог с фильтрами по типу, жанру и году.
///
/// Каждое изменение фильтра отправляет новый запрос. Запросы не отменяются,
/// поэтому при быстрой смене фильтров более старый ответ может прийти последним.
#[component]
pub fn BrowsePage(session: SessionContext) -> impl IntoView {
    redirect_when_signed_out(session);

    let content_type = RwSignal::new(ALL.to_string());
    let genre = RwSignal::new(ALL.to_string());
    let year = RwSignal::new(ALL.to_string());

    let (items, set_items) = signal::<Vec<CatalogEntry>>(Vec::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    // Обновление токена не должно перезапускать выборку
    let signed_in = Memo::new(move |_| session.is_authenticated());

    Effect::new(move |_| {
        let query = CatalogQuery::new(&content_type.get(), &genre.get(), &year.get());
        if !signed_in.get() {
            return;
        }

        set_loading.set(true);
        spawn_local(async move {
            let result = session
                .authorized(|token| {
                    let query = query.clone();
                    async move { api::fetch_catalog(&token, &query).await }
                })
                .await;
            match result {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Error fetching content: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="page browse-page">
            <div class="browse-filters">
                <Select value=content_type>
                    <option value=ALL>"All Types"</option>
                    {ContentType::all()
                        .into_iter()
                        .map(|t| view! { <option value=t.code()>{t.plural_name()}</option> })
                        .collect_view()}
                </Select>

                <Select value=genre>
                    <option value=ALL>"All Genres"</option>
                    {GENRE_OPTIONS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </Select>

                <Select value=year>
                    <option value=ALL>"All Years"</option>
                    {YEAR_OPTIONS
                        .iter()
                        .map(|y| view! { <option value=*y>{*y}</option> })
                        .collect_view()}
                </Select>
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <Show
                when=move || !loading.get() || !items.with(Vec::is_empty)
                fallback=|| view! { <div class="page-loading"><Spinner /></div> }
            >
                <Show
                    when=move || !items.with(Vec::is_empty)
                    fallback=|| view! { <div class="empty-state">"No titles match these filters."</div> }
                >
                    <div class="catalog-grid">
                        <For
                            each=move || items.get()
                            key=|entry| entry.id
                            children=move |entry: CatalogEntry| view! { <CatalogCard entry=entry /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
