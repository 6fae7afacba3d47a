use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use thaw::{ConfigProvider, Theme};

use crate::domain::a001_catalog_entry::ui::browse::BrowsePage;
use crate::domain::a001_catalog_entry::ui::watch::WatchPage;
use crate::layout::Shell;
use crate::pages::home::{HomePage, NotFoundPage};
use crate::shared::toast::Toaster;
use crate::system::auth::context::SessionContext;
use crate::system::pages::login::SignInPage;

#[component]
pub fn App() -> impl IntoView {
    // Сессия и уведомления создаются один раз и передаются страницам явно
    let session = SessionContext::restore();
    let toaster = Toaster::new();
    let theme = RwSignal::new(Theme::dark());

    view! {
        <ConfigProvider theme>
            <Router>
                <Shell session=session toaster=toaster>
                    <Routes fallback=|| view! { <NotFoundPage /> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/browse") view=move || view! { <BrowsePage session=session /> } />
                        <Route
                            path=path!("/watch/:id")
                            view=move || view! { <WatchPage session=session toaster=toaster /> }
                        />
                        <Route path=path!("/auth/signin") view=move || view! { <SignInPage session=session /> } />
                    </Routes>
                </Shell>
            </Router>
        </ConfigProvider>
    }
}
