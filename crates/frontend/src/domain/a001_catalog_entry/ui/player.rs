use leptos::prelude::*;

/// Плеер: нативный `<video>` браузера, без кнопки скачивания
#[component]
pub fn VideoPlayer(src: String, #[prop(optional)] poster: Option<String>) -> impl IntoView {
    view! {
        <div class="video-player">
            <video
                src=src
                poster=poster
                controls=true
                autoplay=true
                playsinline=true
                controlslist="nodownload"
                preload="metadata"
            >
                "Your browser does not support HTML5 video."
            </video>
        </div>
    }
}
