use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_DURATION_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
struct ToastMessage {
    id: u64,
    kind: ToastKind,
    text: String,
}

/// Кратковременные уведомления. Новое сообщение заменяет предыдущее.
#[derive(Clone, Copy)]
pub struct Toaster {
    current: RwSignal<Option<ToastMessage>>,
    counter: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            counter: StoredValue::new(0),
        }
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(ToastKind::Info, text.into());
    }

    fn show(&self, kind: ToastKind, text: String) {
        self.counter.update_value(|c| *c += 1);
        let id = self.counter.get_value();
        self.current.set(Some(ToastMessage { id, kind, text }));

        let current = self.current;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            // Скрываем только своё сообщение
            current.update(|c| {
                if c.as_ref().is_some_and(|m| m.id == id) {
                    *c = None;
                }
            });
        });
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastHost(toaster: Toaster) -> impl IntoView {
    view! {
        {move || {
            toaster.current.get().map(|m| {
                let class = match m.kind {
                    ToastKind::Info => "toast toast-info",
                    ToastKind::Error => "toast toast-error",
                };
                view! {
                    <div class=class role="status" on:click=move |_| toaster.dismiss()>
                        {m.text}
                    </div>
                }
            })
        }}
    }
}
