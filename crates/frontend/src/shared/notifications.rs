use contracts::shared::api::ApiError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Time a toast stays on screen.
pub const TOAST_TTL_MS: u32 = 4_000;
const MAX_VISIBLE: usize = 5;

/// Toast text for a failed call. A timeout is worth another try, so it says so.
pub fn api_error_text(error: &ApiError) -> String {
    if error.is_timeout() {
        format!("{} : réessayez avec Actualiser", error.message)
    } else {
        error.message.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Ordered toasts, oldest first. Only the last `MAX_VISIBLE` are kept.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Transient notifications shown in the bottom corner of the layout.
#[derive(Clone, Copy)]
pub struct NotificationService {
    queue: RwSignal<ToastQueue>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn api_error(&self, error: &ApiError) {
        self.error(api_error_text(error));
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, message));
        let this = *self;
        Timeout::new(TOAST_TTL_MS, move || this.dismiss(id)).forget();
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided by App")
}

#[component]
pub fn Toasts() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="toasts">
            <For
                each=move || service.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let is_error = toast.kind == ToastKind::Error;
                    let is_success = toast.kind == ToastKind::Success;
                    view! {
                        <div
                            class="toast"
                            class:toast--error=is_error
                            class:toast--success=is_success
                            on:click=move |_| service.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Error, "request timed out");
        let b = queue.push(ToastKind::Success, "Supprimé");
        assert_ne!(a, b);
        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].message, "Supprimé");
        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
    }

    #[test]
    fn test_keeps_latest_toasts() {
        let mut queue = ToastQueue::default();
        for i in 0..8 {
            queue.push(ToastKind::Error, format!("e{}", i));
        }
        let messages: Vec<_> = queue.items().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, ["e3", "e4", "e5", "e6", "e7"]);
    }

    #[test]
    fn test_timeout_toast_suggests_retry() {
        assert_eq!(
            api_error_text(&ApiError::timeout()),
            "request timed out : réessayez avec Actualiser"
        );
        assert_eq!(api_error_text(&ApiError::network()), ApiError::network().message);
        let rejected = ApiError::from_status(422, None);
        assert_eq!(api_error_text(&rejected), rejected.message);
    }
}
