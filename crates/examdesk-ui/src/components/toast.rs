use examdesk_types::Notice;
use leptos::prelude::*;

const TOAST_LIFETIME: std::time::Duration = std::time::Duration::from_secs(3);

/// What a toast says. Outcomes of backend calls arrive as a [`Notice`];
/// warnings are local checks that never reached the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum ToastBody {
    Notice(Notice),
    Warning(String),
}

impl ToastBody {
    fn class(&self) -> &'static str {
        match self {
            ToastBody::Notice(n) if n.is_error() => "toast toast-error",
            ToastBody::Notice(_) => "toast toast-success",
            ToastBody::Warning(_) => "toast toast-warning",
        }
    }

    fn text(&self) -> String {
        match self {
            ToastBody::Notice(n) => n.message().to_string(),
            ToastBody::Warning(message) => message.clone(),
        }
    }
}

#[derive(Clone, Debug)]
struct Toast {
    id: u64,
    body: ToastBody,
}

/// Handle to the page's toast queue. Each toast removes itself after
/// [`TOAST_LIFETIME`].
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<Vec<Toast>>,
    nextId: StoredValue<u64>,
}

impl Toasts {
    fn show(&self, body: ToastBody) {
        let id = self.nextId.get_value();
        self.nextId.set_value(id + 1);
        self.queue.update(|q| q.push(Toast { id, body }));

        let queue = self.queue;
        set_timeout(move || queue.update(|q| q.retain(|t| t.id != id)), TOAST_LIFETIME);
    }

    pub fn notify(&self, notice: &Notice) {
        self.show(ToastBody::Notice(notice.clone()));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.show(ToastBody::Warning(message.into()));
    }
}

pub fn use_toasts() -> Option<Toasts> {
    use_context::<Toasts>()
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let toasts = Toasts {
        queue: RwSignal::new(Vec::new()),
        nextId: StoredValue::new(0),
    };
    provide_context(toasts);

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || toasts.queue.get()
                key=|toast| toast.id
                let:toast
            >
                <div class=toast.body.class() role="status">
                    {toast.body.text()}
                </div>
            </For>
        </div>
    }
}
