use leptos::prelude::*;

/// Indeterminate progress indicator with an optional caption.
#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="spinner" role="status" aria-live="polite">
            <span class="spinner-ring" aria-hidden="true"></span>
            <span class:sr-only=label.is_none()>{label.unwrap_or("Loading")}</span>
        </div>
    }
}
