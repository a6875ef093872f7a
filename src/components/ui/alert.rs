//! Alert banners for success and error messages. Messages must be safe to render
//! and should never include secrets or tokens.

use crate::features::flash::{Flash, FlashKind};
use leptos::prelude::*;

#[derive(Clone, Copy)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
}

impl From<FlashKind> for AlertKind {
    fn from(kind: FlashKind) -> Self {
        match kind {
            FlashKind::Success => AlertKind::Success,
            FlashKind::Error => AlertKind::Error,
        }
    }
}

/// Renders a styled alert banner.
#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700"
        }
        AlertKind::Success => {
            "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700"
        }
    };

    view! { <div class=class role="alert">{message}</div> }
}

/// Renders the current flash of a form, if any.
#[component]
pub fn FlashAlert(#[prop(into)] flash: Signal<Option<Flash>>) -> impl IntoView {
    move || {
        flash.get().map(|flash| {
            view! {
                <div class="mt-4">
                    <Alert kind=flash.kind.into() message=flash.message />
                </div>
            }
        })
    }
}
