use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonStyle {
    #[default]
    Primary,
    Outline,
}

impl ButtonStyle {
    fn class(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "btn btn-primary",
            ButtonStyle::Outline => "btn btn-outline",
        }
    }
}

/// Styled button. While `disabled` holds and a `busy_label` is given, the label
/// replaces the children.
#[component]
pub fn Button(
    #[prop(optional)] button_type: Option<&'static str>,
    #[prop(optional, into, default = Signal::from(false))] disabled: Signal<bool>,
    #[prop(optional)] style: ButtonStyle,
    #[prop(optional)] full_width: bool,
    #[prop(optional)] busy_label: Option<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <button
            type=button_type.unwrap_or("button")
            class=style.class()
            class:btn-full=full_width
            class:opacity-70=move || disabled.get()
            disabled=move || disabled.get()
        >
            {move || match busy_label {
                Some(label) if disabled.get() => label.into_any(),
                _ => children().into_any(),
            }}
        </button>
    }
}
