use gloo_timers::callback::Timeout;
use yew::prelude::*;

const DISMISS_MS: u32 = 4_000;

/// Show a transient message on a page-owned toast state and clear it
/// after a few seconds.
pub fn flash(state: &UseStateHandle<Option<String>>, text: &str) {
    state.set(Some(text.to_string()));
    let state = state.clone();
    Timeout::new(DISMISS_MS, move || state.set(None)).forget();
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: Option<String>,
    #[prop_or_default]
    pub error: bool,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };
    let class = if props.error {
        "mt-3 p-3 rounded-lg bg-red-50 border border-red-200 text-red-700 text-sm"
    } else {
        "mt-3 p-3 rounded-lg bg-green-50 border border-green-200 text-green-700 text-sm"
    };
    html! {
        <div class={class}>{ message.clone() }</div>
    }
}
