use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

/// Text filter input.
///
/// Every keystroke goes to `on_input`; debouncing is the caller's business.
/// Enter is reported separately so the caller can skip the delay.
#[component]
pub fn TextFilterInput(
    #[prop(into)]
    value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)]
    on_enter: Option<Callback<()>>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    view! {
        <input
            type="text"
            class="form__input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
            on:keydown=move |ev: KeyboardEvent| {
                if ev.key() == "Enter" {
                    ev.prevent_default();
                    if let Some(handler) = on_enter {
                        handler.run(());
                    }
                }
            }
        />
    }
}
