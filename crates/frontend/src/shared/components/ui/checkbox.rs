use leptos::prelude::*;
use web_sys::HtmlInputElement;

/// Checkbox bound to external state.
///
/// `on_change` receives the new checked value and answers whether the
/// change was taken. A refused change is reverted in the DOM, since the
/// bound signal did not move.
#[component]
pub fn Checkbox(
    /// Label text
    #[prop(into)]
    label: String,
    /// Checked state
    #[prop(into)]
    checked: Signal<bool>,
    on_change: Callback<bool, bool>,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let wrapper_class = move || {
        format!(
            "form__checkbox-wrapper {}",
            class.get().unwrap_or_default()
        )
    };

    view! {
        <label class=wrapper_class>
            <input
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    let input = event_target::<HtmlInputElement>(&ev);
                    let value = input.checked();
                    if !on_change.run(value) {
                        input.set_checked(!value);
                    }
                }
            />
            <span class="form__checkbox-label">{label}</span>
        </label>
    }
}
