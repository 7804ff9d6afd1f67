use leptos::prelude::*;

/// DateInput component with native date picker
/// Value and callback both use yyyy-mm-dd; the browser shows its locale format.
#[component]
pub fn DateInput(
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd, or "" when cleared)
    on_change: Callback<String>,
    #[prop(optional, into)]
    title: String,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="form__input form__input--date"
            title=title
            prop:value=value
            on:change=move |ev| on_change.run(event_target_value(&ev))
        />
    }
}
