use leptos::prelude::*;

/// Plain textarea; the owner keeps the value
#[component]
pub fn Textarea(
    #[prop(into)]
    value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    rows: Option<u32>,
) -> impl IntoView {
    let textarea_placeholder = move || placeholder.get().unwrap_or_default();

    view! {
        <textarea
            class="form__textarea"
            placeholder=textarea_placeholder
            disabled=move || disabled.get()
            rows=rows.unwrap_or(2)
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        ></textarea>
    }
}
