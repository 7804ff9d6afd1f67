use leptos::prelude::*;

/// Single-select dropdown. The first entry of `options` is the "All" choice.
#[component]
pub fn Select(
    /// Current value
    #[prop(into)]
    value: Signal<String>,
    /// Change event handler
    on_change: Callback<String>,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();

    view! {
        <select
            id=select_id
            class="form__select"
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <For
                each=move || options.get()
                key=|(val, label)| (val.clone(), label.clone())
                children=move |(val, label)| {
                    let val_clone = val.clone();
                    let is_selected = move || value.get() == val_clone;
                    view! {
                        <option value=val prop:selected=is_selected>
                            {label}
                        </option>
                    }
                }
            />
        </select>
    }
}
