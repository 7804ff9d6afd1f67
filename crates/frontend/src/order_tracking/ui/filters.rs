use crate::order_tracking::store::use_order_tracking_store;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::ui::{Checkbox, Select, TextFilterInput};
use crate::shared::icons::icon;
use contracts::order_tracking::filters::{FilterCategory, LocationSelect, TextField};
use leptos::children::ToChildren;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn OrderFilters() -> impl IntoView {
    let store = use_order_tracking_store();
    let session = store.session;
    let is_expanded = RwSignal::new(true);
    let active_count = Signal::derive(move || session.with(|s| s.controls().active_filter_count()));

    let text_value = move |field: TextField| {
        Signal::derive(move || session.with(|s| s.controls().text(field).to_string()))
    };
    let on_text = move |field: TextField| Callback::new(move |v: String| store.set_text(field, v));
    let on_enter = Callback::new(move |_: ()| store.confirm_text());

    let location_options = Signal::derive(move || {
        session.with(|s| {
            std::iter::once((String::new(), LocationSelect::ALL_LABEL.to_string()))
                .chain(
                    s.controls()
                        .location
                        .options()
                        .iter()
                        .map(|o| (o.value.clone(), o.name.clone())),
                )
                .collect::<Vec<_>>()
        })
    });
    let option_errors = move || {
        session
            .with(|s| s.option_errors().to_vec())
            .into_iter()
            .map(|source| view! { <div class="order-filters__error">{source.message()}</div> })
            .collect_view()
    };
    let location_value = Signal::derive(move || session.with(|s| s.controls().location.value().to_string()));

    let tags = move || {
        FilterCategory::ALL
            .into_iter()
            .flat_map(|category| {
                session
                    .with(|s| s.controls().group(category).selected().to_vec())
                    .into_iter()
                    .map(move |value| {
                        let label = value.clone();
                        view! {
                            <FilterTag
                                label=label
                                on_remove=Callback::new(move |_: ()| {
                                    store.toggle_option(category, value.clone(), false)
                                })
                            />
                        }
                    })
            })
            .collect_view()
    };

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_count
            header_actions=ChildrenFn::to_children(move || view! {
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || active_count.get() == 0)
                    on_click=move |_| store.clear_all()
                >
                    {icon("x")}
                    " Clear all"
                </Button>
            })
            filter_content=ChildrenFn::to_children(move || view! {
                {option_errors}
                <div class="order-filters__grid">
                    <ChecklistDropdown category=FilterCategory::Providers />
                    <ChecklistDropdown category=FilterCategory::Types />
                    <ChecklistDropdown category=FilterCategory::Statuses />
                    <Select
                        id="location-dropdown"
                        value=location_value
                        options=location_options
                        on_change=Callback::new(move |v: String| store.select_location(v))
                    />
                    <TextFilterInput
                        value=text_value(TextField::PatientName)
                        on_input=on_text(TextField::PatientName)
                        on_enter=on_enter
                        placeholder="Patient name"
                    />
                    <label class="form__field">
                        <span class="form__label">"DOB"</span>
                        <DateInput
                            value=text_value(TextField::PatientDob)
                            on_change=on_text(TextField::PatientDob)
                            title="Patient date of birth"
                        />
                    </label>
                    <TextFilterInput
                        value=text_value(TextField::SentTo)
                        on_input=on_text(TextField::SentTo)
                        on_enter=on_enter
                        placeholder="Sent to"
                    />
                    <label class="form__field">
                        <span class="form__label">"From"</span>
                        <DateInput
                            value=text_value(TextField::DateFrom)
                            on_change=on_text(TextField::DateFrom)
                        />
                    </label>
                    <label class="form__field">
                        <span class="form__label">"To"</span>
                        <DateInput
                            value=text_value(TextField::DateTo)
                            on_change=on_text(TextField::DateTo)
                        />
                    </label>
                </div>
            })
            filter_tags=ChildrenFn::to_children(tags)
        />
    }
}

/// Multi-select with an "All ..." entry on top
#[component]
fn ChecklistDropdown(category: FilterCategory) -> impl IntoView {
    let store = use_order_tracking_store();
    let session = store.session;
    let open = RwSignal::new(false);

    let options = Memo::new(move |_| session.with(|s| s.controls().group(category).options().to_vec()));
    let is_all = Signal::derive(move || session.with(|s| s.controls().group(category).is_all()));
    let summary = move || {
        session.with(|s| {
            let group = s.controls().group(category);
            if group.is_all() {
                category.all_label().to_string()
            } else {
                group.selected().join(", ")
            }
        })
    };

    view! {
        <div
            class="dropdown"
            class:dropdown--open=move || open.get()
            id=format!("{}-dropdown", category.key())
        >
            <button
                type="button"
                class="dropdown__toggle"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span class="dropdown__value">{summary}</span>
                {icon("chevron-down")}
            </button>
            <Show when=move || open.get()>
                <div class="dropdown__menu">
                    <Checkbox
                        label=category.all_label()
                        checked=is_all
                        on_change=Callback::new(move |checked: bool| {
                            // "All" can only be switched on; it goes off by picking something
                            if checked {
                                store.check_all(category);
                            }
                            checked
                        })
                    />
                    <For
                        each=move || options.get()
                        key=|option| option.clone()
                        children=move |option: String| {
                            let value = option.clone();
                            let checked = Signal::derive(move || {
                                session.with(|s| s.controls().group(category).is_checked(&value))
                            });
                            let value = option.clone();
                            view! {
                                <Checkbox
                                    label=option
                                    checked=checked
                                    on_change=Callback::new(move |checked: bool| {
                                        store.toggle_option(category, value.clone(), checked);
                                        true
                                    })
                                />
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
