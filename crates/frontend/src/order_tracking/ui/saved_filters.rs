use crate::order_tracking::store::use_order_tracking_store;
use crate::shared::icons::icon;
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use thaw::*;

/// Saved filter pills plus the "save current" dialog
#[component]
pub fn SavedFilterBar() -> impl IntoView {
    let store = use_order_tracking_store();
    let session = store.session;
    let dialog_open = RwSignal::new(false);
    let name = RwSignal::new(String::new());

    let filters = Memo::new(move |_| session.with(|s| s.saved().filters().to_vec()));
    let can_save = Signal::derive(move || session.with(|s| s.can_save()));
    let saving = Signal::derive(move || session.with(|s| s.saved().is_saving()));

    let submit = move || {
        store.save_filter(name.get_untracked(), move || {
            dialog_open.set(false);
            name.set(String::new());
        });
    };

    view! {
        <Flex align=FlexAlign::Center justify=FlexJustify::SpaceBetween style="margin-bottom: 12px;">
            <div class="saved-filters__list">
                {move || {
                    let list = filters.get();
                    if list.is_empty() {
                        view! { <span class="no-saved-filters">"No saved filters yet"</span> }.into_any()
                    } else {
                        list.into_iter()
                            .map(|filter| {
                                let apply_id = filter.id.clone();
                                let remove_id = filter.id.clone();
                                view! {
                                    <span
                                        class="saved-filter-pill"
                                        on:click=move |_| store.apply_saved(apply_id.clone())
                                    >
                                        <span class="filter-name" title=filter.name.clone()>
                                            {filter.name.clone()}
                                        </span>
                                        <span
                                            class="remove-filter"
                                            title="Remove filter"
                                            on:click=move |e| {
                                                e.stop_propagation();
                                                store.remove_filter(remove_id.clone());
                                            }
                                        >
                                            {icon("x")}
                                        </span>
                                    </span>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
            <Button
                appearance=ButtonAppearance::Secondary
                size=ButtonSize::Small
                disabled=Signal::derive(move || !can_save.get())
                on_click=move |_| open_save_dialog(dialog_open, name)
            >
                {icon("bookmark")}
                " Save current as filter"
            </Button>
        </Flex>

        <Dialog open=dialog_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Save filter"</DialogTitle>
                    <DialogContent>
                        <div on:keydown=move |ev: KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit();
                            }
                        }>
                            <Input value=name placeholder="Filter name" />
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| dialog_open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=saving
                            on_click=move |_| submit()
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Every save starts from an empty name, including after a cancel
fn open_save_dialog(dialog_open: RwSignal<bool>, name: RwSignal<String>) {
    name.set(String::new());
    dialog_open.set(true);
}
