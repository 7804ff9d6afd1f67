use super::comments::CommentPanel;
use crate::order_tracking::store::{use_order_tracking_store, OrderTrackingStore};
use crate::shared::icons::icon;
use contracts::order_tracking::orders::{OrderType, Priority};
use contracts::order_tracking::table::{RowView, SectionView, EMPTY_MESSAGE, ERROR_MESSAGE, TABLE_HEADER};
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;

#[component]
pub fn OrdersTable() -> impl IntoView {
    let store = use_order_tracking_store();
    let table = Memo::new(move |_| store.session.with(|s| s.table()));
    let drafts = RwSignal::new(HashMap::<String, String>::new());

    view! {
        <div class="orders-info-bar">{move || table.with(|t| t.info_bar.clone())}</div>
        <div class="orders-accordion">
            <div class="accordion-header-row">
                {TABLE_HEADER.iter().map(|title| view! { <div>{*title}</div> }).collect_view()}
            </div>
            {move || {
                let view_model = table.get();
                if view_model.loading {
                    view! {
                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small style="padding: 40px;">
                            <Spinner />
                            "Loading orders..."
                        </Flex>
                    }.into_any()
                } else if view_model.error {
                    view! { <div class="section-header">{ERROR_MESSAGE}</div> }.into_any()
                } else if view_model.is_empty() {
                    view! { <div class="section-header">{EMPTY_MESSAGE}</div> }.into_any()
                } else {
                    view_model
                        .sections
                        .into_iter()
                        .map(|section| order_section(store, section, drafts))
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

fn order_section(
    store: OrderTrackingStore,
    section: SectionView,
    drafts: RwSignal<HashMap<String, String>>,
) -> impl IntoView {
    let priority = section.priority;
    let header_class = if priority == Priority::Urgent {
        "section-header section-header-urgent"
    } else {
        "section-header"
    };

    view! {
        <div class="order-section">
            <div class=header_class>{section.title}</div>
            {section
                .rows
                .into_iter()
                .map(|row| order_row(store, row, drafts))
                .collect_view()}
            {section.load_more.map(|load_more| {
                let loading = load_more.loading;
                view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        class="load-more-btn"
                        disabled=loading
                        on_click=move |_| store.load_more(priority)
                    >
                        {loading.then(|| view! { <Spinner /> })}
                        {load_more.label()}
                    </Button>
                }
            })}
        </div>
    }
}

fn type_badge_color(order_type: OrderType) -> BadgeColor {
    match order_type {
        OrderType::Lab => BadgeColor::Informative,
        OrderType::Imaging => BadgeColor::Brand,
        OrderType::Referral => BadgeColor::Success,
    }
}

fn order_row(
    store: OrderTrackingStore,
    row: RowView,
    drafts: RwSignal<HashMap<String, String>>,
) -> impl IntoView {
    let RowView {
        order_id,
        order_type,
        urgent,
        patient_name,
        patient_href,
        dob,
        order_name,
        order_href,
        provider,
        sent_to,
        status,
        status_badge,
        ordered_date,
        expandable,
        expanded,
    } = row;

    let toggle_id = order_id.clone();
    let on_header_click = move |_| {
        if expandable {
            store.toggle_row(toggle_id.clone());
        }
    };

    view! {
        <div
            class="accordion-item"
            class:accordion-item--urgent=urgent
            class:accordion-item--open=expanded
        >
            <div
                class="accordion-header"
                class:accordion-header--expandable=expandable
                on:click=on_header_click
            >
                <div class="column-value">
                    <a href=patient_href target="_top" on:click=|e| e.stop_propagation()>
                        {patient_name}
                    </a>
                </div>
                <div class="column-value">{dob}</div>
                <div class="column-value">
                    <a href=order_href target="_top" on:click=|e| e.stop_propagation()>
                        {order_name}
                    </a>
                </div>
                <div class="column-value">
                    <Badge appearance=BadgeAppearance::Tint color=type_badge_color(order_type)>
                        {order_type.label()}
                    </Badge>
                </div>
                <div class="column-value">{provider}</div>
                <div class="column-value">{sent_to}</div>
                <div class="column-value">
                    <span class=status_badge.class()>{status}</span>
                </div>
                <div class="column-value">{ordered_date}</div>
                <div class="expand-icon">
                    {expandable.then(|| {
                        if expanded {
                            icon("chevron-down")
                        } else {
                            icon("message")
                        }
                    })}
                </div>
            </div>
            {expanded.then(|| view! { <CommentPanel order_id=order_id drafts=drafts /> })}
        </div>
    }
}
