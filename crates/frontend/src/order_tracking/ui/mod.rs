pub mod comments;
pub mod filters;
pub mod saved_filters;
pub mod table;

use self::filters::OrderFilters;
use self::saved_filters::SavedFilterBar;
use self::table::OrdersTable;
use crate::order_tracking::store::use_order_tracking_store;
use leptos::prelude::*;

#[component]
pub fn OrderTrackingPage() -> impl IntoView {
    let store = use_order_tracking_store();

    // Load on mount
    Effect::new(move |_| store.initialize());

    view! {
        <div class="order-tracking" style="padding: 20px;">
            <h2 style="margin: 0 0 16px 0; font-size: 22px; font-weight: bold;">"Order Tracking"</h2>
            <SavedFilterBar />
            <OrderFilters />
            <OrdersTable />
        </div>
    }
}
