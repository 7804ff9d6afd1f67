use crate::config::ClientConfig;
use crate::order_tracking::store::OrderTrackingStore;
use crate::order_tracking::ui::OrderTrackingPage;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    // One store for the whole plugin page
    provide_context(OrderTrackingStore::new(config));

    view! {
        <ConfigProvider>
            <OrderTrackingPage />
        </ConfigProvider>
    }
}
