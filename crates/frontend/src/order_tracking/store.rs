//! Reactive wrapper around [`OrderTrackingSession`].
//!
//! Components call the store; the store mutates the session signal and
//! performs whatever requests the session hands back.

use super::api;
use crate::config::ClientConfig;
use chrono::NaiveDate;
use contracts::order_tracking::filters::{FilterCategory, TextField};
use contracts::order_tracking::orders::Priority;
use contracts::order_tracking::pagination::FetchOutcome;
use contracts::order_tracking::query::CommentsQuery;
use contracts::order_tracking::session::{
    OptionSource, OrderTrackingSession, OrdersRequest, SessionSettings, TextChange,
};
use gloo_timers::future::TimeoutFuture;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct OrderTrackingStore {
    pub session: RwSignal<OrderTrackingSession>,
    config: StoredValue<ClientConfig>,
}

impl OrderTrackingStore {
    pub fn new(config: ClientConfig) -> Self {
        let session = OrderTrackingSession::new(&SessionSettings {
            comments_enabled: config.enable_task_comments,
            chart_application: config.patient_chart_application.clone(),
        });
        Self {
            session: RwSignal::new(session),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    fn mutate<T: Default>(&self, f: impl FnOnce(&mut OrderTrackingSession) -> T) -> T {
        self.session.try_update(f).unwrap_or_default()
    }

    /// Startup: defaults, saved filters, dropdown options, then the first
    /// page of both buckets.
    pub fn initialize(self) {
        let config = self.config();
        self.session
            .update(|s| s.apply_default_dates(today(), config.date_lookback_days));

        spawn_local(async move {
            match api::fetch_saved_filters(&self.config()).await {
                Ok(filters) => self.session.update(|s| s.load_saved_filters(filters)),
                Err(e) => log::warn!("Failed to load saved filters: {}", e),
            }
        });

        spawn_local(async move {
            let config = self.config();
            match api::fetch_providers(&config).await {
                Ok(providers) => self.session.update(|s| s.load_providers(providers)),
                Err(e) => {
                    log::error!("Failed to fetch providers: {}", e);
                    self.session.update(|s| s.options_failed(OptionSource::Providers));
                }
            }
            match api::fetch_locations(&config).await {
                Ok(locations) => self.session.update(|s| s.load_locations(locations)),
                Err(e) => {
                    log::error!("Failed to fetch locations: {}", e);
                    self.session.update(|s| s.options_failed(OptionSource::Locations));
                }
            }
            let requests = self.mutate(|s| s.filter_changed());
            self.dispatch(requests);
        });
    }

    fn dispatch(self, requests: Vec<OrdersRequest>) {
        for request in requests {
            self.fetch_bucket(request);
        }
    }

    fn fetch_bucket(self, request: OrdersRequest) {
        spawn_local(async move {
            let OrdersRequest { ticket, query } = request;
            let outcome = match api::fetch_orders(&self.config(), &query).await {
                Ok(response) => self.session.try_update(|s| s.complete_orders(ticket, response)),
                Err(e) => {
                    log::error!("Error fetching {} orders: {}", ticket.priority, e);
                    self.session.try_update(|s| s.fail_orders(ticket))
                }
            };
            if outcome == Some(FetchOutcome::Stale) {
                log::debug!(
                    "Dropped stale {} page {} response",
                    ticket.priority,
                    ticket.page
                );
            }
        });
    }

    // ---- filters -------------------------------------------------------

    pub fn toggle_option(self, category: FilterCategory, value: String, checked: bool) {
        let requests = self.mutate(|s| s.toggle_option(category, &value, checked));
        self.dispatch(requests);
    }

    pub fn check_all(self, category: FilterCategory) {
        let requests = self.mutate(|s| s.check_all(category));
        self.dispatch(requests);
    }

    pub fn select_location(self, value: String) {
        let requests = self.mutate(|s| s.select_location(&value));
        self.dispatch(requests);
    }

    pub fn set_text(self, field: TextField, value: String) {
        let change = self.session.try_update(|s| s.set_text(field, value));
        match change {
            Some(TextChange::Fetch(requests)) => self.dispatch(requests),
            Some(TextChange::Debounce(ticket)) => {
                let delay = self.config.with_value(|c| c.debounce_ms);
                spawn_local(async move {
                    TimeoutFuture::new(delay).await;
                    let requests = self.mutate(|s| s.debounce_elapsed(ticket));
                    self.dispatch(requests);
                });
            }
            None => {}
        }
    }

    /// Enter pressed in a debounced input
    pub fn confirm_text(self) {
        let requests = self.mutate(|s| s.confirm_text());
        self.dispatch(requests);
    }

    pub fn clear_all(self) {
        let requests = self.mutate(|s| s.clear_all());
        self.dispatch(requests);
    }

    pub fn load_more(self, priority: Priority) {
        if let Some(request) = self.mutate(|s| s.load_more(priority)) {
            self.fetch_bucket(request);
        }
    }

    // ---- saved filters -------------------------------------------------

    pub fn apply_saved(self, id: String) {
        let requests = self.mutate(|s| s.apply_saved(&id));
        self.dispatch(requests);
    }

    /// Save the current filters under `name`. `on_saved` runs after the
    /// server accepted it; failures alert and leave the caller as is.
    pub fn save_filter(self, name: String, on_saved: impl FnOnce() + 'static) {
        let now = js_sys::Date::now() as i64;
        let draft = match self.session.try_update(|s| s.begin_save(&name, now)) {
            Some(Ok(Some(draft))) => draft,
            Some(Ok(None)) | None => return,
            Some(Err(e)) => {
                alert("Please enter a filter name");
                log!("Rejected saved filter: {}", e);
                return;
            }
        };

        spawn_local(async move {
            match api::save_filter(&self.config(), &draft).await {
                Ok(saved) => {
                    self.session.update(|s| s.finish_save(Some(saved)));
                    on_saved();
                }
                Err(e) => {
                    log::error!("Error saving filter: {}", e);
                    self.session.update(|s| s.finish_save(None));
                    alert("Error saving filter. Please try again.");
                }
            }
        });
    }

    pub fn remove_filter(self, id: String) {
        if !confirm("Are you sure you want to delete this saved filter?") {
            return;
        }
        spawn_local(async move {
            match api::delete_filter(&self.config(), &id).await {
                Ok(()) => {
                    self.session.update(|s| {
                        s.remove_saved(&id);
                    });
                }
                Err(e) => {
                    log::error!("Error deleting filter: {}", e);
                    alert("Error deleting filter. Please try again.");
                }
            }
        });
    }

    // ---- comments ------------------------------------------------------

    pub fn toggle_row(self, order_id: String) {
        if let Some(query) = self.mutate(|s| s.toggle_row(&order_id)) {
            self.load_comments(order_id, query);
        }
    }

    fn load_comments(self, order_id: String, query: CommentsQuery) {
        spawn_local(async move {
            let result = api::fetch_comments(&self.config(), &query).await;
            if let Err(e) = &result {
                log::error!("Error loading comments for {}: {}", order_id, e);
            }
            self.session.update(|s| s.comments_loaded(&order_id, result));
        });
    }

    /// Post a comment and reload the thread. `on_done` receives whether
    /// the comment was stored.
    pub fn add_comment(self, order_id: String, text: String, on_done: impl FnOnce(bool) + 'static) {
        let request = match self.session.with_untracked(|s| s.comment_request(&order_id, &text)) {
            Ok(request) => request,
            Err(e) => {
                log!("Comment not sent: {}", e);
                on_done(false);
                return;
            }
        };

        spawn_local(async move {
            match api::add_comment(&self.config(), &request).await {
                Ok(()) => {
                    on_done(true);
                    if let Some(query) = self.mutate(|s| s.comment_added(&order_id)) {
                        self.load_comments(order_id, query);
                    }
                }
                Err(e) => {
                    log::error!("Error adding comment: {}", e);
                    alert("Failed to add comment");
                    on_done(false);
                }
            }
        });
    }
}

fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

pub fn use_order_tracking_store() -> OrderTrackingStore {
    use_context::<OrderTrackingStore>().expect("OrderTrackingStore context not found")
}
