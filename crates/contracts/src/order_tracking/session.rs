//! Single owner of the worklist state.
//!
//! Every user gesture maps to one method. Methods that need the network
//! return request descriptions instead of performing I/O; the caller sends
//! them and feeds the results back (`complete_orders`, `comments_loaded`,
//! ...). This keeps the whole page testable without a browser.

use super::comments::{AccordionState, TaskComment, ToggleOutcome};
use super::filters::{FilterCategory, FilterControls, FilterState, TextField};
use super::pagination::{FetchOutcome, FetchTicket, OrderBuckets};
use super::providers::{LocationOption, ProviderDirectory};
use super::query::{CommentsQuery, OrdersQuery};
use super::request::AddCommentRequest;
use super::response::{OrdersResponse, ProvidersResponse};
use super::saved_filters::{SavedFilter, SavedFilterStore};
use super::orders::Priority;
use super::table::{render_table, ChartLinks, TableView};
use crate::error::{OrderTrackingError, Result};
use crate::shared::date_utils::lookback_date;
use crate::shared::debounce::DebounceGate;
use chrono::NaiveDate;

/// One page load to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersRequest {
    pub ticket: FetchTicket,
    pub query: OrdersQuery,
}

/// Result of editing a text or date input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// Applied immediately
    Fetch(Vec<OrdersRequest>),
    /// Arm a timer and call [`OrderTrackingSession::debounce_elapsed`] with this ticket
    Debounce(u64),
}

/// Dropdown whose options come from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    Providers,
    Locations,
}

impl OptionSource {
    pub fn message(self) -> &'static str {
        match self {
            OptionSource::Providers => "Error loading providers",
            OptionSource::Locations => "Error loading locations",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    pub comments_enabled: bool,
    pub chart_application: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTrackingSession {
    controls: FilterControls,
    directory: ProviderDirectory,
    saved: SavedFilterStore,
    buckets: OrderBuckets,
    accordion: AccordionState,
    debounce: DebounceGate,
    links: ChartLinks,
    option_errors: Vec<OptionSource>,
}

impl Default for OrderTrackingSession {
    fn default() -> Self {
        Self::new(&SessionSettings {
            comments_enabled: true,
            chart_application: String::new(),
        })
    }
}

impl OrderTrackingSession {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            controls: FilterControls::default(),
            directory: ProviderDirectory::default(),
            saved: SavedFilterStore::default(),
            buckets: OrderBuckets::default(),
            accordion: AccordionState::new(settings.comments_enabled),
            debounce: DebounceGate::new(),
            links: ChartLinks::new(&settings.chart_application),
            option_errors: Vec::new(),
        }
    }

    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn saved(&self) -> &SavedFilterStore {
        &self.saved
    }

    pub fn buckets(&self) -> &OrderBuckets {
        &self.buckets
    }

    pub fn accordion(&self) -> &AccordionState {
        &self.accordion
    }

    pub fn directory(&self) -> &ProviderDirectory {
        &self.directory
    }

    pub fn filter_state(&self) -> FilterState {
        self.controls.read()
    }

    /// "Save current as filter" is only offered when something is filtered
    pub fn can_save(&self) -> bool {
        self.controls.has_active_filters()
    }

    pub fn table(&self) -> TableView {
        render_table(&self.buckets, &self.accordion, &self.links)
    }

    /// Dropdowns left without options because their load failed
    pub fn option_errors(&self) -> &[OptionSource] {
        &self.option_errors
    }

    // ---- startup -------------------------------------------------------

    /// Default date range start: `lookback_days` before `today`
    pub fn apply_default_dates(&mut self, today: NaiveDate, lookback_days: i64) {
        if self.controls.text(TextField::DateFrom).is_empty() {
            self.controls
                .set_text(TextField::DateFrom, lookback_date(today, lookback_days));
        }
    }

    /// Fill the provider dropdown. The logged-in staff member is
    /// pre-selected when they are one of the ordering providers.
    pub fn load_providers(&mut self, response: ProvidersResponse) {
        self.option_errors.retain(|s| *s != OptionSource::Providers);
        self.directory = ProviderDirectory::from_response(response);
        self.controls.providers.set_options(self.directory.names());
        if let Some(name) = self.directory.logged_in_provider_name().map(str::to_string) {
            self.controls.providers.set_checked(&name, true);
        }
    }

    pub fn load_locations(&mut self, locations: Vec<LocationOption>) {
        self.option_errors.retain(|s| *s != OptionSource::Locations);
        self.controls.location.set_options(locations);
    }

    pub fn options_failed(&mut self, source: OptionSource) {
        if !self.option_errors.contains(&source) {
            self.option_errors.push(source);
        }
    }

    pub fn load_saved_filters(&mut self, filters: Vec<SavedFilter>) {
        self.saved.replace_all(filters);
    }

    // ---- filters -------------------------------------------------------

    /// Reset both buckets and start page 1 of each. Every filter mutation
    /// ends here.
    pub fn filter_changed(&mut self) -> Vec<OrdersRequest> {
        self.debounce.cancel();
        self.buckets.reset();
        self.accordion.close_all();
        Priority::ALL
            .into_iter()
            .filter_map(|priority| self.begin_orders(priority))
            .collect()
    }

    pub fn toggle_option(
        &mut self,
        category: FilterCategory,
        value: &str,
        checked: bool,
    ) -> Vec<OrdersRequest> {
        self.controls.group_mut(category).set_checked(value, checked);
        self.filter_changed()
    }

    pub fn check_all(&mut self, category: FilterCategory) -> Vec<OrdersRequest> {
        self.controls.group_mut(category).check_all();
        self.filter_changed()
    }

    pub fn select_location(&mut self, value: &str) -> Vec<OrdersRequest> {
        self.controls.location.select(value);
        self.filter_changed()
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> TextChange {
        self.controls.set_text(field, value);
        if field.is_debounced() {
            TextChange::Debounce(self.debounce.schedule())
        } else {
            TextChange::Fetch(self.filter_changed())
        }
    }

    /// Timer callback for a debounced input; empty unless `ticket` is the
    /// latest one.
    pub fn debounce_elapsed(&mut self, ticket: u64) -> Vec<OrdersRequest> {
        if self.debounce.fire(ticket) {
            self.filter_changed()
        } else {
            Vec::new()
        }
    }

    /// Enter in a debounced input: skip the rest of the window
    pub fn confirm_text(&mut self) -> Vec<OrdersRequest> {
        self.debounce.flush();
        self.filter_changed()
    }

    pub fn clear_all(&mut self) -> Vec<OrdersRequest> {
        self.controls.clear_all();
        self.filter_changed()
    }

    // ---- saved filters -------------------------------------------------

    /// Apply a cached preset to the controls. Unknown ids do nothing.
    pub fn apply_saved(&mut self, id: &str) -> Vec<OrdersRequest> {
        let Some(filters) = self.saved.find(id).map(|f| f.filters.clone()) else {
            return Vec::new();
        };
        self.controls.apply(&filters);
        self.filter_changed()
    }

    pub fn begin_save(&mut self, name: &str, now_millis: i64) -> Result<Option<SavedFilter>> {
        let filters = self.controls.read();
        self.saved.begin_save(name, filters, now_millis)
    }

    pub fn finish_save(&mut self, saved: Option<SavedFilter>) {
        self.saved.finish_save(saved);
    }

    pub fn remove_saved(&mut self, id: &str) -> bool {
        self.saved.remove(id)
    }

    // ---- orders --------------------------------------------------------

    /// "Load More" for one bucket; `None` while it is loading or exhausted
    pub fn load_more(&mut self, priority: Priority) -> Option<OrdersRequest> {
        self.begin_orders(priority)
    }

    fn begin_orders(&mut self, priority: Priority) -> Option<OrdersRequest> {
        let ticket = self.buckets.begin_fetch(priority)?;
        let query = OrdersQuery::build(
            &self.controls.read(),
            &self.directory,
            ticket.page,
            priority,
        );
        Some(OrdersRequest { ticket, query })
    }

    pub fn complete_orders(&mut self, ticket: FetchTicket, response: OrdersResponse) -> FetchOutcome {
        self.buckets.complete_fetch(ticket, response)
    }

    pub fn fail_orders(&mut self, ticket: FetchTicket) -> FetchOutcome {
        self.buckets.fail_fetch(ticket)
    }

    // ---- comments ------------------------------------------------------

    /// Expand or collapse a row; returns the comment query when the thread
    /// must be fetched.
    pub fn toggle_row(&mut self, order_id: &str) -> Option<CommentsQuery> {
        let order_type = self.buckets.find_order(order_id)?.order_type;
        match self.accordion.toggle(order_id, order_type) {
            ToggleOutcome::Opened { load: true } => {
                Some(CommentsQuery::for_order(order_type, order_id))
            }
            _ => None,
        }
    }

    pub fn comments_loaded(&mut self, order_id: &str, result: Result<Vec<TaskComment>>) {
        self.accordion.finish_load(order_id, result);
    }

    pub fn comment_request(&self, order_id: &str, text: &str) -> Result<AddCommentRequest> {
        let order = self
            .buckets
            .find_order(order_id)
            .ok_or_else(|| OrderTrackingError::validation(format!("unknown order {}", order_id)))?;
        let task_id = self.accordion.thread(order_id).and_then(|t| t.task_id());
        AddCommentRequest::new(order, task_id, text)
    }

    /// A comment was stored; reload that row's thread
    pub fn comment_added(&mut self, order_id: &str) -> Option<CommentsQuery> {
        let order_type = self.buckets.find_order(order_id)?.order_type;
        self.accordion.begin_reload(order_id);
        Some(CommentsQuery::for_order(order_type, order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_tracking::pagination::PaginationState;

    fn session() -> OrderTrackingSession {
        let mut session = OrderTrackingSession::default();
        session.load_providers(
            serde_json::from_str(
                r#"{"logged_in_staff_id": "s-9", "providers": [
                    {"id": "s-1", "preferred_name": "Dr. Lee"},
                    {"id": "s-2", "preferred_name": "Dr. Patel"}
                ]}"#,
            )
            .unwrap(),
        );
        session
    }

    fn page(priority: Priority, start: usize, len: usize, total: u32, has_next: bool) -> OrdersResponse {
        let orders: Vec<serde_json::Value> = (start..start + len)
            .map(|i| serde_json::json!({"id": format!("{}-{}", priority, i), "type": "Referral"}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "orders": orders,
            "count": {priority.as_str(): total},
            "pagination": {"has_next": has_next}
        }))
        .unwrap()
    }

    fn finish_all(session: &mut OrderTrackingSession, requests: Vec<OrdersRequest>) {
        for request in requests {
            let p = request.ticket.priority;
            session.complete_orders(request.ticket, page(p, 0, 20, 60, true));
        }
    }

    #[test]
    fn test_saved_filter_reload_reproduces_state() {
        let mut before_reload = session();
        before_reload.clear_all();
        before_reload.toggle_option(FilterCategory::Providers, "Dr. Lee", true);
        before_reload.set_text(TextField::DateFrom, "2024-01-01");

        let draft = before_reload
            .begin_save("My Clinic AM", 1_704_100_000_000)
            .unwrap()
            .unwrap();
        before_reload.finish_save(Some(draft.clone()));
        let persisted = serde_json::to_string(&vec![draft]).unwrap();

        // fresh page: only what the backend stored survives
        let mut after_reload = session();
        after_reload.load_saved_filters(serde_json::from_str(&persisted).unwrap());
        let requests = after_reload.apply_saved("1704100000000");

        let expected = FilterState {
            providers: vec!["Dr. Lee".into()],
            date_from: "2024-01-01".into(),
            ..Default::default()
        };
        assert_eq!(after_reload.filter_state(), expected);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].ticket.priority, Priority::Urgent);
        assert_eq!(requests[1].ticket.priority, Priority::Routine);
        for request in &requests {
            assert_eq!(request.query.provider_ids.as_deref(), Some("s-1"));
            assert_eq!(request.query.date_from.as_deref(), Some("2024-01-01"));
            assert_eq!(request.query.page, 1);
        }
    }

    #[test]
    fn test_filter_change_resets_both_buckets() {
        let mut session = session();
        let requests = session.filter_changed();
        finish_all(&mut session, requests);
        for _ in 0..2 {
            let request = session.load_more(Priority::Urgent).unwrap();
            session.complete_orders(request.ticket, page(Priority::Urgent, 20, 10, 60, true));
        }
        let urgent = session.buckets().bucket(Priority::Urgent);
        assert_eq!(urgent.orders.len(), 40);
        assert_eq!(urgent.pagination.page, 4);

        let requests = match session.set_text(TextField::PatientDob, "1980-02-03") {
            TextChange::Fetch(requests) => requests,
            other => panic!("date inputs apply immediately, got {:?}", other),
        };

        for priority in Priority::ALL {
            let bucket = session.buckets().bucket(priority);
            assert!(bucket.orders.is_empty());
            assert_eq!(bucket.pagination.page, 1);
            assert!(bucket.pagination.has_more);
            assert_eq!(bucket.pagination.total, 0);
        }
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.query.page == 1));
        assert!(requests
            .iter()
            .all(|r| r.query.patient_dob.as_deref() == Some("1980-02-03")));
    }

    #[test]
    fn test_load_more_while_loading_is_noop() {
        let mut session = session();
        let requests = session.filter_changed();
        let routine = requests
            .into_iter()
            .find(|r| r.ticket.priority == Priority::Routine)
            .unwrap();
        assert_eq!(session.load_more(Priority::Routine), None);

        session.complete_orders(routine.ticket, page(Priority::Routine, 0, 20, 25, true));
        let next = session.load_more(Priority::Routine).unwrap();
        assert_eq!(next.query.page, 2);
    }

    #[test]
    fn test_rapid_keystrokes_fetch_once_with_final_value() {
        let mut session = session();
        let TextChange::Debounce(first) = session.set_text(TextField::PatientName, "Jan") else {
            panic!("patient name is debounced");
        };
        let TextChange::Debounce(second) = session.set_text(TextField::PatientName, "Jane") else {
            panic!("patient name is debounced");
        };

        assert!(session.debounce_elapsed(first).is_empty());
        let requests = session.debounce_elapsed(second);
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|r| r.query.patient_name.as_deref() == Some("Jane")));
    }

    #[test]
    fn test_enter_flushes_pending_input() {
        let mut session = session();
        let TextChange::Debounce(ticket) = session.set_text(TextField::SentTo, "Quest ") else {
            panic!("sent to is debounced");
        };
        let requests = session.confirm_text();
        assert_eq!(requests[0].query.sent_to.as_deref(), Some("Quest"));
        assert!(session.debounce_elapsed(ticket).is_empty());
    }

    #[test]
    fn test_bucket_length_matches_pages_since_reset() {
        let mut session = session();
        let requests = session.filter_changed();
        let mut loaded = 0;
        for request in requests {
            if request.ticket.priority == Priority::Urgent {
                session.complete_orders(request.ticket, page(Priority::Urgent, 0, 20, 27, true));
                loaded += 20;
            }
        }
        let request = session.load_more(Priority::Urgent).unwrap();
        session.complete_orders(request.ticket, page(Priority::Urgent, 20, 7, 27, false));
        loaded += 7;

        let urgent = session.buckets().bucket(Priority::Urgent);
        assert_eq!(urgent.orders.len(), loaded);
        assert_eq!(
            urgent.pagination,
            PaginationState {
                page: 3,
                has_more: false,
                loading: false,
                total: 27,
                error: false,
            }
        );
    }

    #[test]
    fn test_logged_in_provider_preselected() {
        let mut session = OrderTrackingSession::default();
        session.load_providers(
            serde_json::from_str(
                r#"{"logged_in_staff_id": "s-2", "providers": [
                    {"id": "s-1", "preferred_name": "Dr. Lee"},
                    {"id": "s-2", "preferred_name": "Dr. Patel"}
                ]}"#,
            )
            .unwrap(),
        );
        assert_eq!(session.filter_state().providers, vec!["Dr. Patel".to_string()]);
        assert!(session.can_save());
    }

    #[test]
    fn test_option_load_failures_are_reported_until_reloaded() {
        let mut session = OrderTrackingSession::default();
        session.options_failed(OptionSource::Providers);
        session.options_failed(OptionSource::Locations);
        session.options_failed(OptionSource::Providers);
        assert_eq!(
            session.option_errors(),
            &[OptionSource::Providers, OptionSource::Locations]
        );
        assert_eq!(OptionSource::Locations.message(), "Error loading locations");

        session.load_locations(vec![LocationOption {
            value: "3".to_string(),
            name: "North Clinic".to_string(),
        }]);
        assert_eq!(session.option_errors(), &[OptionSource::Providers]);

        session.load_providers(serde_json::from_str(r#"{"providers": []}"#).unwrap());
        assert!(session.option_errors().is_empty());
    }

    #[test]
    fn test_default_dates() {
        let mut session = session();
        assert!(!session.can_save());
        session.apply_default_dates(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(), 30);
        assert_eq!(session.filter_state().date_from, "2024-03-01");
        assert!(session.can_save());
    }

    #[test]
    fn test_comment_flow() {
        let mut session = session();
        let requests = session.filter_changed();
        for request in requests {
            let p = request.ticket.priority;
            session.complete_orders(request.ticket, page(p, 0, 2, 2, false));
        }

        let query = session.toggle_row("routine-1").unwrap();
        assert_eq!(query.referral_id.as_deref(), Some("routine-1"));
        session.comments_loaded(
            "routine-1",
            Ok(vec![TaskComment {
                task_id: "t-5".into(),
                ..Default::default()
            }]),
        );

        let request = session.comment_request("routine-1", "left voicemail").unwrap();
        assert_eq!(request.task_id.as_deref(), Some("t-5"));
        assert!(session.comment_request("routine-1", "  ").is_err());

        let reload = session.comment_added("routine-1").unwrap();
        assert_eq!(reload, query);

        // opening another row closes this one
        assert!(session.toggle_row("urgent-0").is_some());
        assert!(!session.accordion().is_open("routine-1"));

        // filter change forgets threads
        session.filter_changed();
        assert_eq!(session.accordion().open_row(), None);
        assert!(session.accordion().thread("routine-1").is_none());
    }
}
