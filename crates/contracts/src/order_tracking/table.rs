//! Pure view model of the orders accordion table.
//!
//! `render_table` is a function of the buckets and the accordion only; the
//! frontend turns the result into markup without deciding anything itself.

use super::comments::AccordionState;
use super::orders::{Order, OrderType, Priority};
use super::pagination::{OrderBucket, OrderBuckets};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const TABLE_HEADER: [&str; 9] = [
    "Patient", "DOB", "Order", "Type", "Provider", "Sent To", "Status", "Date", "",
];

pub const EMPTY_MESSAGE: &str = "No orders found";

pub const ERROR_MESSAGE: &str = "Error loading orders";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Outline,
    Secondary,
    Default,
}

impl BadgeStyle {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Outline => "badge badge-outline",
            Self::Secondary => "badge badge-secondary",
            Self::Default => "badge badge-default",
        }
    }
}

pub fn status_badge(status: &str) -> BadgeStyle {
    match status.trim().to_ascii_lowercase().as_str() {
        "open/sent" | "delegated" => BadgeStyle::Secondary,
        "closed" => BadgeStyle::Default,
        _ => BadgeStyle::Outline,
    }
}

/// Links into the host's patient chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartLinks {
    application: String,
}

impl ChartLinks {
    /// `chart_application` is the plain application key; the host expects it
    /// base64 encoded in the URL fragment.
    pub fn new(chart_application: &str) -> Self {
        Self {
            application: STANDARD.encode(chart_application.as_bytes()),
        }
    }

    pub fn patient_href(&self, patient_id: &str) -> String {
        format!("/patient/{}/#application={}", patient_id, self.application)
    }

    pub fn order_href(&self, patient_id: &str, permalink: &str) -> String {
        if permalink.is_empty() {
            self.patient_href(patient_id)
        } else {
            format!("{}&{}", self.patient_href(patient_id), permalink)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub order_id: String,
    pub order_type: OrderType,
    pub urgent: bool,
    pub patient_name: String,
    pub patient_href: String,
    pub dob: String,
    pub order_name: String,
    pub order_href: String,
    pub provider: String,
    pub sent_to: String,
    pub status: String,
    pub status_badge: BadgeStyle,
    pub ordered_date: String,
    pub expandable: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreView {
    pub loading: bool,
}

impl LoadMoreView {
    pub fn label(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else {
            "Load More..."
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub priority: Priority,
    pub title: String,
    pub rows: Vec<RowView>,
    pub load_more: Option<LoadMoreView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: [&'static str; 9],
    pub sections: Vec<SectionView>,
    pub info_bar: String,
    /// Nothing to show yet but a first page is on its way
    pub loading: bool,
    /// Nothing to show and the last load of a bucket failed
    pub error: bool,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

pub fn render_table(
    buckets: &OrderBuckets,
    accordion: &AccordionState,
    links: &ChartLinks,
) -> TableView {
    let sections: Vec<SectionView> = Priority::ALL
        .into_iter()
        .filter_map(|priority| render_section(priority, buckets.bucket(priority), accordion, links))
        .collect();

    let loading = sections.is_empty()
        && Priority::ALL
            .into_iter()
            .any(|p| buckets.bucket(p).pagination.loading);
    let error = sections.is_empty() && !loading && buckets.has_error();

    TableView {
        header: TABLE_HEADER,
        sections,
        info_bar: if error {
            ERROR_MESSAGE.to_string()
        } else {
            info_bar(buckets)
        },
        loading,
        error,
    }
}

fn render_section(
    priority: Priority,
    bucket: &OrderBucket,
    accordion: &AccordionState,
    links: &ChartLinks,
) -> Option<SectionView> {
    if bucket.orders.is_empty() {
        return None;
    }
    let title = match priority {
        Priority::Urgent => format!("⚠ Urgent Orders ({})", bucket.pagination.total),
        Priority::Routine => format!("⏱ Routine Orders ({})", bucket.pagination.total),
    };
    let rows = bucket
        .orders
        .iter()
        .map(|order| render_row(order, priority, accordion, links))
        .collect();
    let load_more = bucket.pagination.has_more.then(|| LoadMoreView {
        loading: bucket.pagination.loading,
    });
    Some(SectionView {
        priority,
        title,
        rows,
        load_more,
    })
}

fn render_row(
    order: &Order,
    bucket: Priority,
    accordion: &AccordionState,
    links: &ChartLinks,
) -> RowView {
    RowView {
        order_id: order.id.clone(),
        order_type: order.order_type,
        urgent: bucket == Priority::Urgent,
        patient_name: order.patient_name.clone(),
        patient_href: links.patient_href(&order.patient_id),
        dob: order.dob.clone(),
        order_name: order.order_name.clone(),
        order_href: links.order_href(&order.patient_id, &order.permalink),
        provider: order.ordering_provider.clone(),
        sent_to: order.sent_to.clone(),
        status: order.status.clone(),
        status_badge: status_badge(&order.status),
        ordered_date: order.ordered_date.clone(),
        expandable: accordion.is_expandable(order.order_type),
        expanded: accordion.is_open(&order.id),
    }
}

fn info_bar(buckets: &OrderBuckets) -> String {
    if buckets.is_empty() {
        return "No orders available".to_string();
    }
    let urgent = buckets.bucket(Priority::Urgent);
    let routine = buckets.bucket(Priority::Routine);
    let (lu, tu) = (urgent.orders.len(), urgent.pagination.total);
    let (lr, tr) = (routine.orders.len(), routine.pagination.total);
    format!(
        "Showing {} of {} orders ({}/{} urgent, {}/{} routine)",
        lu + lr,
        tu + tr,
        lu,
        tu,
        lr,
        tr
    )
}
