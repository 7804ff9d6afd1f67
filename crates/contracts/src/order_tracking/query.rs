use super::filters::FilterState;
use super::orders::{OrderType, Priority};
use super::providers::ProviderDirectory;
use super::PAGE_SIZE;
use crate::error::{OrderTrackingError, Result};
use serde::{Deserialize, Serialize};

/// Query string of `GET orders`. Empty criteria are left out entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub priority: Priority,
}

impl OrdersQuery {
    pub fn build(
        filters: &FilterState,
        directory: &ProviderDirectory,
        page: u32,
        priority: Priority,
    ) -> Self {
        Self {
            provider_ids: joined(&directory.resolve_ids(&filters.providers)),
            types: joined(&filters.types),
            status: joined(&filters.statuses),
            location: non_empty(&filters.location),
            patient_name: non_empty(&filters.patient_name),
            patient_dob: non_empty(&filters.patient_dob),
            sent_to: non_empty(&filters.sent_to),
            date_from: non_empty(&filters.date_from),
            date_to: non_empty(&filters.date_to),
            page,
            page_size: PAGE_SIZE,
            priority,
        }
    }

    pub fn to_query_string(&self) -> Result<String> {
        serde_qs::to_string(self).map_err(|e| OrderTrackingError::Encode(e.to_string()))
    }
}

/// Query string of `GET task-comments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsQuery {
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imaging_id: Option<String>,
}

impl CommentsQuery {
    pub fn for_order(order_type: OrderType, order_id: &str) -> Self {
        let id = Some(order_id.to_string());
        Self {
            order_type,
            referral_id: id.clone().filter(|_| order_type == OrderType::Referral),
            imaging_id: id.filter(|_| order_type == OrderType::Imaging),
        }
    }

    pub fn to_query_string(&self) -> Result<String> {
        serde_qs::to_string(self).map_err(|e| OrderTrackingError::Encode(e.to_string()))
    }
}

fn joined(values: &[String]) -> Option<String> {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_tracking::response::ProvidersResponse;

    fn directory() -> ProviderDirectory {
        let response: ProvidersResponse = serde_json::from_str(
            r#"{"providers": [
                {"id": "s-1", "preferred_name": "Dr. Lee"},
                {"id": "s-2", "preferred_name": "Dr. Patel"}
            ]}"#,
        )
        .unwrap();
        ProviderDirectory::from_response(response)
    }

    #[test]
    fn test_build_resolves_providers_and_skips_empty() {
        let filters = FilterState {
            providers: vec!["Dr. Patel".into(), "Dr. Lee".into(), "Dr. Gone".into()],
            statuses: vec!["Closed".into()],
            date_from: "2024-01-01".into(),
            ..Default::default()
        };
        let query = OrdersQuery::build(&filters, &directory(), 3, Priority::Urgent);

        assert_eq!(query.provider_ids.as_deref(), Some("s-2,s-1"));
        assert_eq!(query.status.as_deref(), Some("Closed"));
        assert_eq!(query.types, None);
        assert_eq!(query.patient_name, None);
        assert_eq!(query.date_from.as_deref(), Some("2024-01-01"));
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn test_unresolvable_providers_are_omitted() {
        let filters = FilterState {
            providers: vec!["Dr. Gone".into()],
            ..Default::default()
        };
        let query = OrdersQuery::build(&filters, &directory(), 1, Priority::Routine);
        assert_eq!(query.provider_ids, None);
    }

    #[test]
    fn test_query_string() {
        let filters = FilterState {
            types: vec!["Lab".into(), "Imaging".into()],
            ..Default::default()
        };
        let qs = OrdersQuery::build(&filters, &directory(), 2, Priority::Routine)
            .to_query_string()
            .unwrap();

        assert!(qs.contains("page=2"));
        assert!(qs.contains("page_size=20"));
        assert!(qs.contains("priority=routine"));
        assert!(qs.starts_with("types="));
        assert!(!qs.contains("patient_name"));
        assert!(!qs.contains("provider_ids"));
    }

    #[test]
    fn test_comments_query_by_type() {
        let referral = CommentsQuery::for_order(OrderType::Referral, "r9");
        assert_eq!(
            referral.to_query_string().unwrap(),
            "order_type=Referral&referral_id=r9"
        );

        let imaging = CommentsQuery::for_order(OrderType::Imaging, "i4");
        assert_eq!(
            imaging.to_query_string().unwrap(),
            "order_type=Imaging&imaging_id=i4"
        );
    }
}
