use super::response::{null_as_default, string_or_number};
use crate::shared::date_utils::format_order_date;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Lab,
    Imaging,
    Referral,
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lab => "Lab",
            Self::Imaging => "Imaging",
            Self::Referral => "Referral",
        }
    }

    /// Task comments are not offered for lab orders
    pub fn supports_comments(&self) -> bool {
        !matches!(self, Self::Lab)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lab" => Ok(Self::Lab),
            "imaging" => Ok(Self::Imaging),
            "referral" => Ok(Self::Referral),
            other => Err(format!("unknown order type: {}", other)),
        }
    }
}

impl Serialize for OrderType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for OrderType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Bucket an order is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Routine,
}

impl Priority {
    pub const ALL: [Priority; 2] = [Self::Urgent, Self::Routine];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Routine => "routine",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order record as the backend sends it, one shape for labs, imaging and
/// referrals.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, rename = "order", deserialize_with = "null_as_default")]
    pub order_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub patient_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dob: String,
    #[serde(default)]
    pub ordering_provider: Option<RawProvider>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sent_to: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ordered_date: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(default)]
    pub note: Option<RawNote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProvider {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
}

/// Normalized row of the worklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub order_name: String,
    pub patient_id: String,
    pub patient_name: String,
    pub dob: String,
    pub ordering_provider: String,
    pub ordering_provider_id: String,
    pub sent_to: String,
    pub ordered_date: String,
    pub priority: Priority,
    pub status: String,
    pub permalink: String,
    pub note_title: String,
    pub note_permalink: String,
}

impl Order {
    /// `bucket` is used when the record does not state its own priority
    pub fn from_raw(raw: RawOrder, bucket: Priority) -> Self {
        let provider = raw.ordering_provider.unwrap_or_default();
        let note = raw.note.unwrap_or_default();
        Self {
            id: raw.id,
            order_type: raw.order_type,
            order_name: raw.order_name,
            patient_id: raw.patient_id,
            patient_name: raw.patient_name,
            dob: raw.dob,
            ordering_provider: provider.preferred_name,
            ordering_provider_id: provider.id,
            sent_to: raw.sent_to,
            ordered_date: format_order_date(&raw.ordered_date),
            priority: raw.priority.unwrap_or(bucket),
            status: raw.status,
            permalink: raw.permalink,
            note_title: note.title,
            note_permalink: note.permalink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_referral() {
        let raw: RawOrder = serde_json::from_value(serde_json::json!({
            "id": 981,
            "type": "referral",
            "order": "Cardiology consult",
            "patient_id": "p-12",
            "patient_name": "Jane Doe",
            "dob": "1980-02-03",
            "ordering_provider": {"id": "s-1", "preferred_name": "Dr. Lee"},
            "sent_to": "Heart Center",
            "ordered_date": "2024-01-05T10:00:00Z",
            "priority": "urgent",
            "status": "Open/Sent",
            "permalink": "noteId=3",
            "note": {"title": "Office visit", "permalink": "note/3"}
        }))
        .unwrap();

        let order = Order::from_raw(raw, Priority::Routine);
        assert_eq!(order.id, "981");
        assert_eq!(order.order_type, OrderType::Referral);
        assert_eq!(order.order_name, "Cardiology consult");
        assert_eq!(order.ordering_provider, "Dr. Lee");
        assert_eq!(order.ordering_provider_id, "s-1");
        assert_eq!(order.ordered_date, "Jan 5, 2024");
        assert_eq!(order.priority, Priority::Urgent);
        assert_eq!(order.note_title, "Office visit");
    }

    #[test]
    fn test_sparse_record_uses_defaults() {
        let raw: RawOrder =
            serde_json::from_value(serde_json::json!({"id": "l-1", "type": "LAB", "note": null}))
                .unwrap();
        let order = Order::from_raw(raw, Priority::Routine);
        assert_eq!(order.order_type, OrderType::Lab);
        assert_eq!(order.priority, Priority::Routine);
        assert_eq!(order.ordering_provider, "");
        assert_eq!(order.ordered_date, "");
        assert!(!order.order_type.supports_comments());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result =
            serde_json::from_value::<RawOrder>(serde_json::json!({"id": "x", "type": "Vaccine"}));
        assert!(result.is_err());
    }
}
