//! Response bodies of the order tracking plugin API.
//!
//! The backend is loose about nulls and id types, so every field is
//! defaulted and ids are accepted as either strings or numbers.

use super::comments::TaskComment;
use super::orders::RawOrder;
use super::providers::{LocationOption, ProviderEntry};
use super::saved_filters::SavedFilter;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// `GET filters`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedFilterListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: Vec<SavedFilter>,
}

/// `POST filter`
#[derive(Debug, Clone, Deserialize)]
pub struct SavedFilterResponse {
    pub filter: SavedFilter,
}

/// `GET providers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersResponse {
    #[serde(default, deserialize_with = "string_or_number")]
    pub logged_in_staff_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub providers: Vec<ProviderEntry>,
}

/// `GET locations`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<LocationOption>,
}

/// `GET orders`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersResponse {
    #[serde(default, deserialize_with = "skip_invalid_orders")]
    pub orders: Vec<RawOrder>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: OrderCounts,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OrderCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub urgent: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routine: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_next: bool,
}

/// `GET task-comments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<TaskComment>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Records that do not parse are dropped with a warning; the rest of the
/// page is still shown.
fn skip_invalid_orders<'de, D>(deserializer: D) -> Result<Vec<RawOrder>, D::Error>
where
    D: Deserializer<'de>,
{
    let records: Vec<serde_json::Value> = null_as_default(deserializer)?;
    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<RawOrder>(record) {
            Ok(order) => Some(order),
            Err(e) => {
                log::warn!("Skipping unreadable order record: {}", e);
                None
            }
        })
        .collect())
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
