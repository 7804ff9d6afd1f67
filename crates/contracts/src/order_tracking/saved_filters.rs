use super::filters::FilterState;
use super::response::string_or_number;
use crate::error::{OrderTrackingError, Result};
use serde::{Deserialize, Serialize};

/// Named filter preset persisted by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filters: FilterState,
}

impl SavedFilter {
    /// Draft a new preset. The id is the creation time in milliseconds; the
    /// server may replace it with its own canonical id.
    pub fn draft(name: &str, filters: FilterState, now_millis: i64) -> Result<Self> {
        Ok(Self {
            id: now_millis.to_string(),
            name: validate_filter_name(name)?,
            filters,
        })
    }
}

pub fn validate_filter_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(OrderTrackingError::validation("filter name is required"));
    }
    Ok(name.to_string())
}

/// Local copy of the saved filters, kept in sync by explicit append and
/// remove after each successful request. There is no optimistic update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedFilterStore {
    filters: Vec<SavedFilter>,
    saving: bool,
}

impl SavedFilterStore {
    pub fn filters(&self) -> &[SavedFilter] {
        &self.filters
    }

    pub fn find(&self, id: &str) -> Option<&SavedFilter> {
        self.filters.iter().find(|f| f.id == id)
    }

    pub fn replace_all(&mut self, filters: Vec<SavedFilter>) {
        self.filters = filters;
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Start a save. Validation runs first and fails without touching the
    /// store. `Ok(None)` means a save is already in flight and this one must
    /// not be sent.
    pub fn begin_save(
        &mut self,
        name: &str,
        filters: FilterState,
        now_millis: i64,
    ) -> Result<Option<SavedFilter>> {
        let draft = SavedFilter::draft(name, filters, now_millis)?;
        if self.saving {
            return Ok(None);
        }
        self.saving = true;
        Ok(Some(draft))
    }

    /// End the in-flight save, appending the server's record on success
    pub fn finish_save(&mut self, saved: Option<SavedFilter>) {
        self.saving = false;
        if let Some(filter) = saved {
            self.filters.push(filter);
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id != id);
        self.filters.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FilterState {
        FilterState {
            providers: vec!["Dr. Lee".into()],
            date_from: "2024-01-01".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_name_is_validation_error() {
        let mut store = SavedFilterStore::default();
        let err = store.begin_save("   ", state(), 1).unwrap_err();
        assert!(err.is_validation());
        assert!(!store.is_saving());
    }

    #[test]
    fn test_double_submission_is_blocked() {
        let mut store = SavedFilterStore::default();
        let draft = store.begin_save(" My Clinic AM ", state(), 1_700_000_000_000).unwrap();
        let draft = draft.expect("first save goes through");
        assert_eq!(draft.name, "My Clinic AM");
        assert_eq!(draft.id, "1700000000000");

        assert_eq!(store.begin_save("Again", state(), 2).unwrap(), None);

        let canonical = SavedFilter {
            id: "srv-1".into(),
            ..draft
        };
        store.finish_save(Some(canonical));
        assert!(!store.is_saving());
        assert_eq!(store.filters().len(), 1);
        assert_eq!(store.find("srv-1").unwrap().filters, state());
    }

    #[test]
    fn test_failed_save_leaves_cache_untouched() {
        let mut store = SavedFilterStore::default();
        store.begin_save("AM", state(), 1).unwrap();
        store.finish_save(None);
        assert!(store.filters().is_empty());
        assert!(store.begin_save("AM", state(), 2).unwrap().is_some());
    }

    #[test]
    fn test_remove() {
        let mut store = SavedFilterStore::default();
        store.replace_all(vec![
            SavedFilter::draft("a", FilterState::default(), 1).unwrap(),
            SavedFilter::draft("b", FilterState::default(), 2).unwrap(),
        ]);
        assert!(store.remove("1"));
        assert!(!store.remove("1"));
        assert_eq!(store.filters().len(), 1);
        assert_eq!(store.filters()[0].name, "b");
    }

    #[test]
    fn test_numeric_id_from_server() {
        let filter: SavedFilter =
            serde_json::from_str(r#"{"id": 17, "name": "AM", "filters": {"types": ["Lab"]}}"#)
                .unwrap();
        assert_eq!(filter.id, "17");
        assert_eq!(filter.filters.types, vec!["Lab".to_string()]);
    }
}
