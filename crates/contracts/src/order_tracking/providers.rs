use super::response::{null_as_default, string_or_number, ProvidersResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl LocationOption {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

/// Provider name ↔ id lookup, loaded once at startup.
///
/// Filters carry provider *names* (that is what the dropdown shows and
/// what saved filters persist); the orders endpoint wants ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderDirectory {
    entries: Vec<ProviderEntry>,
    logged_in_staff_id: Option<String>,
}

impl ProviderDirectory {
    pub fn from_response(response: ProvidersResponse) -> Self {
        let mut entries: Vec<ProviderEntry> = Vec::new();
        for entry in response.providers {
            if entry.id.is_empty() || entry.preferred_name.is_empty() {
                continue;
            }
            if entries.iter().any(|e| e.id == entry.id) {
                continue;
            }
            entries.push(entry);
        }
        let logged_in_staff_id = Some(response.logged_in_staff_id).filter(|id| !id.is_empty());
        Self {
            entries,
            logged_in_staff_id,
        }
    }

    /// Names in backend order, one per distinct name
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.preferred_name) {
                names.push(entry.preferred_name.clone());
            }
        }
        names
    }

    /// First id carrying `name`
    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.preferred_name == name)
            .map(|e| e.id.as_str())
    }

    /// Resolve names to ids, silently skipping names that are unknown
    pub fn resolve_ids(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter_map(|name| self.id_for(name))
            .map(str::to_string)
            .collect()
    }

    /// The logged-in staff member's name if they are one of the providers
    pub fn logged_in_provider_name(&self) -> Option<&str> {
        let id = self.logged_in_staff_id.as_deref()?;
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.preferred_name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
