use super::providers::LocationOption;
use serde::{Deserialize, Serialize};

pub const ORDER_TYPE_OPTIONS: [&str; 3] = ["Lab", "Imaging", "Referral"];
pub const STATUS_OPTIONS: [&str; 4] = ["Uncommitted", "Open/Sent", "Delegated", "Closed"];

/// Snapshot of every active filter criterion.
///
/// Empty lists and empty strings mean "no restriction". The camelCase
/// field names are the persisted saved-filter format and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub providers: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
    pub location: String,
    pub patient_name: String,
    pub patient_dob: String,
    pub sent_to: String,
    pub date_from: String,
    pub date_to: String,
}

impl FilterState {
    /// `false` exactly when the state equals the all-default value
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// Number shown on the filter badge. The date range counts once.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.providers.is_empty(),
            !self.types.is_empty(),
            !self.statuses.is_empty(),
            !self.location.is_empty(),
            !self.patient_name.is_empty(),
            !self.sent_to.is_empty(),
            !self.patient_dob.is_empty(),
            !self.date_from.is_empty() || !self.date_to.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Providers,
    Types,
    Statuses,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 3] = [Self::Providers, Self::Types, Self::Statuses];

    /// Label of the "All" sentinel option, also the placeholder text
    pub fn all_label(&self) -> &'static str {
        match self {
            Self::Providers => "All Providers",
            Self::Types => "All Types",
            Self::Statuses => "All Statuses",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Providers => "provider",
            Self::Types => "type",
            Self::Statuses => "status",
        }
    }
}

/// Multi-select checkbox group with an "All" sentinel.
///
/// The sentinel is not stored: it is checked iff nothing specific is
/// selected, so "All" and specific options can never be set together or
/// both be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistGroup {
    options: Vec<String>,
    selected: Vec<String>,
}

impl ChecklistGroup {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut group = Self::default();
        group.set_options(options);
        group
    }

    /// Replace the offered options, keeping selections that are still offered.
    pub fn set_options<I, S>(&mut self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for option in options {
            let option = option.into();
            if !option.is_empty() && !deduped.contains(&option) {
                deduped.push(option);
            }
        }
        self.options = deduped;
        let keep = std::mem::take(&mut self.selected);
        self.select_only(&keep);
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selected values in option order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_checked(&self, value: &str) -> bool {
        self.selected.iter().any(|s| s == value)
    }

    /// Checking "All" clears every specific option. Unchecking it is not a
    /// distinct action: with nothing selected it stays checked.
    pub fn check_all(&mut self) {
        self.selected.clear();
    }

    /// Toggle one specific option. Returns `false` when nothing changed
    /// (unknown value or already in the requested state).
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        if !self.options.iter().any(|o| o == value) || self.is_checked(value) == checked {
            return false;
        }
        if checked {
            let mut next = self.selected.clone();
            next.push(value.to_string());
            self.select_only(&next);
        } else {
            self.selected.retain(|s| s != value);
        }
        true
    }

    /// Select exactly `values`; values that are not offered are ignored.
    pub fn select_only(&mut self, values: &[String]) {
        self.selected = self
            .options
            .iter()
            .filter(|o| values.contains(o))
            .cloned()
            .collect();
    }
}

/// Single-select dropdown where the empty value is "All Locations".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSelect {
    options: Vec<LocationOption>,
    value: String,
}

impl LocationSelect {
    pub const ALL_LABEL: &'static str = "All Locations";

    pub fn set_options(&mut self, options: Vec<LocationOption>) {
        self.options = options;
        if !self.is_offered(&self.value) {
            self.value.clear();
        }
    }

    pub fn options(&self) -> &[LocationOption] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Display text of the current selection
    pub fn label(&self) -> &str {
        self.options
            .iter()
            .find(|o| !self.value.is_empty() && o.value == self.value)
            .map(|o| o.name.as_str())
            .unwrap_or(Self::ALL_LABEL)
    }

    /// Select `value`; anything not offered falls back to "All Locations".
    pub fn select(&mut self, value: &str) {
        self.value = if self.is_offered(value) {
            value.to_string()
        } else {
            String::new()
        };
    }

    fn is_offered(&self, value: &str) -> bool {
        value.is_empty() || self.options.iter().any(|o| o.value == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    PatientName,
    PatientDob,
    SentTo,
    DateFrom,
    DateTo,
}

impl TextField {
    /// Free-text fields are debounced, date pickers apply on change
    pub fn is_debounced(&self) -> bool {
        matches!(self, Self::PatientName | Self::SentTo)
    }
}

/// Model of every filter control on the page.
///
/// `read` and `apply` are the two directions between controls and
/// [`FilterState`]; nothing else should reach into the controls to build a
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControls {
    pub providers: ChecklistGroup,
    pub types: ChecklistGroup,
    pub statuses: ChecklistGroup,
    pub location: LocationSelect,
    patient_name: String,
    patient_dob: String,
    sent_to: String,
    date_from: String,
    date_to: String,
}

impl Default for FilterControls {
    fn default() -> Self {
        Self {
            providers: ChecklistGroup::default(),
            types: ChecklistGroup::new(ORDER_TYPE_OPTIONS),
            statuses: ChecklistGroup::new(STATUS_OPTIONS),
            location: LocationSelect::default(),
            patient_name: String::new(),
            patient_dob: String::new(),
            sent_to: String::new(),
            date_from: String::new(),
            date_to: String::new(),
        }
    }
}

impl FilterControls {
    pub fn read(&self) -> FilterState {
        FilterState {
            providers: self.providers.selected().to_vec(),
            types: self.types.selected().to_vec(),
            statuses: self.statuses.selected().to_vec(),
            location: self.location.value().to_string(),
            patient_name: self.patient_name.trim().to_string(),
            patient_dob: self.patient_dob.trim().to_string(),
            sent_to: self.sent_to.trim().to_string(),
            date_from: self.date_from.trim().to_string(),
            date_to: self.date_to.trim().to_string(),
        }
    }

    pub fn apply(&mut self, state: &FilterState) {
        self.providers.select_only(&state.providers);
        self.types.select_only(&state.types);
        self.statuses.select_only(&state.statuses);
        self.location.select(&state.location);
        self.patient_name = state.patient_name.clone();
        self.patient_dob = state.patient_dob.clone();
        self.sent_to = state.sent_to.clone();
        self.date_from = state.date_from.clone();
        self.date_to = state.date_to.clone();
    }

    pub fn clear_all(&mut self) {
        self.apply(&FilterState::default());
    }

    pub fn group(&self, category: FilterCategory) -> &ChecklistGroup {
        match category {
            FilterCategory::Providers => &self.providers,
            FilterCategory::Types => &self.types,
            FilterCategory::Statuses => &self.statuses,
        }
    }

    pub fn group_mut(&mut self, category: FilterCategory) -> &mut ChecklistGroup {
        match category {
            FilterCategory::Providers => &mut self.providers,
            FilterCategory::Types => &mut self.types,
            FilterCategory::Statuses => &mut self.statuses,
        }
    }

    /// Raw input value, untrimmed, as the user typed it
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::PatientName => &self.patient_name,
            TextField::PatientDob => &self.patient_dob,
            TextField::SentTo => &self.sent_to,
            TextField::DateFrom => &self.date_from,
            TextField::DateTo => &self.date_to,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::PatientName => &mut self.patient_name,
            TextField::PatientDob => &mut self.patient_dob,
            TextField::SentTo => &mut self.sent_to,
            TextField::DateFrom => &mut self.date_from,
            TextField::DateTo => &mut self.date_to,
        };
        *slot = value.into();
    }

    pub fn has_active_filters(&self) -> bool {
        self.read().has_active_filters()
    }

    pub fn active_filter_count(&self) -> usize {
        self.read().active_filter_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controls_with_providers() -> FilterControls {
        let mut controls = FilterControls::default();
        controls
            .providers
            .set_options(["Dr. Lee", "Dr. Patel", "Dr. Okafor"]);
        controls.location.set_options(vec![
            LocationOption::new("loc-1", "Main Clinic"),
            LocationOption::new("loc-2", "Eastside"),
        ]);
        controls
    }

    #[test]
    fn test_all_sentinel_transitions() {
        let mut group = ChecklistGroup::new(ORDER_TYPE_OPTIONS);
        assert!(group.is_all());

        assert!(group.set_checked("Imaging", true));
        assert!(!group.is_all());

        assert!(group.set_checked("Lab", true));
        assert_eq!(group.selected(), ["Lab", "Imaging"]);

        group.check_all();
        assert!(group.is_all());
        assert!(group.selected().is_empty());

        group.set_checked("Referral", true);
        assert!(group.set_checked("Referral", false));
        assert!(group.is_all(), "unchecking the last option re-checks All");
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let mut group = ChecklistGroup::new(STATUS_OPTIONS);
        assert!(!group.set_checked("Archived", true));
        assert!(group.is_all());
    }

    #[test]
    fn test_set_options_keeps_offered_selection() {
        let mut group = ChecklistGroup::new(["a", "b", "c"]);
        group.set_checked("b", true);
        group.set_checked("c", true);
        group.set_options(["c", "d", "d"]);
        assert_eq!(group.options(), ["c", "d"]);
        assert_eq!(group.selected(), ["c"]);
    }

    #[test]
    fn test_read_trims_text_inputs() {
        let mut controls = controls_with_providers();
        controls.set_text(TextField::PatientName, "  Jane Doe ");
        controls.set_text(TextField::SentTo, " Quest ");
        let state = controls.read();
        assert_eq!(state.patient_name, "Jane Doe");
        assert_eq!(state.sent_to, "Quest");
        assert_eq!(controls.text(TextField::PatientName), "  Jane Doe ");
    }

    #[test]
    fn test_apply_then_read_round_trip() {
        let mut controls = controls_with_providers();
        let state = FilterState {
            providers: vec!["Dr. Lee".into(), "Dr. Okafor".into()],
            types: vec!["Imaging".into()],
            statuses: vec!["Open/Sent".into(), "Closed".into()],
            location: "loc-2".into(),
            patient_name: "Jane".into(),
            patient_dob: "1980-02-03".into(),
            sent_to: "Quest".into(),
            date_from: "2024-01-01".into(),
            date_to: "2024-02-01".into(),
        };
        controls.apply(&state);
        assert_eq!(controls.read(), state);
        assert_eq!(controls.location.label(), "Eastside");
    }

    #[test]
    fn test_apply_reads_back_in_option_order_and_trimmed() {
        let mut controls = controls_with_providers();
        controls.apply(&FilterState {
            providers: vec!["Dr. Okafor".into(), "Dr. Lee".into()],
            patient_name: "  Jane ".into(),
            ..Default::default()
        });
        let state = controls.read();
        assert_eq!(state.providers, vec!["Dr. Lee".to_string(), "Dr. Okafor".to_string()]);
        assert_eq!(state.patient_name, "Jane");
    }

    #[test]
    fn test_apply_drops_values_controls_do_not_offer() {
        let mut controls = controls_with_providers();
        controls.location.select("loc-1");
        controls.apply(&FilterState {
            providers: vec!["Dr. Nobody".into()],
            location: "loc-9".into(),
            ..Default::default()
        });
        let state = controls.read();
        assert!(state.providers.is_empty());
        assert!(controls.providers.is_all());
        assert_eq!(state.location, "");
        assert_eq!(controls.location.label(), LocationSelect::ALL_LABEL);
    }

    #[test]
    fn test_clear_all() {
        let mut controls = controls_with_providers();
        controls.providers.set_checked("Dr. Lee", true);
        controls.set_text(TextField::DateFrom, "2024-01-01");
        assert!(controls.has_active_filters());

        controls.clear_all();
        assert!(!controls.has_active_filters());
        for category in FilterCategory::ALL {
            assert!(controls.group(category).is_all());
        }
    }

    #[test]
    fn test_active_filter_count() {
        let mut state = FilterState::default();
        assert_eq!(state.active_filter_count(), 0);
        assert!(!state.has_active_filters());

        state.date_from = "2024-01-01".into();
        state.date_to = "2024-01-31".into();
        assert_eq!(state.active_filter_count(), 1);

        state.types = vec!["Lab".into()];
        state.patient_dob = "1970-01-01".into();
        assert_eq!(state.active_filter_count(), 3);
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_saved_filter_wire_format() {
        let json = r#"{"providers":["Dr. Lee"],"dateFrom":"2024-01-01"}"#;
        let state: FilterState = serde_json::from_str(json).unwrap();
        assert_eq!(state.providers, vec!["Dr. Lee".to_string()]);
        assert_eq!(state.date_from, "2024-01-01");
        assert!(state.types.is_empty());

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["patientName"], "");
        assert_eq!(value["dateFrom"], "2024-01-01");
    }

    #[derive(Debug, Clone)]
    enum Toggle {
        All,
        Option(usize, bool),
    }

    fn toggle_strategy() -> impl Strategy<Value = Toggle> {
        prop_oneof![
            Just(Toggle::All),
            (0usize..4, any::<bool>()).prop_map(|(i, c)| Toggle::Option(i, c)),
        ]
    }

    proptest! {
        #[test]
        fn all_and_specific_are_exclusive(toggles in proptest::collection::vec(toggle_strategy(), 0..40)) {
            let mut group = ChecklistGroup::new(STATUS_OPTIONS);
            for toggle in toggles {
                match toggle {
                    Toggle::All => group.check_all(),
                    Toggle::Option(i, checked) => {
                        group.set_checked(STATUS_OPTIONS[i], checked);
                    }
                }
                let any_specific = STATUS_OPTIONS.iter().any(|o| group.is_checked(o));
                prop_assert!(group.is_all() != any_specific);
            }
        }

        // `read` returns selections in option order and trims text, so a
        // saved state in any order with any padding reads back normalised.
        #[test]
        fn apply_read_round_trip(
            types in proptest::sample::subsequence(ORDER_TYPE_OPTIONS.to_vec(), 0..=3).prop_shuffle(),
            statuses in proptest::sample::subsequence(STATUS_OPTIONS.to_vec(), 0..=4).prop_shuffle(),
            patient_name in "([A-Za-z][A-Za-z ]{0,10}[A-Za-z])?",
            padding in " {0,2}",
            date_from in "(2024-0[1-9]-[12][0-9])?",
        ) {
            let state = FilterState {
                types: types.iter().map(|t| t.to_string()).collect(),
                statuses: statuses.iter().map(|s| s.to_string()).collect(),
                patient_name: format!("{}{}{}", padding, patient_name, padding),
                date_from: date_from.clone(),
                ..Default::default()
            };
            let expected = FilterState {
                types: ORDER_TYPE_OPTIONS
                    .iter()
                    .filter(|o| types.contains(o))
                    .map(|o| o.to_string())
                    .collect(),
                statuses: STATUS_OPTIONS
                    .iter()
                    .filter(|o| statuses.contains(o))
                    .map(|o| o.to_string())
                    .collect(),
                patient_name,
                date_from,
                ..Default::default()
            };
            let mut controls = FilterControls::default();
            controls.apply(&state);
            prop_assert_eq!(controls.read(), expected);
        }
    }
}
