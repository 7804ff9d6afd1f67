//! Runtime settings handed over by the embedding page.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Options accepted by `host_ready`. Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix of the plugin REST convention
    pub api_root: String,
    pub plugin_name: String,
    /// Delay applied to the patient name and sent-to inputs
    pub debounce_ms: u32,
    /// Initial "date from" is this many days before today
    pub date_lookback_days: i64,
    pub enable_task_comments: bool,
    /// Chart application the patient/order links open in
    pub patient_chart_application: String,
    /// Element to mount into; `<body>` when absent
    pub mount_element_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: "/plugin-io/api".to_string(),
            plugin_name: "order_tracking".to_string(),
            debounce_ms: 300,
            date_lookback_days: 30,
            enable_task_comments: true,
            patient_chart_application: String::new(),
            mount_element_id: None,
        }
    }
}

impl ClientConfig {
    /// Decode the object passed by the host. `undefined`/`null` and
    /// malformed objects both give the defaults.
    pub fn from_js(value: JsValue) -> Self {
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid order tracking config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
