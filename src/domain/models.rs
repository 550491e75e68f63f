use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mask {
    Cep,
    Phone,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormField {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Mask>,
    #[serde(default)]
    pub disabled: bool,
}

/// Address data produced by one CEP lookup. Discarded once applied to a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressLookupResult {
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub found: bool,
}

impl AddressLookupResult {
    pub fn populated_count(&self) -> usize {
        [&self.street, &self.district, &self.city, &self.state_code]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn passed() -> Self {
        Self {
            valid: true,
            failed_field: None,
            message: None,
        }
    }

    pub fn failed(field: Option<&str>, message: &str) -> Self {
        Self {
            valid: false,
            failed_field: field.map(str::to_string),
            message: Some(message.to_string()),
        }
    }
}

/// Values read from the service form at submit time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub css_class: &'static str,
    pub icon: &'static str,
    pub shown_at_ms: u64,
}

/// Whether the page is creating a new request or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormContext {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    #[default]
    Standard,
    Detailed,
}

/// When a CEP lookup fires on its own, besides the search button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupTrigger {
    #[default]
    Blur,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPhase {
    Idle,
    /// Only seen on a recorded attempt; the page itself goes straight back to `Idle`.
    Blocked,
    Submitting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitControl {
    pub label: String,
    #[serde(skip)]
    pub original_label: String,
    pub disabled: bool,
}

#[derive(Serialize, Clone)]
pub struct MaskReport {
    pub mask: Mask,
    pub raw: String,
    pub masked: String,
}

#[derive(Serialize)]
pub struct LookupReport {
    pub cep: String,
    pub outcome: String,
    pub populated: usize,
    pub address: AddressLookupResult,
}

#[derive(Serialize)]
pub struct StatusReport {
    pub code: String,
    pub id: Option<u8>,
    pub css_class: String,
    pub display: String,
}

#[derive(Serialize)]
pub struct RouteReport {
    pub action: String,
    pub method: String,
    pub path: String,
}

#[derive(Serialize)]
pub struct ExportReport {
    pub path: String,
    pub rows: usize,
}
