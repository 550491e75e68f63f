//! Submit-time validation.
//!
//! Rules run in a fixed order and the first failure wins: later rules are not
//! evaluated, so the user only ever sees one message per attempt.

use crate::domain::constants::*;
use crate::domain::models::{FormContext, FormSnapshot, FormVariant, ValidationOutcome};
use crate::services::mask::digits_only;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ServiceTypeSelected,
    FullName,
    CepComplete,
    BusinessHours,
    Description,
}

const STANDARD_RULES: [Rule; 4] = [
    Rule::ServiceTypeSelected,
    Rule::FullName,
    Rule::CepComplete,
    Rule::BusinessHours,
];

const DETAILED_RULES: [Rule; 5] = [
    Rule::ServiceTypeSelected,
    Rule::FullName,
    Rule::CepComplete,
    Rule::BusinessHours,
    Rule::Description,
];

pub fn rules_for(variant: FormVariant) -> &'static [Rule] {
    match variant {
        FormVariant::Standard => &STANDARD_RULES,
        FormVariant::Detailed => &DETAILED_RULES,
    }
}

impl Rule {
    pub fn field(self) -> &'static str {
        match self {
            Rule::ServiceTypeSelected => FIELD_SERVICE_TYPE,
            Rule::FullName => FIELD_FULL_NAME,
            Rule::CepComplete => FIELD_CEP,
            Rule::BusinessHours => FIELD_PREFERRED_TIME,
            Rule::Description => FIELD_DESCRIPTION,
        }
    }

    /// Radio groups have no single element to focus.
    pub fn focus_target(self) -> Option<&'static str> {
        match self {
            Rule::ServiceTypeSelected => None,
            other => Some(other.field()),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rule::ServiceTypeSelected => MSG_SELECT_SERVICE,
            Rule::FullName => MSG_FULL_NAME,
            Rule::CepComplete => MSG_CEP_INVALID,
            Rule::BusinessHours => MSG_BUSINESS_HOURS,
            Rule::Description => MSG_DESCRIPTION,
        }
    }

    pub fn passes(self, form: &FormSnapshot) -> bool {
        match self {
            Rule::ServiceTypeSelected => form
                .service_type
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty()),
            Rule::FullName => form.full_name.trim().chars().count() >= MIN_FULL_NAME_CHARS,
            Rule::CepComplete => digits_only(&form.cep).len() == CEP_DIGITS,
            Rule::BusinessHours => match form.preferred_time.as_deref().map(str::trim) {
                None | Some("") => true,
                Some(time) => {
                    parse_hour(time).is_some_and(|h| (OPEN_HOUR..CLOSE_HOUR).contains(&h))
                }
            },
            Rule::Description => {
                form.description
                    .as_deref()
                    .unwrap_or_default()
                    .trim()
                    .chars()
                    .count()
                    >= MIN_DESCRIPTION_CHARS
            }
        }
    }
}

/// Hour part of `HH:MM`; minutes are not inspected.
pub fn parse_hour(time: &str) -> Option<u32> {
    let (hour, _) = time.split_once(':').unwrap_or((time, ""));
    hour.trim().parse().ok()
}

pub fn first_failure(form: &FormSnapshot, variant: FormVariant) -> Option<Rule> {
    rules_for(variant).iter().copied().find(|r| !r.passes(form))
}

pub fn validate(form: &FormSnapshot, variant: FormVariant) -> ValidationOutcome {
    match first_failure(form, variant) {
        None => ValidationOutcome::passed(),
        Some(rule) => {
            debug!(field = rule.field(), "submission blocked");
            ValidationOutcome::failed(Some(rule.field()), rule.message())
        }
    }
}

pub fn busy_label(context: FormContext) -> &'static str {
    match context {
        FormContext::Create => BUSY_LABEL_CREATE,
        FormContext::Edit => BUSY_LABEL_EDIT,
    }
}

#[derive(Serialize)]
pub struct GateReport {
    pub outcome: ValidationOutcome,
    pub context: FormContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_label: Option<String>,
}

/// One-shot check of a snapshot, as the submit handler would see it on `path`.
pub fn gate(form: &FormSnapshot, variant: FormVariant, context: FormContext) -> GateReport {
    let failed = first_failure(form, variant);
    let outcome = validate(form, variant);
    GateReport {
        focus: failed.and_then(Rule::focus_target).map(str::to_string),
        busy_label: outcome.valid.then(|| busy_label(context).to_string()),
        outcome,
        context,
    }
}

#[cfg(test)]
mod tests {
    use super::{gate, parse_hour, validate, Rule};
    use crate::domain::constants::{FIELD_PREFERRED_TIME, FIELD_SERVICE_TYPE, MSG_SELECT_SERVICE};
    use crate::domain::models::{FormContext, FormSnapshot, FormVariant};

    fn good() -> FormSnapshot {
        FormSnapshot {
            service_type: Some("limpeza_poco".into()),
            full_name: "Maria Souza".into(),
            cep: "01001-000".into(),
            preferred_time: Some("09:00".into()),
            description: Some("Poço com água turva desde a última chuva".into()),
        }
    }

    #[test]
    fn valid_form_passes_both_variants() {
        assert!(validate(&good(), FormVariant::Standard).valid);
        assert!(validate(&good(), FormVariant::Detailed).valid);
    }

    #[test]
    fn missing_service_type_short_circuits_everything_else() {
        let form = FormSnapshot {
            service_type: None,
            full_name: "".into(),
            cep: "1".into(),
            preferred_time: Some("03:00".into()),
            description: None,
        };
        let out = validate(&form, FormVariant::Detailed);
        assert!(!out.valid);
        assert_eq!(out.failed_field.as_deref(), Some(FIELD_SERVICE_TYPE));
        assert_eq!(out.message.as_deref(), Some(MSG_SELECT_SERVICE));
    }

    #[test]
    fn rules_fail_in_order() {
        let mut form = good();
        form.full_name = "  Al ".into();
        form.cep = "0100".into();
        assert_eq!(
            validate(&form, FormVariant::Standard).failed_field.as_deref(),
            Some("full_name")
        );
        form.full_name = "Ana".into();
        assert_eq!(
            validate(&form, FormVariant::Standard).failed_field.as_deref(),
            Some("cep")
        );
    }

    #[test]
    fn business_hours_are_half_open() {
        let check = |t: &str| {
            let mut form = good();
            form.preferred_time = Some(t.into());
            validate(&form, FormVariant::Standard).valid
        };
        assert!(!check("07:59"));
        assert!(check("08:00"));
        assert!(check("16:59"));
        assert!(!check("17:00"));
        assert!(!check("17:30"));
        assert!(check(""));
        assert!(!check("xx:00"));
    }

    #[test]
    fn absent_time_is_not_checked() {
        let mut form = good();
        form.preferred_time = None;
        assert!(validate(&form, FormVariant::Standard).valid);
    }

    #[test]
    fn description_only_checked_on_detailed_form() {
        let mut form = good();
        form.description = Some("   curto   ".into());
        assert!(validate(&form, FormVariant::Standard).valid);
        let out = validate(&form, FormVariant::Detailed);
        assert_eq!(out.failed_field.as_deref(), Some("description"));
    }

    #[test]
    fn hour_parser_ignores_minutes() {
        assert_eq!(parse_hour("16:99"), Some(16));
        assert_eq!(parse_hour("9"), Some(9));
        assert_eq!(parse_hour(":30"), None);
    }

    #[test]
    fn gate_reports_busy_label_by_context_and_focus_on_failure() {
        let ok = gate(&good(), FormVariant::Standard, FormContext::Edit);
        assert_eq!(ok.busy_label.as_deref(), Some("Salvando..."));
        assert!(ok.focus.is_none());

        let created = gate(&good(), FormVariant::Standard, FormContext::Create);
        assert_eq!(created.busy_label.as_deref(), Some("Enviando..."));

        let mut late = good();
        late.preferred_time = Some("18:00".into());
        let blocked = gate(&late, FormVariant::Standard, FormContext::Create);
        assert_eq!(blocked.focus.as_deref(), Some(FIELD_PREFERRED_TIME));
        assert!(blocked.busy_label.is_none());
        assert_eq!(Rule::ServiceTypeSelected.focus_target(), None);
    }
}
