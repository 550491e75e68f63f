//! Page session: the form, its controls and the event queue that drives them.
//!
//! Handlers run one event at a time to completion. A CEP lookup is issued as
//! a [`LookupTicket`]; its result comes back later as an
//! [`Event::LookupSettled`], so two lookups in flight may settle in either
//! order. Whichever settles last is what the form shows. Stale settlements are
//! logged, not dropped.

use crate::domain::constants::*;
use crate::domain::models::{
    AddressLookupResult, FormContext, FormField, FormSnapshot, FormVariant, LookupTrigger, Mask,
    Notification, NotificationLevel, SubmitControl, SubmitPhase, ValidationOutcome,
};
use crate::services::cep::{self, AddressSource, LookupError};
use crate::services::gatekeeper::{busy_label, first_failure, validate};
use crate::services::mask::{self, accepts_phone_key, digits_only, KeyPress};
use crate::services::notify::NotificationCenter;
use crate::services::routes::form_context;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub path: String,
    pub variant: FormVariant,
    pub trigger: Option<LookupTrigger>,
    pub notification_ttl_ms: u64,
    pub search_debounce_ms: u64,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupTicket {
    pub generation: u64,
    pub cep: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Input {
        field: String,
        value: String,
    },
    Blur {
        field: String,
    },
    KeyDown {
        field: String,
        key: KeyPress,
    },
    SelectService {
        value: String,
    },
    SearchCep,
    Submit,
    SearchInput {
        value: String,
    },
    Tick {
        ms: u64,
    },
    Dismiss,
    #[serde(skip)]
    LookupSettled {
        ticket: LookupTicket,
        result: Result<AddressLookupResult, LookupError>,
    },
}

/// Event script replayed by the `session` command.
#[derive(Debug, Deserialize)]
pub struct SessionScript {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub variant: FormVariant,
    #[serde(default)]
    pub trigger: Option<LookupTrigger>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_path() -> String {
    "/solicitar-servico".to_string()
}

/// How the most recent submit attempt ended: `Blocked` or `Submitting`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAttempt {
    pub phase: SubmitPhase,
    pub outcome: ValidationOutcome,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub path: String,
    pub context: FormContext,
    pub phase: SubmitPhase,
    pub fields: BTreeMap<String, String>,
    pub focus: Option<String>,
    pub submit: SubmitControl,
    pub min_preferred_date: String,
    pub notification: Option<Notification>,
    pub notifications: Vec<Notification>,
    pub last_attempt: Option<SubmitAttempt>,
    pub lookups_issued: u64,
    pub keys_rejected: u64,
    pub searches_submitted: Vec<String>,
}

pub struct PageSession {
    config: SessionConfig,
    context: FormContext,
    trigger: LookupTrigger,
    fields: BTreeMap<String, FormField>,
    submit: SubmitControl,
    phase: SubmitPhase,
    last_attempt: Option<SubmitAttempt>,
    keys_rejected: u64,
    search_button_disabled: bool,
    loading: bool,
    focus: Option<String>,
    notifications: NotificationCenter,
    clock_ms: u64,
    queue: VecDeque<Event>,
    issued: u64,
    in_flight: usize,
    search_deadline: Option<u64>,
    searches_submitted: Vec<String>,
    min_preferred_date: NaiveDate,
}

fn field(mask: Option<Mask>) -> FormField {
    FormField {
        value: String::new(),
        mask,
        disabled: false,
    }
}

impl PageSession {
    pub fn new(config: SessionConfig) -> Self {
        let context = form_context(&config.path);
        // create pages open lookups on blur; edit pages as soon as the code is complete
        let trigger = config.trigger.unwrap_or(match context {
            FormContext::Create => LookupTrigger::Blur,
            FormContext::Edit => LookupTrigger::Complete,
        });

        let mut fields = BTreeMap::new();
        for name in [
            FIELD_SERVICE_TYPE,
            FIELD_FULL_NAME,
            FIELD_STREET,
            FIELD_NUMBER,
            FIELD_DISTRICT,
            FIELD_CITY,
            FIELD_STATE,
            FIELD_PREFERRED_TIME,
            FIELD_SEARCH,
        ] {
            fields.insert(name.to_string(), field(None));
        }
        fields.insert(FIELD_CEP.to_string(), field(Some(Mask::Cep)));
        fields.insert(FIELD_PHONE.to_string(), field(Some(Mask::Phone)));
        if config.variant == FormVariant::Detailed {
            fields.insert(FIELD_DESCRIPTION.to_string(), field(None));
        }

        // new requests are scheduled from tomorrow on, edits may keep today
        let min_preferred_date = match context {
            FormContext::Edit => config.today,
            FormContext::Create => config
                .today
                .checked_add_days(Days::new(1))
                .unwrap_or(config.today),
        };
        if context == FormContext::Create {
            if let Some(f) = fields.get_mut(FIELD_PREFERRED_TIME) {
                f.value = "09:00".to_string();
            }
        }

        Self {
            notifications: NotificationCenter::new(config.notification_ttl_ms),
            config,
            context,
            trigger,
            fields,
            submit: SubmitControl {
                label: DEFAULT_SUBMIT_LABEL.to_string(),
                original_label: DEFAULT_SUBMIT_LABEL.to_string(),
                disabled: false,
            },
            phase: SubmitPhase::Idle,
            last_attempt: None,
            keys_rejected: 0,
            search_button_disabled: false,
            loading: false,
            focus: None,
            clock_ms: 0,
            queue: VecDeque::new(),
            issued: 0,
            in_flight: 0,
            search_deadline: None,
            searches_submitted: Vec::new(),
            min_preferred_date,
        }
    }

    /// Server-rendered values present when the page loads. Unknown names are ignored.
    pub fn prefill(&mut self, values: &BTreeMap<String, String>) {
        for (name, value) in values {
            match self.fields.get_mut(name) {
                Some(f) => {
                    f.value = match f.mask {
                        Some(m) => mask::apply(m, value),
                        None => value.clone(),
                    }
                }
                None => debug!(field = %name, "prefill for absent field ignored"),
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.value.as_str())
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|f| f.disabled)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_button_disabled(&self) -> bool {
        self.search_button_disabled
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn last_attempt(&self) -> Option<&SubmitAttempt> {
        self.last_attempt.as_ref()
    }

    pub fn keys_rejected(&self) -> u64 {
        self.keys_rejected
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn searches_submitted(&self) -> &[String] {
        &self.searches_submitted
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn enqueue(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Processes queued events, including settlements they produce, until the queue is empty.
    pub fn drain(&mut self, source: &dyn AddressSource) {
        while let Some(event) = self.queue.pop_front() {
            self.handle(event, source);
        }
    }

    /// Feeds events one by one, letting each settle before the next arrives.
    pub fn run(&mut self, events: impl IntoIterator<Item = Event>, source: &dyn AddressSource) {
        for event in events {
            self.enqueue(event);
            self.drain(source);
        }
    }

    fn handle(&mut self, event: Event, source: &dyn AddressSource) {
        match event {
            Event::Input { field, value } => self.on_input(&field, &value, source),
            Event::Blur { field } => self.on_blur(&field, source),
            Event::KeyDown { field, key } => self.on_key_down(&field, key),
            Event::SelectService { value } => self.set_value(FIELD_SERVICE_TYPE, value),
            Event::SearchCep => self.on_search_click(source),
            Event::Submit => self.on_submit(),
            Event::SearchInput { value } => self.on_search_input(value),
            Event::Tick { ms } => self.on_tick(ms),
            Event::Dismiss => self.notifications.dismiss(),
            Event::LookupSettled { ticket, result } => self.settle(ticket, result),
        }
    }

    fn set_value(&mut self, name: &str, value: String) {
        if let Some(f) = self.fields.get_mut(name) {
            f.value = value;
        }
    }

    fn notify(&mut self, level: NotificationLevel, message: &str) {
        self.notifications.show(level, message, self.clock_ms);
    }

    fn on_input(&mut self, name: &str, raw: &str, source: &dyn AddressSource) {
        let Some(f) = self.fields.get_mut(name) else {
            debug!(field = %name, "input for absent field ignored");
            return;
        };
        if f.disabled {
            debug!(field = %name, "input on disabled field ignored");
            return;
        }
        f.value = match f.mask {
            Some(m) => mask::apply(m, raw),
            None => raw.to_string(),
        };

        if name == FIELD_CEP
            && self.trigger == LookupTrigger::Complete
            && digits_only(&f.value).len() == CEP_DIGITS
        {
            let cep = f.value.clone();
            self.start_lookup(&cep, source);
        }
    }

    /// Only phone-masked fields filter keystrokes; everything else lets keys through.
    fn on_key_down(&mut self, name: &str, key: KeyPress) {
        let phone = self
            .fields
            .get(name)
            .is_some_and(|f| f.mask == Some(Mask::Phone));
        if phone && !accepts_phone_key(key) {
            debug!(field = %name, key_code = key.key_code, "key rejected");
            self.keys_rejected += 1;
        }
    }

    fn on_blur(&mut self, name: &str, source: &dyn AddressSource) {
        if name != FIELD_CEP || self.trigger != LookupTrigger::Blur {
            return;
        }
        let cep = self.value(FIELD_CEP).unwrap_or_default().to_string();
        if digits_only(&cep).len() == CEP_DIGITS {
            self.start_lookup(&cep, source);
        }
    }

    fn on_search_click(&mut self, source: &dyn AddressSource) {
        if self.search_button_disabled {
            debug!("search button disabled, click ignored");
            return;
        }
        let cep = self.value(FIELD_CEP).unwrap_or_default().to_string();
        if !cep.is_empty() {
            self.start_lookup(&cep, source);
        }
    }

    fn start_lookup(&mut self, raw: &str, source: &dyn AddressSource) {
        if let Some(ticket) = self.issue_lookup(raw) {
            let result = cep::lookup(source, &ticket.cep);
            self.enqueue(Event::LookupSettled { ticket, result });
        }
    }

    /// Checks the code and marks the lookup controls busy. Returns `None`, after
    /// warning the user, when the code does not have eight digits.
    pub fn issue_lookup(&mut self, raw: &str) -> Option<LookupTicket> {
        let cep = digits_only(raw);
        if cep.len() != CEP_DIGITS {
            self.notify(NotificationLevel::Warning, MSG_CEP_LENGTH);
            return None;
        }

        self.issued += 1;
        self.in_flight += 1;
        self.loading = true;
        self.search_button_disabled = true;
        if let Some(f) = self.fields.get_mut(FIELD_CEP) {
            f.disabled = true;
        }
        debug!(generation = self.issued, %cep, in_flight = self.in_flight, "lookup issued");
        Some(LookupTicket {
            generation: self.issued,
            cep,
        })
    }

    /// Applies a finished lookup. Controls are released whatever the outcome.
    pub fn settle(&mut self, ticket: LookupTicket, result: Result<AddressLookupResult, LookupError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = false;
        self.search_button_disabled = false;
        if let Some(f) = self.fields.get_mut(FIELD_CEP) {
            f.disabled = false;
        }
        if ticket.generation < self.issued {
            warn!(
                generation = ticket.generation,
                latest = self.issued,
                cep = %ticket.cep,
                "stale lookup settled after a newer one was issued"
            );
        }

        match result {
            Ok(address) => {
                let populated = self.apply_address(&address);
                if populated > 0 {
                    self.focus = Some(FIELD_NUMBER.to_string());
                    self.notify(NotificationLevel::Success, MSG_CEP_FILLED);
                } else {
                    self.notify(NotificationLevel::Info, MSG_CEP_NO_DATA);
                }
            }
            Err(e) => self.notify(e.level(), e.user_message()),
        }
    }

    fn apply_address(&mut self, address: &AddressLookupResult) -> usize {
        let pairs = [
            (FIELD_STREET, &address.street),
            (FIELD_DISTRICT, &address.district),
            (FIELD_CITY, &address.city),
            (FIELD_STATE, &address.state_code),
        ];
        let mut populated = 0;
        for (name, value) in pairs {
            if let (Some(v), Some(f)) = (value, self.fields.get_mut(name)) {
                f.value = v.clone();
                populated += 1;
            }
        }
        populated
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let optional = |name: &str| {
            self.fields
                .get(name)
                .map(|f| f.value.clone())
                .filter(|v| !v.is_empty())
        };
        FormSnapshot {
            service_type: optional(FIELD_SERVICE_TYPE),
            full_name: self.value(FIELD_FULL_NAME).unwrap_or_default().to_string(),
            cep: self.value(FIELD_CEP).unwrap_or_default().to_string(),
            preferred_time: optional(FIELD_PREFERRED_TIME),
            description: self.fields.get(FIELD_DESCRIPTION).map(|f| f.value.clone()),
        }
    }

    fn on_submit(&mut self) {
        if self.phase == SubmitPhase::Submitting {
            debug!("form already submitting, submit ignored");
            return;
        }
        let snapshot = self.snapshot();
        let outcome = validate(&snapshot, self.config.variant);

        match first_failure(&snapshot, self.config.variant) {
            Some(rule) => {
                self.notify(NotificationLevel::Warning, rule.message());
                if let Some(target) = rule.focus_target() {
                    self.focus = Some(target.to_string());
                }
                // the page stays editable; the next submit starts a fresh attempt
                self.phase = SubmitPhase::Idle;
                self.last_attempt = Some(SubmitAttempt {
                    phase: SubmitPhase::Blocked,
                    outcome,
                });
            }
            None => {
                self.submit.disabled = true;
                self.submit.label = busy_label(self.context).to_string();
                self.phase = SubmitPhase::Submitting;
                self.last_attempt = Some(SubmitAttempt {
                    phase: SubmitPhase::Submitting,
                    outcome,
                });
                info!(path = %self.config.path, "form submitted");
            }
        }
    }

    fn on_search_input(&mut self, value: String) {
        self.set_value(FIELD_SEARCH, value);
        let deadline = self.clock_ms.saturating_add(self.config.search_debounce_ms);
        self.search_deadline = Some(deadline);
    }

    fn on_tick(&mut self, ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(ms);
        self.notifications.expire(self.clock_ms);
        if let Some(deadline) = self.search_deadline {
            if self.clock_ms >= deadline {
                self.search_deadline = None;
                let query = self.value(FIELD_SEARCH).unwrap_or_default().to_string();
                info!(%query, "dashboard search submitted");
                self.searches_submitted.push(query);
            }
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            path: self.config.path.clone(),
            context: self.context,
            phase: self.phase,
            fields: self
                .fields
                .iter()
                .map(|(k, f)| (k.clone(), f.value.clone()))
                .collect(),
            focus: self.focus.clone(),
            submit: self.submit.clone(),
            min_preferred_date: self.min_preferred_date.format("%Y-%m-%d").to_string(),
            notification: self.notifications.current().cloned(),
            notifications: self.notifications.history().to_vec(),
            last_attempt: self.last_attempt.clone(),
            lookups_issued: self.issued,
            keys_rejected: self.keys_rejected,
            searches_submitted: self.searches_submitted.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, PageSession, SessionConfig};
    use crate::domain::constants::*;
    use crate::domain::models::{
        AddressLookupResult, FormVariant, LookupTrigger, NotificationLevel, SubmitPhase,
    };
    use crate::services::cep::testing::StubSource;
    use crate::services::cep::LookupError;
    use crate::services::mask::KeyPress;
    use chrono::NaiveDate;
    use serde_json::json;

    fn config(path: &str) -> SessionConfig {
        SessionConfig {
            path: path.to_string(),
            variant: FormVariant::Standard,
            trigger: None,
            notification_ttl_ms: 5000,
            search_debounce_ms: 500,
            today: NaiveDate::from_ymd_opt(2024, 3, 10).expect("date"),
        }
    }

    fn input(field: &str, value: &str) -> Event {
        Event::Input {
            field: field.into(),
            value: value.into(),
        }
    }

    fn blur(field: &str) -> Event {
        Event::Blur {
            field: field.into(),
        }
    }

    fn last_message(s: &PageSession) -> Option<(NotificationLevel, String)> {
        s.notifications()
            .current()
            .map(|n| (n.level, n.message.clone()))
    }

    #[test]
    fn create_page_looks_up_on_blur_and_fills_address() {
        let src = StubSource::default().found(
            "01001000",
            json!({"logradouro": "Praça da Sé", "bairro": "Sé", "localidade": "São Paulo", "uf": "SP"}),
        );
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([input(FIELD_CEP, "01001000")], &src);
        assert_eq!(s.value(FIELD_CEP), Some("01001-000"));
        assert!(src.calls.borrow().is_empty());

        s.run([blur(FIELD_CEP)], &src);
        assert_eq!(src.calls.borrow().as_slice(), ["01001000"]);
        assert_eq!(s.value(FIELD_CITY), Some("São Paulo"));
        assert_eq!(s.value(FIELD_STATE), Some("SP"));
        assert_eq!(s.focus(), Some(FIELD_NUMBER));
        assert_eq!(
            last_message(&s),
            Some((NotificationLevel::Success, MSG_CEP_FILLED.to_string()))
        );
        assert!(!s.is_loading());
        assert!(!s.is_disabled(FIELD_CEP));
        assert!(!s.search_button_disabled());
    }

    #[test]
    fn edit_page_looks_up_when_eighth_digit_arrives() {
        let src = StubSource::default().found("01001000", json!({"uf": "SP"}));
        let mut s = PageSession::new(config("/solicitacao/4/editar"));
        s.run([input(FIELD_CEP, "0100100")], &src);
        assert!(src.calls.borrow().is_empty());
        s.run([input(FIELD_CEP, "01001000")], &src);
        assert_eq!(src.calls.borrow().len(), 1);
        assert_eq!(s.value(FIELD_STATE), Some("SP"));
    }

    #[test]
    fn partial_response_leaves_empty_keys_untouched() {
        let src = StubSource::default().found(
            "12345678",
            json!({"logradouro": "Rua A", "bairro": "", "localidade": "City", "uf": "SP", "erro": false}),
        );
        let mut s = PageSession::new(config("/solicitar-servico"));
        let mut prefilled = std::collections::BTreeMap::new();
        prefilled.insert(FIELD_DISTRICT.to_string(), "Centro".to_string());
        s.prefill(&prefilled);
        s.run([input(FIELD_CEP, "12345-678"), Event::SearchCep], &src);
        assert_eq!(s.value(FIELD_STREET), Some("Rua A"));
        assert_eq!(s.value(FIELD_DISTRICT), Some("Centro"));
        assert_eq!(s.value(FIELD_CITY), Some("City"));
        assert_eq!(
            last_message(&s).map(|(l, _)| l),
            Some(NotificationLevel::Success)
        );
    }

    #[test]
    fn not_found_changes_nothing() {
        let src = StubSource::default().found("99999999", json!({"erro": true}));
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([input(FIELD_CEP, "99999999"), blur(FIELD_CEP)], &src);
        assert_eq!(s.value(FIELD_STREET), Some(""));
        assert_eq!(s.focus(), None);
        assert_eq!(
            last_message(&s),
            Some((NotificationLevel::Warning, MSG_CEP_NOT_FOUND.to_string()))
        );
    }

    #[test]
    fn empty_address_is_reported_as_no_data() {
        let src = StubSource::default().found("11111111", json!({"logradouro": "", "uf": ""}));
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([input(FIELD_CEP, "11111111"), Event::SearchCep], &src);
        assert_eq!(
            last_message(&s),
            Some((NotificationLevel::Info, MSG_CEP_NO_DATA.to_string()))
        );
    }

    #[test]
    fn transport_failure_shows_error_and_releases_controls() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([input(FIELD_CEP, "22222222"), blur(FIELD_CEP)], &src);
        assert_eq!(
            last_message(&s),
            Some((NotificationLevel::Error, MSG_CEP_FAILED.to_string()))
        );
        assert!(!s.is_loading());
        assert!(!s.is_disabled(FIELD_CEP));
        assert_eq!(s.in_flight(), 0);
    }

    #[test]
    fn short_code_on_button_warns_without_calling_out() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([input(FIELD_CEP, "0100"), Event::SearchCep], &src);
        assert!(src.calls.borrow().is_empty());
        assert_eq!(
            last_message(&s),
            Some((NotificationLevel::Warning, MSG_CEP_LENGTH.to_string()))
        );
        assert!(!s.is_loading());
    }

    #[test]
    fn controls_are_busy_while_a_lookup_is_in_flight() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        let ticket = s.issue_lookup("01001-000").expect("ticket");
        assert!(s.is_loading());
        assert!(s.is_disabled(FIELD_CEP));
        assert!(s.search_button_disabled());

        s.run([input(FIELD_CEP, "99999999"), Event::SearchCep], &src);
        assert_eq!(s.value(FIELD_CEP), Some(""));
        assert!(src.calls.borrow().is_empty());

        s.settle(ticket, Err(LookupError::Transient("timeout".into())));
        assert!(!s.is_loading());
    }

    #[test]
    fn last_settlement_wins_when_lookups_overlap() {
        let mut s = PageSession::new(config("/solicitar-servico"));
        let first = s.issue_lookup("11111111").expect("first");
        let second = s.issue_lookup("22222222").expect("second");
        assert_eq!(s.in_flight(), 2);

        let addr = |city: &str| AddressLookupResult {
            city: Some(city.to_string()),
            found: true,
            ..AddressLookupResult::default()
        };
        s.settle(second, Ok(addr("Second")));
        s.settle(first, Ok(addr("First")));
        assert_eq!(s.value(FIELD_CITY), Some("First"));
        assert_eq!(s.in_flight(), 0);
    }

    #[test]
    fn submit_without_service_type_is_blocked_on_first_rule() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([Event::Submit], &src);
        assert_eq!(s.phase(), SubmitPhase::Idle);
        assert_eq!(
            last_message(&s),
            Some((NotificationLevel::Warning, MSG_SELECT_SERVICE.to_string()))
        );
        assert_eq!(s.focus(), None);
        assert!(!s.submit_control().disabled);
        assert_eq!(s.notifications().history().len(), 1);
    }

    #[test]
    fn blocked_submit_focuses_offending_field() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run(
            [
                Event::SelectService {
                    value: "perfuracao".into(),
                },
                input(FIELD_FULL_NAME, "Jo"),
                Event::Submit,
            ],
            &src,
        );
        assert_eq!(s.focus(), Some(FIELD_FULL_NAME));
        assert_eq!(s.phase(), SubmitPhase::Idle);
        let attempt = s.last_attempt().expect("attempt recorded");
        assert_eq!(attempt.phase, SubmitPhase::Blocked);
        assert_eq!(attempt.outcome.failed_field.as_deref(), Some(FIELD_FULL_NAME));
    }

    #[test]
    fn valid_submit_disables_button_with_busy_label() {
        let src = StubSource::default();
        let events = || {
            vec![
                Event::SelectService {
                    value: "perfuracao".into(),
                },
                input(FIELD_FULL_NAME, "João da Silva"),
                input(FIELD_CEP, "01001000"),
                input(FIELD_PREFERRED_TIME, "16:59"),
                Event::Submit,
            ]
        };

        let mut create = PageSession::new(config("/solicitar-servico"));
        create.run(events(), &src);
        assert_eq!(create.phase(), SubmitPhase::Submitting);
        assert!(create.submit_control().disabled);
        assert_eq!(create.submit_control().label, BUSY_LABEL_CREATE);
        let attempt = create.last_attempt().expect("attempt recorded");
        assert_eq!(attempt.phase, SubmitPhase::Submitting);
        assert!(attempt.outcome.valid);

        let mut edit = PageSession::new(config("/solicitacao/9/editar"));
        edit.run(events(), &src);
        assert_eq!(edit.submit_control().label, BUSY_LABEL_EDIT);

        let before = create.notifications().history().len();
        create.run([Event::Submit], &src);
        assert_eq!(create.notifications().history().len(), before);
    }

    #[test]
    fn out_of_hours_time_blocks_submission() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run(
            [
                Event::SelectService { value: "x".into() },
                input(FIELD_FULL_NAME, "Ana Lima"),
                input(FIELD_CEP, "01001000"),
                input(FIELD_PREFERRED_TIME, "17:00"),
                Event::Submit,
            ],
            &src,
        );
        assert_eq!(s.focus(), Some(FIELD_PREFERRED_TIME));
        assert_eq!(
            last_message(&s).map(|(_, m)| m),
            Some(MSG_BUSINESS_HOURS.to_string())
        );
    }

    #[test]
    fn phone_input_is_masked_in_place() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        s.run([input(FIELD_PHONE, "11987654321")], &src);
        assert_eq!(s.value(FIELD_PHONE), Some("(11) 98765-4321"));
    }

    #[test]
    fn phone_field_swallows_non_digit_keys() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/solicitar-servico"));
        let key = |field: &str, key_code: u32, shift: bool| Event::KeyDown {
            field: field.into(),
            key: KeyPress {
                key_code,
                shift,
                ctrl: false,
            },
        };
        s.run(
            [
                key(FIELD_PHONE, 53, false),
                key(FIELD_PHONE, 8, false),
                key(FIELD_PHONE, 65, false),
                key(FIELD_PHONE, 53, true),
                key(FIELD_FULL_NAME, 65, false),
            ],
            &src,
        );
        assert_eq!(s.keys_rejected(), 2);
        assert_eq!(s.summary().keys_rejected, 2);
    }

    #[test]
    fn huge_tick_saturates_the_clock() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/dashboard/admin"));
        s.run(
            [
                Event::Tick { ms: u64::MAX },
                Event::SearchInput { value: "x".into() },
                Event::Tick { ms: 1 },
            ],
            &src,
        );
        assert_eq!(s.searches_submitted(), ["x".to_string()]);
    }

    #[test]
    fn explicit_trigger_overrides_page_default() {
        let src = StubSource::default().found("01001000", json!({"uf": "SP"}));
        let mut cfg = config("/solicitar-servico");
        cfg.trigger = Some(LookupTrigger::Complete);
        let mut s = PageSession::new(cfg);
        s.run([input(FIELD_CEP, "01001000")], &src);
        assert_eq!(src.calls.borrow().len(), 1);
    }

    #[test]
    fn search_is_debounced_and_notifications_expire() {
        let src = StubSource::default();
        let mut s = PageSession::new(config("/dashboard/admin"));
        s.run(
            [
                Event::SearchInput { value: "ma".into() },
                Event::Tick { ms: 300 },
                Event::SearchInput {
                    value: "maria".into(),
                },
                Event::Tick { ms: 300 },
            ],
            &src,
        );
        assert!(s.searches_submitted().is_empty());
        s.run([Event::Tick { ms: 200 }], &src);
        assert_eq!(s.searches_submitted(), ["maria".to_string()]);

        s.run([Event::Submit, Event::Tick { ms: 4999 }], &src);
        assert!(s.notifications().current().is_some());
        s.run([Event::Tick { ms: 1 }], &src);
        assert!(s.notifications().current().is_none());
    }

    #[test]
    fn create_page_defaults_time_and_minimum_date() {
        let s = PageSession::new(config("/solicitar-servico"));
        let summary = s.summary();
        assert_eq!(summary.min_preferred_date, "2024-03-11");
        assert_eq!(s.value(FIELD_PREFERRED_TIME), Some("09:00"));

        let edit = PageSession::new(config("/solicitacao/1/editar"));
        assert_eq!(edit.summary().min_preferred_date, "2024-03-10");
        assert_eq!(edit.value(FIELD_PREFERRED_TIME), Some(""));
    }

    #[test]
    fn script_events_deserialize_from_tagged_json() {
        let events: Vec<Event> = serde_json::from_value(json!([
            {"kind": "input", "field": "cep", "value": "01001000"},
            {"kind": "blur", "field": "cep"},
            {"kind": "select_service", "value": "limpeza"},
            {"kind": "search_cep"},
            {"kind": "tick", "ms": 10},
            {"kind": "key_down", "field": "phone", "key": {"key_code": 65}},
            {"kind": "submit"}
        ]))
        .expect("events");
        assert_eq!(events.len(), 7);
        assert!(serde_json::from_value::<Event>(json!({"kind": "lookup_settled"})).is_err());
    }
}
