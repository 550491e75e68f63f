//! CEP address lookup.
//!
//! The lookup service is reached through [`AddressSource`]; the remote client
//! talks to a ViaCEP-compatible endpoint (`{base}/{cep}/json/`), the fixture
//! source reads `{dir}/{cep}.json` from disk.

use crate::domain::constants::{CEP_DIGITS, MSG_CEP_FAILED, MSG_CEP_LENGTH, MSG_CEP_NOT_FOUND};
use crate::domain::models::{AddressLookupResult, NotificationLevel};
use crate::services::mask::digits_only;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("cep must have 8 digits, got {0:?}")]
    Validation(String),
    #[error("cep not found: {0}")]
    NotFound(String),
    #[error("cep lookup failed: {0}")]
    Transient(String),
}

impl LookupError {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Validation(_) => "validation_error",
            LookupError::NotFound(_) => "not_found",
            LookupError::Transient(_) => "transient_error",
        }
    }

    pub fn level(&self) -> NotificationLevel {
        match self {
            LookupError::Transient(_) => NotificationLevel::Error,
            _ => NotificationLevel::Warning,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::Validation(_) => MSG_CEP_LENGTH,
            LookupError::NotFound(_) => MSG_CEP_NOT_FOUND,
            LookupError::Transient(_) => MSG_CEP_FAILED,
        }
    }
}

/// Raw lookup body. Every key is optional; ViaCEP reports misses with
/// `"erro": true` (older deployments send the string `"true"`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CepResponse {
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
}

impl CepResponse {
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Keeps only keys that carry a non-empty value.
    pub fn into_result(self) -> AddressLookupResult {
        fn present(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        AddressLookupResult {
            street: present(self.logradouro),
            district: present(self.bairro),
            city: present(self.localidade),
            state_code: present(self.uf),
            found: true,
        }
    }
}

pub trait AddressSource {
    /// `cep` is always exactly eight digits.
    fn fetch(&self, cep: &str) -> Result<CepResponse, LookupError>;

    fn describe(&self) -> String;
}

pub struct ViaCepClient {
    base: String,
    client: reqwest::blocking::Client,
}

impl ViaCepClient {
    pub fn new(base: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, cep: &str) -> String {
        format!("{}/{}/json/", self.base, cep)
    }
}

impl AddressSource for ViaCepClient {
    fn fetch(&self, cep: &str) -> Result<CepResponse, LookupError> {
        let url = self.url_for(cep);
        debug!(%url, "requesting address");
        let resp = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LookupError::Transient(e.to_string()))?;
        let body = resp
            .text()
            .map_err(|e| LookupError::Transient(e.to_string()))?;
        parse_body(&body)
    }

    fn describe(&self) -> String {
        self.base.clone()
    }
}

/// Offline source: one `{cep}.json` file per code.
pub struct FixtureDir {
    dir: PathBuf,
}

impl FixtureDir {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl AddressSource for FixtureDir {
    fn fetch(&self, cep: &str) -> Result<CepResponse, LookupError> {
        let path = self.dir.join(format!("{}.json", cep));
        debug!(path = %path.display(), "reading address fixture");
        let body = std::fs::read_to_string(&path)
            .map_err(|e| LookupError::Transient(format!("{}: {}", path.display(), e)))?;
        parse_body(&body)
    }

    fn describe(&self) -> String {
        self.dir.to_string_lossy().to_string()
    }
}

fn parse_body(body: &str) -> Result<CepResponse, LookupError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LookupError::Transient(format!("malformed body: {}", e)))?;
    if !value.is_object() {
        return Err(LookupError::Transient("malformed body: not an object".into()));
    }
    serde_json::from_value(value)
        .map_err(|e| LookupError::Transient(format!("malformed body: {}", e)))
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn open_source(source: &str, timeout_ms: u64) -> anyhow::Result<Box<dyn AddressSource>> {
    if is_remote(source) {
        return Ok(Box::new(ViaCepClient::new(source, timeout_ms)?));
    }
    let dir = Path::new(source);
    if !dir.is_dir() {
        anyhow::bail!("cep source is neither a url nor a directory: {}", source);
    }
    Ok(Box::new(FixtureDir::new(dir)))
}

/// Validates the code and, when it has eight digits, asks `source` exactly once.
pub fn lookup(source: &dyn AddressSource, raw: &str) -> Result<AddressLookupResult, LookupError> {
    let cep = digits_only(raw);
    if cep.len() != CEP_DIGITS {
        return Err(LookupError::Validation(cep));
    }

    let resp = source.fetch(&cep).inspect_err(|e| {
        warn!(%cep, source = %source.describe(), error = %e, "address lookup failed");
    })?;
    if resp.is_not_found() {
        info!(%cep, "cep not found");
        return Err(LookupError::NotFound(cep));
    }
    Ok(resp.into_result())
}
