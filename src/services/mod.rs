//! Service layer containing form behavior and side-effect helpers.
//!
//! ## Service map
//! - `mask.rs`: phone/CEP display masks and the phone key filter.
//! - `cep.rs`: address lookup by CEP (remote or fixture source).
//! - `gatekeeper.rs`: ordered submit-time validation.
//! - `session.rs`: page session context object and event queue.
//! - `notify.rs`: single-slot, auto-expiring notifications.
//! - `routes.rs`: backend path conventions and status catalog.
//! - `export.rs`: dashboard table CSV export.
//! - `contract.rs`: contract print/PDF planning.
//! - `format.rs`: pt-BR currency/date/time display.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects (network, files) stay in `cep.rs`, `export.rs` and `output.rs`.
//! - Keep command handlers thin; delegate to services.

pub mod cep;
pub mod contract;
pub mod export;
pub mod format;
pub mod gatekeeper;
pub mod mask;
pub mod notify;
pub mod output;
pub mod routes;
pub mod session;
