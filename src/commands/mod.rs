//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs`: dashboard-side commands: export/status/route/contract/format.
//! - `forms.rs`: mask/cep/validate/session.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate behavior to `solicita::services`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod forms;

pub use admin::{
    handle_contract_commands, handle_export_commands, handle_format_commands,
    handle_route_commands, handle_status_commands,
};
pub use forms::handle_form_commands;
