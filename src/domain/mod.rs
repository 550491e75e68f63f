//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: form, lookup, validation and report structs.
//! - `constants.rs`: field ids, limits, user-facing messages.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Report structs are the `--json` output schema, and field ids are the
//! contract with the page markup. Keep changes to either explicit.

pub mod constants;
pub mod models;
