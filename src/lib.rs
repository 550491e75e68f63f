//! Form engine for the service-request portal.
//!
//! The portal's pages are modelled as a [`services::session::PageSession`]:
//! a context object holding the form fields, the controls that react to them
//! and a single-threaded event queue. The pieces it coordinates are usable on
//! their own:
//!
//! - [`services::mask`] normalizes phone and CEP input,
//! - [`services::cep`] looks addresses up by CEP,
//! - [`services::gatekeeper`] decides whether a submission may go through.

pub mod config;
pub mod domain;
pub mod services;
