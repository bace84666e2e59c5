//! Middleware for request processing.
//!
//! Every request passes through a chain of stages. A stage either hands the
//! request to the next one or short-circuits by returning a
//! [`RawError`](bastion_core::RawError); the failure then travels back out
//! to [`error::handle_errors`], the only place that classifies and renders
//! errors.
//!
//! # Modules
//!
//! - [`error`]: global error middleware and the not-found fallback
//! - [`catch_async`]: turns handler panics into forwarded failures
//! - [`auth`]: bearer-token authentication, attaches [`auth::CurrentUser`]
//! - [`role`]: role-based authorization over the attached identity
//!
//! # Ordering
//!
//! ```text
//! request -> handle_errors -> catch_async -> require_auth -> role_guard -> handler
//! ```
//!
//! Route layers are attached so that `require_auth` always completes before
//! `role_guard` or the handler runs.

pub mod auth;
pub mod catch_async;
pub mod error;
pub mod role;
