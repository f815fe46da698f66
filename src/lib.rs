//! Core of a time-boxed crime-report intake service.
//!
//! An officer opens a dashboard session for a shift, guests file structured
//! submissions through intake links, and the officer reviews each one,
//! closing it (keeping only a minimal log) or discarding it. Submission
//! content lives exclusively in the in-memory [`store`], scoped to its
//! dashboard; the [`sessions::expiry`] reaper reclaims it the moment a
//! session expires or is otherwise deactivated.

pub mod configuration;
pub mod error_handling;
pub mod identity;
pub mod renderer;
pub mod review;
pub mod schemas;
pub mod sessions;
pub mod store;
