//! API endpoint handlers.
//!
//! Handlers stay thin: assembly, the backend call and report building
//! live in their own modules.

pub mod analyze;
pub mod form;
pub mod health;
pub mod result;
pub mod sessions;
