//! Form assembler: turns user-entered field values into one well-formed
//! `PatientRecord`.
//!
//! Constraints are enforced at the point of entry. Numbers are clamped
//! into their declared range, enumerations are closed Rust enums, and
//! repeated groups are ordered sequences sized by the user. No
//! cross-field validation happens here; the backend is the authority on
//! clinical consistency.

pub mod assembler;
pub mod constraints;
pub mod defaults;
pub mod group;
pub mod submission;

pub use assembler::{assemble, PatientForm};
pub use defaults::{DefaultDates, FormDefaults, GroupCounts};
pub use group::RepeatedGroup;
pub use submission::FormSubmission;
