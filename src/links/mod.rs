//! Link classification, extraction, and validation.
//!
//! A raw link token goes through [`classify`] to decide whether it is an
//! anchor, a path inside the repository, or an external URL, and then
//! through [`validate`] to produce a [`LinkRecord`].

pub mod classify;
pub mod extract;
pub mod record;
pub mod validate;

pub use classify::{classify, resolve_relative, Classified};
pub use extract::extract_links;
pub use record::{LinkRecord, LinkStatus, NOT_FOUND_MESSAGE};
pub use validate::validate;
