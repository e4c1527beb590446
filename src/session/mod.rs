// Mon Jan 19 2026 - Alex

pub mod provenance;
pub mod restore;

pub use provenance::{format_provenance, original_provenance, parse_provenance, Provenance};
pub use restore::restore_session;
