// Tue Jan 13 2026 - Alex

pub mod address;
pub mod segment;

pub use address::Address;
pub use segment::Segment;
