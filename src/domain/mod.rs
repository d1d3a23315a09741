//! Domain logic - pure version rules independent of network and file I/O

pub mod version;

pub use version::{GoVersion, ReleaseKind};
