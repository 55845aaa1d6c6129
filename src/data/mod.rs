//! Storm data access.
//!
//! - the `StormSource` query trait and its error type (`source`)
//! - a JSON track snapshot adapter, local or remote (`snapshot`)

pub mod snapshot;
pub mod source;

pub use snapshot::*;
pub use source::*;
