//! Record normalization
//!
//! Maps heterogeneous nested JSON records onto a fixed set of logical
//! fields. Each field is resolved on its own through a [`FieldPath`]; a
//! missing segment yields `null` for that field and never an error. This is
//! the only I/O-free component.

mod paths;
mod record;

pub use paths::{lookup, FieldPath};
pub use record::{FieldPaths, NormalizedRecord};

#[cfg(test)]
mod tests;
