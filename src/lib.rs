pub mod convert;
pub mod duplicates;
pub mod error;
pub mod identifiers;
pub mod io;
pub mod ranks;
pub mod registry;
pub mod tracing;
pub mod tree;

pub use error::{Result, TaxdbError};
