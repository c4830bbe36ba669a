pub(crate) mod criteria;
pub(crate) mod document;
pub(crate) mod error;
pub(crate) mod filter;
pub(crate) mod filterset;

pub use criteria::{Criteria, all, any};
pub use document::{Document, Entry, Property};
pub use error::CompileError;
pub use filter::CompiledFilter;
pub use filterset::{ArchiveOptions, FilterBuilder, FilterRef, FilterSet, FilterSetBuilder};
