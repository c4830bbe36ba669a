mod compile;
mod emit;
mod merge;
mod types;
mod xml;

pub use types::{
    ArchiveOptions, CompileError, CompiledFilter, Criteria, Document, Entry, FilterBuilder,
    FilterRef, FilterSet, FilterSetBuilder, Property, all, any,
};
