use thiserror::Error;

/// Errors surfaced when a filter-set definition is compiled.
///
/// None of these are recoverable: compilation stops at the first error and
/// produces no document.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A single-write field was assigned twice on the same filter.
    #[error("only one use of '{field}' is permitted per filter")]
    DuplicateAssignment { field: &'static str },

    /// `smart_label` was given a category outside the fixed table.
    #[error("invalid category '{category}'")]
    InvalidCategory { category: String },

    /// The negated chaining merge found parent criteria it has no inversion
    /// rule for. Signals a criteria kind added without merge support, not a
    /// definition mistake.
    #[error("did not invert criteria [{}] while merging a chained filter", kinds.join(", "))]
    UnhandledCriteria { kinds: Vec<String> },
}
