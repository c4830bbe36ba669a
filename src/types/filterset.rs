use std::fmt;

use tracing::debug;

use crate::compile;
use crate::merge::{MergeKind, PendingMerge};

use super::criteria::{Criteria, any};
use super::document::Document;
use super::error::CompileError;
use super::filter::{CompiledFilter, Filter};

/// Builder for a set of mail filters.
///
/// Filters are defined via closures; chained filters derive from a parent
/// with [`FilterRef::otherwise()`] and [`FilterRef::also()`]. Definitions
/// are collected first and compiled into an immutable [`FilterSet`].
///
/// # Example
///
/// ```
/// use mailsift::FilterSetBuilder;
///
/// let mut builder = FilterSetBuilder::new().me(["me@example.com"]);
/// builder
///     .filter(|f| f.from(["mailman@example.com"]).label("lists"))
///     .otherwise(|f| f.label("everything-else"));
///
/// let filters = builder.compile().unwrap();
/// assert_eq!(filters.document().len(), 2);
/// ```
#[derive(Debug)]
pub struct FilterSetBuilder {
    pub(crate) me: Vec<String>,
    pub(crate) filters: Vec<Filter>,
    pub(crate) merges: Vec<PendingMerge>,
    pub(crate) error: Option<CompileError>,
}

impl Default for FilterSetBuilder {
    fn default() -> Self {
        Self {
            // "me" is Gmail's own alias for the account holder.
            me: vec!["me".to_owned()],
            filters: Vec::new(),
            merges: Vec::new(),
            error: None,
        }
    }
}

impl FilterSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the addresses that count as the filter owner's own. They are
    /// readable from definition blocks via [`FilterBuilder::me()`] and are
    /// the default exemption list for
    /// [`FilterRef::archive_unless_directed()`].
    #[must_use]
    pub fn me<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.me = addresses.into_iter().map(Into::into).collect();
        self
    }

    /// Define a new top-level filter and return a handle for chaining.
    pub fn filter(&mut self, define: impl FnOnce(FilterBuilder) -> FilterBuilder) -> FilterRef<'_> {
        let index = self.define(define);
        FilterRef { set: self, index }
    }

    pub(crate) fn define(&mut self, define: impl FnOnce(FilterBuilder) -> FilterBuilder) -> usize {
        let builder = define(FilterBuilder::new(self.me.clone()));
        if self.error.is_none() {
            self.error = builder.error;
        }
        self.filters.push(builder.filter);
        let index = self.filters.len() - 1;
        debug!(index, "defined filter");
        index
    }

    /// Resolve every pending chain merge, in definition order, and validate
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if any filter assigned a field twice, used
    /// an unknown smart-label category, or a chained merge could not be
    /// resolved.
    pub fn compile(self) -> Result<FilterSet, CompileError> {
        compile::compile(self)
    }
}

/// Intermediate builder passed to a filter definition closure. Every field
/// accepts at most one assignment; a second one fails compilation.
#[derive(Debug)]
pub struct FilterBuilder {
    pub(crate) filter: Filter,
    pub(crate) error: Option<CompileError>,
    me: Vec<String>,
}

impl FilterBuilder {
    pub(crate) fn new(me: Vec<String>) -> Self {
        Self {
            filter: Filter::new(),
            error: None,
            me,
        }
    }

    /// The filter owner's addresses, as configured on the set builder.
    #[must_use]
    pub fn me(&self) -> &[String] {
        &self.me
    }

    /// Words the message must match.
    #[must_use]
    pub fn has(mut self, criteria: impl Into<Criteria>) -> Self {
        let result = self.filter.criteria.has.assign(criteria.into());
        self.note(result);
        self
    }

    /// Words the message must not match.
    #[must_use]
    pub fn has_not(mut self, criteria: impl Into<Criteria>) -> Self {
        let result = self.filter.criteria.has_not.assign(criteria.into());
        self.note(result);
        self
    }

    /// Sender addresses to match, emitted as a dedicated `from` property.
    #[must_use]
    pub fn from(mut self, criteria: impl Into<Criteria>) -> Self {
        let result = self.filter.criteria.from.assign(criteria.into());
        self.note(result);
        self
    }

    /// Recipient addresses to match, emitted as a dedicated `to` property.
    #[must_use]
    pub fn to(mut self, criteria: impl Into<Criteria>) -> Self {
        let result = self.filter.criteria.to.assign(criteria.into());
        self.note(result);
        self
    }

    /// Subject terms to match.
    #[must_use]
    pub fn subject(mut self, criteria: impl Into<Criteria>) -> Self {
        let result = self.filter.criteria.subject.assign(criteria.into());
        self.note(result);
        self
    }

    /// Archive the message.
    #[must_use]
    pub fn archive(mut self) -> Self {
        let result = self.filter.actions.archive.set(true);
        self.note(result);
        self
    }

    /// Move the message to the trash.
    #[must_use]
    pub fn delete_it(mut self) -> Self {
        let result = self.filter.actions.delete_it.set(true);
        self.note(result);
        self
    }

    /// Mark the message as read.
    #[must_use]
    pub fn mark_read(mut self) -> Self {
        let result = self.filter.actions.mark_read.set(true);
        self.note(result);
        self
    }

    /// Always mark the message as important.
    #[must_use]
    pub fn mark_important(mut self) -> Self {
        let result = self.filter.actions.mark_important.set(true);
        self.note(result);
        self
    }

    /// Never mark the message as important.
    #[must_use]
    pub fn mark_unimportant(mut self) -> Self {
        let result = self.filter.actions.mark_unimportant.set(true);
        self.note(result);
        self
    }

    /// Star the message.
    #[must_use]
    pub fn star(mut self) -> Self {
        let result = self.filter.actions.star.set(true);
        self.note(result);
        self
    }

    /// Never send the message to spam.
    #[must_use]
    pub fn never_spam(mut self) -> Self {
        let result = self.filter.actions.never_spam.set(true);
        self.note(result);
        self
    }

    /// Match only messages carrying an attachment.
    #[must_use]
    pub fn has_attachment(mut self) -> Self {
        let result = self.filter.actions.has_attachment.set(true);
        self.note(result);
        self
    }

    /// Apply the given label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        let result = self.filter.actions.label.set(label.into());
        self.note(result);
        self
    }

    /// Apply a smart-label category (`personal`, `forums`, `notifications`,
    /// `updates`, `promotions` or `social`, case-insensitive).
    #[must_use]
    pub fn smart_label(mut self, category: impl Into<String>) -> Self {
        let result = self.filter.actions.smart_label.set(category.into());
        self.note(result);
        self
    }

    /// Forward the message to the given address.
    #[must_use]
    pub fn forward_to(mut self, address: impl Into<String>) -> Self {
        let result = self.filter.actions.forward_to.set(address.into());
        self.note(result);
        self
    }

    fn note(&mut self, result: Result<(), CompileError>) {
        if self.error.is_none() {
            self.error = result.err();
        }
    }
}

/// Options for [`FilterRef::archive_unless_directed()`].
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Addresses that exempt a message from archiving. The set's "me"
    /// addresses when empty.
    pub to: Vec<String>,
    /// Also mark the archived message as read.
    pub mark_read: bool,
}

/// Handle to a just-defined filter, used to chain derived filters off it.
#[derive(Debug)]
pub struct FilterRef<'a> {
    set: &'a mut FilterSetBuilder,
    index: usize,
}

impl<'a> FilterRef<'a> {
    /// Define a filter matching everything this one's criteria did not,
    /// and return its handle.
    pub fn otherwise(
        self,
        define: impl FnOnce(FilterBuilder) -> FilterBuilder,
    ) -> FilterRef<'a> {
        self.chain(MergeKind::Negated, define)
    }

    /// Define a filter matching this one's criteria *and* the new ones,
    /// and return its handle.
    pub fn also(self, define: impl FnOnce(FilterBuilder) -> FilterBuilder) -> FilterRef<'a> {
        self.chain(MergeKind::Positive, define)
    }

    /// Register a filter that archives anything not directed at the given
    /// addresses (the owner's own by default), then return *this* filter's
    /// handle so the chain continues from it.
    pub fn archive_unless_directed(self, options: ArchiveOptions) -> FilterRef<'a> {
        let ArchiveOptions { to, mark_read } = options;
        let exempt = if to.is_empty() {
            self.set.me.clone()
        } else {
            to
        };
        let child = self.set.define(move |f| {
            let f = f
                .has_not([any(exempt.iter().map(|address| format!("to:{address}")))])
                .archive();
            if mark_read { f.mark_read() } else { f }
        });
        self.set.merges.push(PendingMerge {
            parent: self.index,
            child,
            kind: MergeKind::Positive,
        });
        self
    }

    fn chain(
        self,
        kind: MergeKind,
        define: impl FnOnce(FilterBuilder) -> FilterBuilder,
    ) -> FilterRef<'a> {
        let child = self.set.define(define);
        self.set.merges.push(PendingMerge {
            parent: self.index,
            child,
            kind,
        });
        FilterRef {
            set: self.set,
            index: child,
        }
    }
}

/// A compiled, immutable filter set.
#[derive(Debug)]
pub struct FilterSet {
    pub(crate) me: Vec<String>,
    pub(crate) filters: Vec<CompiledFilter>,
}

impl FilterSet {
    /// The generated document: one entry per filter, in definition order.
    #[must_use]
    pub fn document(&self) -> Document {
        Document::new(self.filters.iter().map(CompiledFilter::entry).collect())
    }

    /// Render the document as a Gmail-importable Atom feed.
    #[must_use]
    pub fn to_xml(&self) -> String {
        crate::xml::render(&self.document())
    }

    #[must_use]
    pub fn me(&self) -> &[String] {
        &self.me
    }

    #[must_use]
    pub fn filters(&self) -> &[CompiledFilter] {
        &self.filters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilterSet({} filters)", self.filters.len())
    }
}
