use crate::emit;

use super::criteria::Criteria;
use super::document::{Entry, Property};
use super::error::CompileError;

/// A field that accepts at most one assignment per filter.
#[derive(Debug, Clone)]
pub(crate) struct WriteOnce<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> WriteOnce<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    /// Assign the field, failing if it already holds a value.
    pub(crate) fn set(&mut self, value: T) -> Result<(), CompileError> {
        if self.value.is_some() {
            return Err(CompileError::DuplicateAssignment { field: self.name });
        }
        self.value = Some(value);
        Ok(())
    }

    pub(crate) fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(crate) fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    /// Store a merged value. Only the merge algebra writes through this;
    /// user assignments go through [`set()`](Self::set).
    pub(crate) fn replace(&mut self, value: T) {
        self.value = Some(value);
    }
}

impl WriteOnce<Criteria> {
    /// Assign, treating an existing empty group as still unset.
    pub(crate) fn assign(&mut self, value: Criteria) -> Result<(), CompileError> {
        if self.value.as_ref().is_some_and(Criteria::is_vacant) {
            self.value = None;
        }
        self.set(value)
    }
}

/// The match-criteria half of a filter.
#[derive(Debug, Clone)]
pub(crate) struct CriteriaFields {
    pub(crate) has: WriteOnce<Criteria>,
    pub(crate) has_not: WriteOnce<Criteria>,
    pub(crate) from: WriteOnce<Criteria>,
    pub(crate) to: WriteOnce<Criteria>,
    pub(crate) subject: WriteOnce<Criteria>,
}

impl CriteriaFields {
    fn new() -> Self {
        Self {
            has: WriteOnce::new("has"),
            has_not: WriteOnce::new("has_not"),
            from: WriteOnce::new("from"),
            to: WriteOnce::new("to"),
            subject: WriteOnce::new("subject"),
        }
    }
}

/// The action half of a filter: boolean flags plus the string-valued
/// label/forwarding fields.
#[derive(Debug, Clone)]
pub(crate) struct ActionFields {
    pub(crate) archive: WriteOnce<bool>,
    pub(crate) delete_it: WriteOnce<bool>,
    pub(crate) mark_read: WriteOnce<bool>,
    pub(crate) mark_important: WriteOnce<bool>,
    pub(crate) mark_unimportant: WriteOnce<bool>,
    pub(crate) star: WriteOnce<bool>,
    pub(crate) never_spam: WriteOnce<bool>,
    pub(crate) has_attachment: WriteOnce<bool>,
    pub(crate) label: WriteOnce<String>,
    pub(crate) smart_label: WriteOnce<String>,
    pub(crate) forward_to: WriteOnce<String>,
}

impl ActionFields {
    fn new() -> Self {
        Self {
            archive: WriteOnce::new("archive"),
            delete_it: WriteOnce::new("delete_it"),
            mark_read: WriteOnce::new("mark_read"),
            mark_important: WriteOnce::new("mark_important"),
            mark_unimportant: WriteOnce::new("mark_unimportant"),
            star: WriteOnce::new("star"),
            never_spam: WriteOnce::new("never_spam"),
            has_attachment: WriteOnce::new("has_attachment"),
            label: WriteOnce::new("label"),
            smart_label: WriteOnce::new("smart_label"),
            forward_to: WriteOnce::new("forward_to"),
        }
    }
}

/// One filter definition: match criteria plus actions. Filled in by a
/// definition closure, then resolved into a [`CompiledFilter`].
#[derive(Debug, Clone)]
pub(crate) struct Filter {
    pub(crate) criteria: CriteriaFields,
    pub(crate) actions: ActionFields,
}

impl Filter {
    pub(crate) fn new() -> Self {
        Self {
            criteria: CriteriaFields::new(),
            actions: ActionFields::new(),
        }
    }
}

/// A filter whose chained criteria have been resolved and whose smart-label
/// category has been mapped to its internal code.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    pub(crate) id: usize,
    pub(crate) criteria: CriteriaFields,
    pub(crate) actions: ActionFields,
    pub(crate) smart_label: Option<&'static str>,
}

impl CompiledFilter {
    /// The filter's position in definition order.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The document entry for this filter: one property per field that
    /// resolves to a non-absent value.
    #[must_use]
    pub fn entry(&self) -> Entry {
        let mut properties = Vec::new();
        push_criteria(&mut properties, "hasTheWord", &self.criteria.has);
        push_criteria(&mut properties, "doesNotHaveTheWord", &self.criteria.has_not);
        push_criteria(&mut properties, "from", &self.criteria.from);
        push_criteria(&mut properties, "to", &self.criteria.to);
        push_criteria(&mut properties, "subject", &self.criteria.subject);
        push_string(&mut properties, "label", &self.actions.label);
        if let Some(code) = self.smart_label {
            properties.push(Property::new("smartLabelToApply", code));
        }
        push_string(&mut properties, "forwardTo", &self.actions.forward_to);
        push_flag(&mut properties, "shouldArchive", &self.actions.archive);
        push_flag(&mut properties, "shouldTrash", &self.actions.delete_it);
        push_flag(&mut properties, "shouldMarkAsRead", &self.actions.mark_read);
        push_flag(
            &mut properties,
            "shouldAlwaysMarkAsImportant",
            &self.actions.mark_important,
        );
        push_flag(
            &mut properties,
            "shouldNeverMarkAsImportant",
            &self.actions.mark_unimportant,
        );
        push_flag(&mut properties, "shouldStar", &self.actions.star);
        push_flag(&mut properties, "shouldNeverSpam", &self.actions.never_spam);
        push_flag(&mut properties, "hasAttachment", &self.actions.has_attachment);
        Entry::new(properties)
    }
}

fn push_criteria(out: &mut Vec<Property>, name: &'static str, field: &WriteOnce<Criteria>) {
    if let Some(criteria) = field.get() {
        let value = emit::query(criteria);
        if !value.is_empty() {
            out.push(Property::new(name, value));
        }
    }
}

fn push_string(out: &mut Vec<Property>, name: &'static str, field: &WriteOnce<String>) {
    if let Some(value) = field.get() {
        out.push(Property::new(name, value.clone()));
    }
}

fn push_flag(out: &mut Vec<Property>, name: &'static str, field: &WriteOnce<bool>) {
    if field.get().copied().unwrap_or(false) {
        out.push(Property::new(name, "true"));
    }
}
