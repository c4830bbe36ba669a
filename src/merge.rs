//! Criteria merge strategies for chained filters.
//!
//! A chained filter starts with only the fields its own definition block
//! set; the merge pulls its parent's criteria in, either negated
//! (`otherwise` semantics) or conjoined (`also` semantics).

use crate::types::filter::{CriteriaFields, Filter, WriteOnce};
use crate::{CompileError, Criteria};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergeKind {
    Negated,
    Positive,
}

/// A chain edge recorded at definition time and resolved at compile time.
/// `parent` always precedes `child` in definition order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingMerge {
    pub(crate) parent: usize,
    pub(crate) child: usize,
    pub(crate) kind: MergeKind,
}

/// The criteria kinds a merge walks over, named for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CriteriaKind {
    To,
    From,
    Subject,
    HasNot,
    Has,
}

impl CriteriaKind {
    fn as_str(self) -> &'static str {
        match self {
            CriteriaKind::To => "to",
            CriteriaKind::From => "from",
            CriteriaKind::Subject => "subject",
            CriteriaKind::HasNot => "has_not",
            CriteriaKind::Has => "has",
        }
    }
}

/// Apply "else" semantics: the child matches everything the parent's
/// criteria did not.
pub(crate) fn negated(child: &mut Filter, parent: &Filter) -> Result<(), CompileError> {
    let mut pending = snapshot(&parent.criteria);

    let to = load(&mut pending, CriteriaKind::To, child.criteria.to.get());
    extend(&mut child.criteria.to, invert(to));

    let from = load(&mut pending, CriteriaKind::From, child.criteria.from.get());
    extend(&mut child.criteria.from, invert(from));

    let subject = load(&mut pending, CriteriaKind::Subject, child.criteria.subject.get());
    extend(&mut child.criteria.subject, invert(subject));

    let has_not = load(&mut pending, CriteriaKind::HasNot, child.criteria.has_not.get());
    let has = load(&mut pending, CriteriaKind::Has, child.criteria.has.get());
    extend(&mut child.criteria.has_not, fold_into_not(has_not, has));

    if !pending.is_empty() {
        return Err(CompileError::UnhandledCriteria {
            kinds: pending
                .iter()
                .map(|(kind, _)| kind.as_str().to_owned())
                .collect(),
        });
    }
    Ok(())
}

/// Apply "and also" semantics: the child keeps its own criteria and gains
/// the parent's.
pub(crate) fn positive(child: &mut Filter, parent: &Filter) {
    adopt_or_append(&mut child.criteria.has, parent.criteria.has.get());
    adopt_or_append(&mut child.criteria.has_not, parent.criteria.has_not.get());
    adopt_or_append(&mut child.criteria.from, parent.criteria.from.get());
    adopt_or_append(&mut child.criteria.to, parent.criteria.to.get());
    adopt_or_append(&mut child.criteria.subject, parent.criteria.subject.get());
}

/// Clone the parent's set criteria into a worklist. The merge consumes it
/// kind by kind; whatever is left over had no inversion rule.
fn snapshot(criteria: &CriteriaFields) -> Vec<(CriteriaKind, Criteria)> {
    let mut out = Vec::new();
    if let Some(c) = criteria.to.get() {
        out.push((CriteriaKind::To, c.clone()));
    }
    if let Some(c) = criteria.from.get() {
        out.push((CriteriaKind::From, c.clone()));
    }
    if let Some(c) = criteria.subject.get() {
        out.push((CriteriaKind::Subject, c.clone()));
    }
    if let Some(c) = criteria.has_not.get() {
        out.push((CriteriaKind::HasNot, c.clone()));
    }
    if let Some(c) = criteria.has.get() {
        out.push((CriteriaKind::Has, c.clone()));
    }
    out
}

/// Take one kind out of the worklist, dropping parts the child already has
/// on its same-named field.
fn load(
    pending: &mut Vec<(CriteriaKind, Criteria)>,
    kind: CriteriaKind,
    own: Option<&Criteria>,
) -> Vec<Criteria> {
    let position = match pending.iter().position(|(k, _)| *k == kind) {
        Some(position) => position,
        None => return Vec::new(),
    };
    let (_, value) = pending.remove(position);
    let own_parts: Vec<Criteria> = own.cloned().map(Criteria::into_parts).unwrap_or_default();
    value
        .into_parts()
        .into_iter()
        .filter(|part| !own_parts.contains(part))
        .collect()
}

fn invert(parts: Vec<Criteria>) -> Vec<Criteria> {
    parts.into_iter().map(invert_one).collect()
}

/// Toggle the negation of one part. A literal flips a leading `-`
/// character; composite parts wrap in (or unwrap from) `Not`.
fn invert_one(part: Criteria) -> Criteria {
    match part {
        Criteria::Literal(text) => match text.strip_prefix('-') {
            Some(stripped) => Criteria::Literal(stripped.to_owned()),
            None => Criteria::Literal(format!("-{text}")),
        },
        Criteria::Not(inner) => *inner,
        other => Criteria::Not(Box::new(other)),
    }
}

/// Fold the parent's remaining positive and negative word criteria into
/// terms for the child's `has_not`. An or-group heading the negative list
/// absorbs the positive terms; otherwise a non-empty negative list unions
/// with them into a fresh or-group; a lone positive list passes through.
fn fold_into_not(mut has_not: Vec<Criteria>, has: Vec<Criteria>) -> Vec<Criteria> {
    match has_not.first_mut() {
        Some(Criteria::Any(items)) => {
            items.extend(has);
            has_not
        }
        Some(_) => {
            has_not.extend(has);
            vec![Criteria::Any(has_not)]
        }
        None => has,
    }
}

/// Append merged parts after whatever the field already holds.
fn extend(field: &mut WriteOnce<Criteria>, additions: Vec<Criteria>) {
    if additions.is_empty() {
        return;
    }
    let mut parts = field.take().map(Criteria::into_parts).unwrap_or_default();
    parts.extend(additions);
    field.replace(Criteria::All(parts));
}

fn adopt_or_append(field: &mut WriteOnce<Criteria>, parent_value: Option<&Criteria>) {
    let Some(parent_value) = parent_value else {
        return;
    };
    match field.take() {
        None => field.replace(parent_value.clone()),
        Some(own) => {
            let own_parts = own.into_parts();
            let additions: Vec<Criteria> = parent_value
                .clone()
                .into_parts()
                .into_iter()
                .filter(|part| !own_parts.contains(part))
                .collect();
            let mut parts = own_parts;
            parts.extend(additions);
            field.replace(Criteria::All(parts));
        }
    }
}
