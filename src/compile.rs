use tracing::debug;

use crate::CompileError;
use crate::merge::{self, MergeKind};
use crate::types::filter::{CompiledFilter, Filter};
use crate::types::filterset::{FilterSet, FilterSetBuilder};

pub(crate) fn compile(builder: FilterSetBuilder) -> Result<FilterSet, CompileError> {
    let FilterSetBuilder {
        me,
        mut filters,
        merges,
        error,
    } = builder;

    if let Some(error) = error {
        return Err(error);
    }

    // Chained filters are always appended after their parent, so resolving
    // in definition order resolves every parent before its children.
    for pending in &merges {
        debug_assert!(pending.parent < pending.child);
        let (head, tail) = filters.split_at_mut(pending.child);
        let parent = &head[pending.parent];
        let child = &mut tail[0];
        match pending.kind {
            MergeKind::Negated => merge::negated(child, parent)?,
            MergeKind::Positive => merge::positive(child, parent),
        }
        debug!(
            parent = pending.parent,
            child = pending.child,
            kind = ?pending.kind,
            "resolved chained merge"
        );
    }

    let compiled = filters
        .into_iter()
        .enumerate()
        .map(|(id, filter)| resolve(id, filter))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(filters = compiled.len(), "compiled filter set");

    Ok(FilterSet {
        me,
        filters: compiled,
    })
}

fn resolve(id: usize, filter: Filter) -> Result<CompiledFilter, CompileError> {
    let smart_label = match filter.actions.smart_label.get() {
        Some(category) => Some(smart_label_code(category)?),
        None => None,
    };
    Ok(CompiledFilter {
        id,
        criteria: filter.criteria,
        actions: filter.actions,
        smart_label,
    })
}

/// Map a smart-label category onto its internal label code.
fn smart_label_code(category: &str) -> Result<&'static str, CompileError> {
    match category.to_ascii_lowercase().as_str() {
        "personal" => Ok("^smartlabel_personal"),
        "forums" => Ok("^smartlabel_group"),
        "notifications" | "updates" => Ok("^smartlabel_notification"),
        "promotions" => Ok("^smartlabel_promo"),
        "social" => Ok("^smartlabel_social"),
        _ => Err(CompileError::InvalidCategory {
            category: category.to_owned(),
        }),
    }
}
