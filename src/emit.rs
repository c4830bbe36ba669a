use crate::Criteria;

/// Render a criteria tree as a single flat query string.
///
/// Parentheses are inserted at every nesting boundary below the top level
/// and nowhere else: the flat query language has no other grouping
/// delimiter, and a top-level list or group needs none.
pub(crate) fn query(criteria: &Criteria) -> String {
    render(criteria, false)
}

fn render(criteria: &Criteria, nested: bool) -> String {
    match criteria {
        Criteria::Literal(text) => {
            // A literal may itself be a multi-token fragment; once it sits
            // inside a larger expression its tokens must stay grouped.
            if nested && text.chars().any(char::is_whitespace) {
                format!("({text})")
            } else {
                text.clone()
            }
        }
        Criteria::All(items) => join(items, " ", nested),
        Criteria::Any(items) => join(items, " OR ", nested),
        Criteria::Not(inner) => format!("-{}", render(inner, true)),
    }
}

fn join(items: &[Criteria], infix: &str, nested: bool) -> String {
    let joined = items
        .iter()
        .map(|item| render(item, true))
        .collect::<Vec<_>>()
        .join(infix);
    if nested {
        format!("({joined})")
    } else {
        joined
    }
}
