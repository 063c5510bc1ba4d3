use crate::variables::{VariableTable, GLOBAL_VARIABLES};

/// Rewrite a templated query expression into plain PromQL. Pure function of
/// its inputs.
///
/// Each step operates on the output of the previous one, so the order is
/// fixed: per document variable (in declaration order) the `by (...)` clause
/// rewrite runs before the general substitution, document variables run
/// before global ones, and the vendor function aliases are rewritten last.
pub fn normalize(raw: &str, variables: &VariableTable) -> String {
    let mut normalized = raw.to_string();

    for variable in variables.iter() {
        let patterns = reference_patterns(&variable.name);
        let unquoted = unquote(&variable.value);

        // `by ($var)` must be rewritten while the reference is still intact;
        // the general pass below would insert the value in quoted/escaped
        // form and break the clause syntax.
        for pattern in &patterns {
            let clause = format!("by ({pattern})");
            let rewritten = format!("by ({unquoted})");
            normalized = normalized.replace(&clause, &rewritten);
        }

        let replacement = if unquoted.parse::<f64>().is_ok() {
            unquoted.to_string()
        } else {
            escape_quotes(&variable.value)
        };
        for pattern in &patterns {
            normalized = normalized.replace(pattern, &replacement);
        }
    }

    for (name, value) in GLOBAL_VARIABLES {
        normalized = normalized.replace(&format!("${name}"), value);
        normalized = normalized.replace(&format!("${{{name}}}"), value);
    }

    normalized = normalized.replace("xrate(", "rate(");
    normalized.replace("xincrease(", "increase(")
}

/// The four reference syntaxes a document variable can appear under.
fn reference_patterns(name: &str) -> [String; 4] {
    [
        format!("${name}"),
        format!("${{{name}}}"),
        format!("${{{name}:value}}"),
        format!("[[{name}]]"),
    ]
}

/// Strip one layer of enclosing double quotes, if both ends carry one.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Prefix every double quote not already preceded by a backslash.
fn escape_quotes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut previous = None;
    for c in value.chars() {
        if c == '"' && previous != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        previous = Some(c);
    }
    escaped
}
