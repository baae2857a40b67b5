//! Bind-variable translation.
//!
//! Callers write queries with percent-style named placeholders
//! (`%(name)s`); the gateway expects colon-style references (`:name`,
//! or `::name` for sequence values that it expands into IN-lists).
//! Translation also narrows the bind mapping down to the names the
//! query actually references: bind mappings are often shared across
//! many queries and can be very noisy, and forwarding unreferenced
//! entries both wastes wire space and leaks unrelated data into
//! whatever the server logs.

use std::collections::HashSet;

use crate::error::{LatticeLinkError, Result};
use crate::models::BindVars;

/// Rewrite `%(name)s` placeholders to colon references and export only
/// the bind variables the query references.
///
/// A name missing from `bind_vars` fails with an `InterfaceError`
/// carrying the missing key, the original query, and the full original
/// mapping, before any RPC is attempted.
///
/// # Examples
///
/// ```rust
/// use lattice_link::bindvars::translate;
/// use lattice_link::models::{BindValue, BindVars};
///
/// let mut bind_vars = BindVars::new();
/// bind_vars.insert("id".to_string(), BindValue::Int(5));
/// bind_vars.insert("unrelated".to_string(), BindValue::Int(9));
///
/// let (sql, exported) =
///     translate("select * from t where id = %(id)s", &bind_vars).unwrap();
/// assert_eq!(sql, "select * from t where id = :id");
/// assert_eq!(exported.len(), 1);
/// ```
pub fn translate(query: &str, bind_vars: &BindVars) -> Result<(String, BindVars)> {
    let mut rewritten = String::with_capacity(query.len());
    let mut accessed: HashSet<&str> = HashSet::new();

    let mut chars = query.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '%' {
            rewritten.push(c);
            continue;
        }
        match chars.peek() {
            // %% is a literal percent
            Some(&(_, '%')) => {
                chars.next();
                rewritten.push('%');
            }
            Some(&(start, '(')) => {
                chars.next();
                let name = take_name(query, start, &mut chars, bind_vars)?;
                let value = match bind_vars.get(name) {
                    Some(value) => value,
                    None => {
                        return Err(missing_key(name, query, bind_vars));
                    }
                };
                accessed.insert(name);
                if value.is_sequence() {
                    rewritten.push_str("::");
                } else {
                    rewritten.push(':');
                }
                rewritten.push_str(name);
            }
            _ => {
                return Err(malformed(
                    "stray '%' in query; use %(name)s placeholders or %% for a literal percent",
                    query,
                    bind_vars,
                ));
            }
        }
    }

    let exported: BindVars = accessed
        .into_iter()
        .map(|name| (name.to_string(), bind_vars[name].clone()))
        .collect();
    Ok((rewritten, exported))
}

/// Consume `name)s` after an opening `%(`, returning the name slice.
fn take_name<'q>(
    query: &'q str,
    open_paren: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    bind_vars: &BindVars,
) -> Result<&'q str> {
    let name_start = open_paren + 1;
    let mut name_end = None;
    for (i, c) in chars.by_ref() {
        if c == ')' {
            name_end = Some(i);
            break;
        }
    }
    let Some(name_end) = name_end else {
        return Err(malformed("unterminated %( placeholder", query, bind_vars));
    };
    match chars.next() {
        Some((_, 's')) => Ok(&query[name_start..name_end]),
        _ => Err(malformed(
            "placeholder must end in 's', as in %(name)s",
            query,
            bind_vars,
        )),
    }
}

fn missing_key(name: &str, query: &str, bind_vars: &BindVars) -> LatticeLinkError {
    LatticeLinkError::InterfaceError {
        message: format!("missing bind variable '{}'", name),
        query: Some(query.to_string()),
        bind_vars: Some(bind_vars.clone()),
    }
}

fn malformed(detail: &str, query: &str, bind_vars: &BindVars) -> LatticeLinkError {
    LatticeLinkError::InterfaceError {
        message: detail.to_string(),
        query: Some(query.to_string()),
        bind_vars: Some(bind_vars.clone()),
    }
}
