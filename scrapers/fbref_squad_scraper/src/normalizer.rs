use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::{
    category::{is_reserved, Category},
    error::Result,
    types::{NormalizedTable, Table},
};

/// Renames the columns of a freshly fetched table for `category`.
///
/// Labels are uppercased, every label except `SQUAD` and `SEASON` gets the
/// category short code as prefix, and repeated labels are told apart with a
/// numeric suffix. Rows are left untouched.
pub fn normalize_columns(table: Table, category: &str) -> Result<NormalizedTable> {
    let category = Category::from_key(category)?;
    normalize_for(table, category)
}

pub fn normalize_for(mut table: Table, category: Category) -> Result<NormalizedTable> {
    let renamed = prefixed_names(&table.columns, category.short_code());
    let columns = dedupe_names(renamed);
    debug!("{} columns: {:?} -> {:?}", category, table.columns, columns);

    table.rename_columns(columns)?;
    Ok(NormalizedTable { category, table })
}

/// Uppercases, then prefixes everything that is not a reserved name.
pub fn prefixed_names<S: AsRef<str>>(names: &[S], code: &str) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let upper = name.as_ref().to_ascii_uppercase();
            if is_reserved(&upper) {
                upper
            } else {
                format!("{}_{}", code, upper)
            }
        })
        .collect()
}

/// Gives repeated names a suffix by order of appearance: the first keeps the
/// bare name, the next ones get `1`, `2`, ... Unique names pass through.
///
/// A suffixed name that would hit another existing name skips ahead to the
/// next free number, so the output never contains duplicates.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut next_suffix: BTreeMap<&str, usize> = BTreeMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in &names {
        if counts[name.as_str()] < 2 {
            out.push(name.clone());
            continue;
        }
        let suffix = next_suffix.entry(name.as_str()).or_insert(0);
        if *suffix == 0 {
            *suffix = 1;
            out.push(name.clone());
            continue;
        }
        let mut candidate = format!("{}{}", name, suffix);
        while taken.contains(&candidate) {
            *suffix += 1;
            candidate = format!("{}{}", name, suffix);
        }
        *suffix += 1;
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
