//! Drugs that interact with both members of a pair, looked up over the full
//! (unfiltered) interaction table.

use crate::table::InteractionTable;
use std::collections::BTreeSet;

pub const NO_COMMON_INTERACTORS: &str = "No common interacting drugs found.";

/// Every drug sharing a row with `drug`.
pub fn interactors_of<'a>(table: &'a InteractionTable, drug: &str) -> BTreeSet<&'a str> {
    table.iter().filter_map(|row| row.partner_of(drug)).collect()
}

/// `interactors_of(a) ∩ interactors_of(b)` without `a` and `b` themselves.
/// Unknown drugs simply have no interactors.
pub fn find_common_interactors(table: &InteractionTable, pair: (&str, &str)) -> BTreeSet<String> {
    let (a, b) = pair;
    let of_a = interactors_of(table, a);
    if of_a.is_empty() {
        return BTreeSet::new();
    }
    let of_b = interactors_of(table, b);

    of_a.intersection(&of_b)
        .filter(|drug| **drug != a && **drug != b)
        .map(|drug| drug.to_string())
        .collect()
}

pub fn format_common_interactors(common: &BTreeSet<String>) -> String {
    if common.is_empty() {
        NO_COMMON_INTERACTORS.to_string()
    } else {
        common.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}
