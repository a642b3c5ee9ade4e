// regexgrid-core/src/columns.rs
//! Decides which columns a transform touches.

use log::{debug, warn};
use std::collections::HashSet;

/// Resolves the column set for a transform.
///
/// With a non-empty `requested` list, the result is every table column named in
/// it, in table order; unknown names are dropped. Without one, every column except
/// an `id` column (compared case-insensitively) is selected.
pub fn select_columns(requested: Option<&[String]>, table_columns: &[String]) -> Vec<String> {
    match requested {
        Some(requested) if !requested.is_empty() => {
            let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
            let known: HashSet<&str> = table_columns.iter().map(String::as_str).collect();
            for missing in requested.iter().filter(|c| !known.contains(c.as_str())) {
                warn!("Requested column '{}' does not exist in the table; skipping.", missing);
            }
            table_columns
                .iter()
                .filter(|c| wanted.contains(c.as_str()))
                .cloned()
                .collect()
        }
        _ => {
            let selected: Vec<String> = table_columns
                .iter()
                .filter(|c| c.to_lowercase() != "id")
                .cloned()
                .collect();
            debug!("No columns requested; selected {} of {}.", selected.len(), table_columns.len());
            selected
        }
    }
}
