// regexgrid-core/src/engine.rs
//! The substitution engine.
//!
//! Compiles one pattern (case-insensitive) and rewrites the selected columns of a
//! table. Selected cells are stringified first, so a numeric column comes out as
//! text; every other column is copied through untouched.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use regex::{NoExpand, Regex};

use crate::compiler::compile_pattern;
use crate::errors::TransformError;
use crate::table::{CellValue, Table};

/// Per-run counters, logged at the end of `apply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionStats {
    pub cells_scanned: usize,
    pub cells_changed: usize,
}

#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    regex: Regex,
}

impl SubstitutionEngine {
    /// Compiles `pattern` once. Fails with `TransformError::PatternCompile`.
    pub fn new(pattern: &str) -> Result<Self, TransformError> {
        Ok(Self {
            regex: compile_pattern(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Replaces every match in `text` with `replacement`, taken literally.
    pub fn replace_text(&self, text: &str, replacement: &str) -> String {
        self.regex.replace_all(text, NoExpand(replacement)).into_owned()
    }

    /// Returns a transformed copy of `table`; the input is left as is.
    pub fn apply(&self, table: &Table, replacement: &str, columns: &[String]) -> Table {
        let (out, stats) = self.apply_with_stats(table, replacement, columns);
        info!(
            "Substitution finished: {} of {} cells changed.",
            stats.cells_changed, stats.cells_scanned
        );
        out
    }

    pub fn apply_with_stats(
        &self,
        table: &Table,
        replacement: &str,
        columns: &[String],
    ) -> (Table, SubstitutionStats) {
        let targets: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| columns.contains(name))
            .map(|(idx, _)| idx)
            .collect();
        debug!("Applying pattern to column indices {:?}", targets);

        let mut out = table.clone();
        let mut stats = SubstitutionStats::default();

        for row in out.rows_mut() {
            for &idx in &targets {
                let Some(cell) = row.get_mut(idx) else { continue };
                let before = cell.to_string();
                let after = self.replace_text(&before, replacement);
                stats.cells_scanned += 1;
                if after != before {
                    stats.cells_changed += 1;
                }
                *cell = CellValue::Text(after);
            }
        }

        (out, stats)
    }
}

/// Compiles `pattern` and applies it in one call.
pub fn apply_substitution(
    table: &Table,
    pattern: &str,
    replacement: &str,
    columns: &[String],
) -> Result<Table, TransformError> {
    Ok(SubstitutionEngine::new(pattern)?.apply(table, replacement, columns))
}
