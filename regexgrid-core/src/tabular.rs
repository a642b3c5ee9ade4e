// regexgrid-core/src/tabular.rs
//! Reading and writing table files.
//!
//! Uploads are CSV, XLS or XLSX, picked by file extension. CSV columns are typed
//! per column: a column is numeric or boolean only if every non-missing value is,
//! otherwise every value stays text. Spreadsheet cells keep the type the workbook
//! stored, with whole numbers read back as integers. In both cases a numeric column
//! that mixes integers with floats or missing values is widened to floats.
//!
//! Headers are made unique: a blank header becomes `Unnamed: <index>` and repeats
//! get `.1`, `.2`, ... suffixes.
//!
//! Output is CSV or a single-sheet XLSX workbook.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use anyhow::{anyhow, Context};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use log::{debug, info};

use crate::errors::TransformError;
use crate::table::{CellValue, Table};

pub const UNSUPPORTED_EXTENSION: &str =
    "Unsupported or invalid file: Only CSV, XLS, XLSX are supported";

/// Sheet name used for XLSX output.
pub const OUTPUT_SHEET_NAME: &str = "Processed Data";

/// Strings treated as missing values when typing CSV columns.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// XLS or XLSX; calamine detects which.
    Spreadsheet,
}

impl TableFormat {
    /// Picks the reader from the file name's extension, ignoring case.
    pub fn from_filename(filename: &str) -> Result<Self, TransformError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(TableFormat::Csv)
        } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
            Ok(TableFormat::Spreadsheet)
        } else {
            Err(TransformError::UnsupportedFormat(UNSUPPORTED_EXTENSION.to_string()))
        }
    }
}

fn invalid_file(cause: impl std::fmt::Display) -> TransformError {
    TransformError::UnsupportedFormat(format!("Unsupported or invalid file: {}", cause))
}

/// Parses an uploaded file into a `Table`.
pub fn read_table(bytes: &[u8], filename: &str) -> Result<Table, TransformError> {
    let format = TableFormat::from_filename(filename)?;
    let table = match format {
        TableFormat::Csv => read_csv(bytes)?,
        TableFormat::Spreadsheet => read_spreadsheet(bytes)?,
    };
    info!(
        "Loaded '{}' as {:?}: {} columns, {} rows.",
        filename,
        format,
        table.columns().len(),
        table.row_count()
    );
    Ok(table)
}

/// Reads a table from a file on disk.
pub fn read_table_from_path(path: &Path) -> Result<Table, TransformError> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    read_table(&bytes, &filename)
}

fn read_csv(bytes: &[u8]) -> Result<Table, TransformError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(invalid_file)?,
        None => return Err(invalid_file("No columns to parse from file")),
    };
    let columns = unique_headers(header.iter().map(str::to_string).collect());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (idx, record) in records.enumerate() {
        let record = record.map_err(invalid_file)?;
        if record.len() > width {
            // Header is line 1, so the first data record is line 2.
            return Err(invalid_file(format!(
                "Error tokenizing data. Expected {} fields in line {}, saw {}",
                width,
                idx + 2,
                record.len()
            )));
        }
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::with_capacity(width); raw_rows.len()];
    for col in 0..width {
        let raw: Vec<Option<&str>> = raw_rows
            .iter()
            .map(|r| r.get(col).map(String::as_str).filter(|v| !NA_VALUES.contains(v)))
            .collect();
        for (row, cell) in rows.iter_mut().zip(type_csv_column(&raw)) {
            row.push(cell);
        }
    }

    Ok(Table::new(columns, rows))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim() {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

fn parse_float(v: &str) -> Option<f64> {
    v.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Types one CSV column. `None` entries are missing values.
fn type_csv_column(raw: &[Option<&str>]) -> Vec<CellValue> {
    let present: Vec<&str> = raw.iter().flatten().copied().collect();
    let kind = if present.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnKind::Int
    } else if present.iter().all(|v| parse_float(v).is_some()) {
        ColumnKind::Float
    } else if present.iter().all(|v| parse_bool(v).is_some()) {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    };

    let mut cells: Vec<CellValue> = raw
        .iter()
        .map(|value| {
            let Some(v) = value else { return CellValue::Null };
            match kind {
                ColumnKind::Int => v.trim().parse::<i64>().map_or(CellValue::Null, CellValue::Int),
                ColumnKind::Float => parse_float(v).map_or(CellValue::Null, CellValue::Float),
                ColumnKind::Bool => parse_bool(v).map_or(CellValue::Null, CellValue::Bool),
                ColumnKind::Text => CellValue::Text(v.to_string()),
            }
        })
        .collect();
    widen_numeric(&mut cells);
    cells
}

/// Turns an all-numeric column into floats when it mixes ints with floats or nulls.
fn widen_numeric(cells: &mut [CellValue]) {
    let all_numeric = cells
        .iter()
        .all(|c| matches!(c, CellValue::Null | CellValue::Int(_) | CellValue::Float(_)));
    let has_int = cells.iter().any(|c| matches!(c, CellValue::Int(_)));
    let needs_float = cells
        .iter()
        .any(|c| matches!(c, CellValue::Null | CellValue::Float(_)));

    if all_numeric && has_int && needs_float {
        for cell in cells.iter_mut() {
            if let CellValue::Int(i) = *cell {
                *cell = CellValue::Float(i as f64);
            }
        }
    }
}

/// Makes header names unique and fills in blank ones.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while used.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn read_spreadsheet(bytes: &[u8]) -> Result<Table, TransformError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(invalid_file)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| invalid_file("workbook has no worksheets"))?
        .map_err(invalid_file)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        debug!("First worksheet is empty.");
        return Ok(Table::default());
    };
    let columns = unique_headers(
        header
            .iter()
            .map(|c| if c.is_empty() { String::new() } else { c.to_string() })
            .collect(),
    );

    let mut body: Vec<Vec<CellValue>> = rows
        .map(|r| r.iter().map(spreadsheet_cell).collect())
        .collect();

    for col in 0..columns.len() {
        let mut cells: Vec<CellValue> = body
            .iter()
            .map(|r| r.get(col).cloned().unwrap_or_default())
            .collect();
        widen_numeric(&mut cells);
        for (row, cell) in body.iter_mut().zip(cells) {
            if let Some(slot) = row.get_mut(col) {
                *slot = cell;
            }
        }
    }

    Ok(Table::new(columns, body))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            CellValue::Int(*f as i64)
        }
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time() == chrono::NaiveTime::MIN => {
                CellValue::Text(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => CellValue::Text(cell.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Download format for a transformed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// `xlsx` in any case selects XLSX; anything else falls back to CSV.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("xlsx") {
            OutputFormat::Xlsx
        } else {
            OutputFormat::Csv
        }
    }

    /// Picks the format from an output path's extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(OutputFormat::parse)
            .unwrap_or_default()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_name(&self) -> String {
        format!("processed_data.{}", self.extension())
    }
}

/// Serialises `table` in `format`.
pub fn write_table(table: &Table, format: OutputFormat) -> Result<Vec<u8>, TransformError> {
    let bytes = match format {
        OutputFormat::Csv => write_csv(table)?,
        OutputFormat::Xlsx => write_xlsx(table)?,
    };
    debug!("Serialised {} rows as {} ({} bytes).", table.row_count(), format.extension(), bytes.len());
    Ok(bytes)
}

fn write_csv(table: &Table) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV output: {}", e))
}

fn write_xlsx(table: &Table) -> anyhow::Result<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(OUTPUT_SHEET_NAME)
        .map_err(|e| anyhow!("Failed to create worksheet: {}", e))?;

    for (col, name) in table.columns().iter().enumerate() {
        sheet
            .get_cell_mut((col as u32 + 1, 1u32))
            .set_value_string(name.as_str());
    }
    for (r, row) in table.rows().iter().enumerate() {
        let row_num = r as u32 + 2;
        for (c, value) in row.iter().enumerate() {
            let cell = sheet.get_cell_mut((c as u32 + 1, row_num));
            match value {
                CellValue::Null => {}
                CellValue::Int(i) => {
                    cell.set_value_number(*i as f64);
                }
                CellValue::Float(f) => {
                    cell.set_value_number(*f);
                }
                CellValue::Bool(b) => {
                    cell.set_value_bool(*b);
                }
                CellValue::Text(s) => {
                    cell.set_value_string(s.as_str());
                }
            }
        }
    }

    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| anyhow!("Failed to write XLSX workbook: {}", e))?;
    Ok(out.into_inner())
}
