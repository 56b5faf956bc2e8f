//! Interaction table loading.
//!
//! The table is read once, filtered of incomplete rows and then shared
//! read-only (`Arc<InteractionTable>`) by every downstream computation.

use crate::error::{NetworkError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

pub const DRUG_A_COLUMN: &str = "DrugA";
pub const DRUG_B_COLUMN: &str = "DrugB";

/// Cell values treated as missing, matching the usual dataframe NA markers.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// One recorded interaction between two named drugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRow {
    pub drug_a: String,
    pub drug_b: String,
    /// Remaining columns, aligned with [`InteractionTable::metadata_columns`].
    pub metadata: Vec<String>,
}

impl InteractionRow {
    pub fn new(drug_a: impl Into<String>, drug_b: impl Into<String>) -> Self {
        InteractionRow {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
            metadata: Vec::new(),
        }
    }

    pub fn involves(&self, drug: &str) -> bool {
        self.drug_a == drug || self.drug_b == drug
    }

    /// The other endpoint when `drug` is part of this row.
    pub fn partner_of(&self, drug: &str) -> Option<&str> {
        if self.drug_a == drug {
            Some(&self.drug_b)
        } else if self.drug_b == drug {
            Some(&self.drug_a)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionTable {
    metadata_columns: Vec<String>,
    rows: Vec<InteractionRow>,
}

impl InteractionTable {
    pub fn from_rows(rows: Vec<InteractionRow>) -> Self {
        InteractionTable {
            metadata_columns: Vec::new(),
            rows,
        }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::from_rows(
            pairs
                .into_iter()
                .map(|(a, b)| InteractionRow::new(a, b))
                .collect(),
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NetworkError::io(e, path))?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            "loaded interaction table"
        );
        Ok(table)
    }

    /// Parses CSV with a header row containing at least `DrugA` and `DrugB`.
    /// Rows with a missing value in any column are dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| NetworkError::MissingColumn(name.to_string()))
        };
        let a_idx = column(DRUG_A_COLUMN)?;
        let b_idx = column(DRUG_B_COLUMN)?;

        let metadata_idx: Vec<usize> = (0..headers.len())
            .filter(|&i| i != a_idx && i != b_idx)
            .collect();
        let metadata_columns = metadata_idx
            .iter()
            .map(|&i| headers[i].trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for record in reader.records() {
            let record = record?;
            match Self::parse_row(&record, headers.len(), a_idx, b_idx, &metadata_idx) {
                Some(row) => rows.push(row),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, "dropped rows with missing values");
        }

        Ok(InteractionTable {
            metadata_columns,
            rows,
        })
    }

    fn parse_row(
        record: &StringRecord,
        width: usize,
        a_idx: usize,
        b_idx: usize,
        metadata_idx: &[usize],
    ) -> Option<InteractionRow> {
        if record.len() != width || record.iter().any(is_missing) {
            return None;
        }
        Some(InteractionRow {
            drug_a: record[a_idx].to_string(),
            drug_b: record[b_idx].to_string(),
            metadata: metadata_idx.iter().map(|&i| record[i].to_string()).collect(),
        })
    }

    pub fn metadata_columns(&self) -> &[String] {
        &self.metadata_columns
    }

    pub fn rows(&self) -> &[InteractionRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractionRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct `DrugA` values; the list a caller picks a selection from.
    pub fn drug_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.drug_a.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl<'a> IntoIterator for &'a InteractionTable {
    type Item = &'a InteractionRow;
    type IntoIter = std::slice::Iter<'a, InteractionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Holds a loaded table and reloads it only when the file's modification
/// time changes.
#[derive(Debug)]
pub struct TableCache {
    path: PathBuf,
    loaded: Option<(Option<SystemTime>, Arc<InteractionTable>)>,
}

impl TableCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TableCache {
            path: path.into(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&mut self) -> Result<Arc<InteractionTable>> {
        let modified = fs::metadata(&self.path)
            .map_err(|e| NetworkError::io(e, &self.path))?
            .modified()
            .ok();

        if let Some((stamp, table)) = &self.loaded {
            if modified.is_some() && *stamp == modified {
                return Ok(Arc::clone(table));
            }
            debug!(path = %self.path.display(), "interaction table changed, reloading");
        }

        let table = Arc::new(InteractionTable::load(&self.path)?);
        self.loaded = Some((modified, Arc::clone(&table)));
        Ok(table)
    }
}
