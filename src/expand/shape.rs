use anyhow::{bail, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::expand::literal::parse_sequence;
use crate::table::Table;

/// Positional suffixes, in expansion order.
pub const POSITION_TAGS: [&str; 4] = ["_X", "_Y", "_Z", "_W"];

/// Longest sequence the tag set can name.
pub const MAX_SEQUENCE_LEN: usize = POSITION_TAGS.len();

/// What a sequence's elements are, for the strict expansion check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Number,
    Text,
    Bool,
    Sequence,
    Mapping,
}

impl ElementKind {
    /// Kind of one parsed element. `None` for null, which matches any
    /// kind (a missing component).
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Bool),
            Value::Number(_) => Some(Self::Number),
            Value::String(_) => Some(Self::Text),
            Value::Array(_) => Some(Self::Sequence),
            Value::Object(_) => Some(Self::Mapping),
        }
    }
}

/// The inferred shape of one expandable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnShape {
    pub name: String,
    /// Element count, 1..=4.
    pub len: usize,
    /// Uniform element kind. `None` when every sampled element was null.
    pub element: Option<ElementKind>,
}

impl ColumnShape {
    /// New column names, one per position.
    pub fn expanded_names(&self) -> Vec<String> {
        POSITION_TAGS[..self.len]
            .iter()
            .map(|tag| format!("{}{}", self.name, tag))
            .collect()
    }
}

/// Kind shared by every non-null element of one sequence, or `Err` when
/// the sequence mixes kinds.
fn uniform_kind(items: &[Value]) -> Result<Option<ElementKind>, ()> {
    let mut kind = None;
    for item in items {
        match (kind, ElementKind::of(item)) {
            (None, found) => kind = found,
            (Some(expected), Some(found)) if expected != found => return Err(()),
            _ => {}
        }
    }
    Ok(kind)
}

/// Scan up to `sample_rows` rows of every column (all rows when `None`)
/// and record a definitive shape for each column holding sequence
/// literals. A column whose sampled values disagree on length or element
/// kind is rejected with a warning; an inferred length past the tag set
/// is an error rather than a silent truncation.
pub fn infer_shapes(table: &Table, sample_rows: Option<usize>) -> Result<Vec<ColumnShape>> {
    let sample = sample_rows
        .unwrap_or(table.rows.len())
        .min(table.rows.len());
    let mut shapes = Vec::new();

    'columns: for (idx, name) in table.headers.iter().enumerate() {
        let mut inferred: Option<(usize, Option<ElementKind>)> = None;

        for (row, cell) in table.column_values(idx).take(sample).enumerate() {
            if cell.trim().is_empty() {
                continue;
            }
            let Some(items) = parse_sequence(cell) else {
                if inferred.is_none() {
                    // first non-empty value decides; not a sequence column
                    debug!(column = %name, "first value is not a sequence literal");
                } else {
                    warn!(
                        column = %name,
                        row = row + 1,
                        "sampled value is not a sequence literal; column skipped"
                    );
                }
                continue 'columns;
            };
            let Ok(kind) = uniform_kind(&items) else {
                warn!(
                    column = %name,
                    row = row + 1,
                    "sequence mixes element kinds; column skipped"
                );
                continue 'columns;
            };

            match &mut inferred {
                None => inferred = Some((items.len(), kind)),
                Some((len, element)) => {
                    if items.len() != *len {
                        warn!(
                            column = %name,
                            row = row + 1,
                            "sampled sequence length differs; column skipped"
                        );
                        continue 'columns;
                    }
                    match (*element, kind) {
                        (None, Some(found)) => *element = Some(found),
                        (Some(expected), Some(found)) if expected != found => {
                            warn!(
                                column = %name,
                                row = row + 1,
                                "sampled element kind differs; column skipped"
                            );
                            continue 'columns;
                        }
                        _ => {}
                    }
                }
            }
        }

        let Some((len, element)) = inferred else {
            continue;
        };
        if len == 0 {
            warn!(column = %name, "sequences are empty; column skipped");
            continue;
        }
        if len > MAX_SEQUENCE_LEN {
            bail!(
                "column {:?} holds sequences of length {}, but only {} positional suffixes exist",
                name,
                len,
                MAX_SEQUENCE_LEN
            );
        }
        shapes.push(ColumnShape {
            name: name.clone(),
            len,
            element,
        });
    }

    Ok(shapes)
}
