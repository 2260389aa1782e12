// src/expand/mod.rs
pub mod literal;
pub mod shape;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::{Placement, SplitConfig};
use crate::expand::literal::{parse_sequence, render_scalar};
use crate::expand::shape::{infer_shapes, ColumnShape, ElementKind};
use crate::table::Table;

/// Expand every sequence-typed column of `table`. Shapes are inferred
/// first over the configured sample, then each column is rewritten
/// strictly against its shape. Returns the expanded shapes in column
/// order.
pub fn expand_table(table: &mut Table, config: &SplitConfig) -> Result<Vec<ColumnShape>> {
    let shapes = infer_shapes(table, config.sample_rows)?;
    for shape in &shapes {
        info!(column = %shape.name, len = shape.len, "expanding column");
        expand_column(table, shape, config.placement)
            .with_context(|| format!("expanding column {:?}", shape.name))?;
    }
    Ok(shapes)
}

/// Replace one column with its positional scalar columns. Every value
/// must conform to the inferred shape; the first violation aborts with
/// the offending row number. An empty cell expands to empty cells in
/// every position.
pub fn expand_column(table: &mut Table, shape: &ColumnShape, placement: Placement) -> Result<()> {
    let Some(idx) = table.column_index(&shape.name) else {
        bail!("column {:?} is no longer present", shape.name);
    };

    let names = shape.expanded_names();
    for name in &names {
        if table.column_index(name).is_some() {
            bail!("expanded name {:?} collides with an existing column", name);
        }
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(table.rows.len()); shape.len];
    for (row_idx, row) in table.rows.iter().enumerate() {
        let cell = row[idx].trim();
        if cell.is_empty() {
            for column in &mut columns {
                column.push(String::new());
            }
            continue;
        }
        let Some(items) = parse_sequence(cell) else {
            bail!(
                "row {}: {:?} is not a sequence literal",
                row_idx + 1,
                cell
            );
        };
        if items.len() != shape.len {
            bail!(
                "row {}: expected {} elements, found {}",
                row_idx + 1,
                shape.len,
                items.len()
            );
        }
        for (item, column) in items.iter().zip(&mut columns) {
            if let (Some(expected), Some(found)) = (shape.element, ElementKind::of(item)) {
                if expected != found {
                    bail!(
                        "row {}: element {} does not match the inferred {:?} kind",
                        row_idx + 1,
                        item,
                        expected
                    );
                }
            }
            column.push(render_scalar(item));
        }
    }

    table.remove_column(idx);
    match placement {
        Placement::Append => {
            for (name, values) in names.into_iter().zip(columns) {
                table.push_column(name, values);
            }
        }
        Placement::InPlace => {
            for (offset, (name, values)) in names.into_iter().zip(columns).enumerate() {
                table.insert_column(idx + offset, name, values);
            }
        }
    }
    Ok(())
}
