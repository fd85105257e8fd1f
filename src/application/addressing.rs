// Dimension addressing - Map clicked pivot cells to stable dimension ids
use crate::domain::data_point::PivotTableDataPoint;
use crate::domain::dimension::{DimensionId, PivotArea};

/// Dimension id of a clicked pivot cell.
///
/// A cell is identified by its innermost measure when it has one, otherwise by
/// the innermost column, otherwise by the innermost row. Points without entries
/// resolve to `None`.
pub fn resolve_pivot_dimension_id(point: &PivotTableDataPoint) -> Option<DimensionId> {
    let entries = point.entries.as_ref()?;

    [
        (PivotArea::Values, entries.values.len()),
        (PivotArea::Columns, entries.columns.len()),
        (PivotArea::Rows, entries.rows.len()),
    ]
    .into_iter()
    .find(|(_, len)| *len > 0)
    .map(|(area, len)| DimensionId::new(area, len - 1))
}

/// Validate an id handed over by a header/data-cell formatter. The id is
/// already computed by the rendering layer; it is only parsed here.
pub fn resolve_formatter_cell_id(id: &str) -> Option<DimensionId> {
    match id.parse() {
        Ok(dimension_id) => Some(dimension_id),
        Err(e) => {
            tracing::debug!("Ignoring formatter cell id {}: {}", id, e);
            None
        }
    }
}
