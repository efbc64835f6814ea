//! Search conditions and control-type tags for subtree lookups.

use serde::{Deserialize, Serialize};

/// Platform-neutral control-type tag of a UI element.
///
/// Backends translate these into the platform's control-type identifiers.
/// Only the kinds this library's façades need (plus the usual neighbours a
/// cell may contain) are listed; `Custom` covers everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    Button,
    CheckBox,
    ComboBox,
    DataGrid,
    DataItem,
    Edit,
    List,
    ListItem,
    Pane,
    Text,
    Window,
    Custom,
}

/// How deep a lookup searches relative to its starting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeScope {
    /// Direct children only.
    Children,
    /// The starting node and all of its descendants.
    Subtree,
}

/// A composite search condition over element properties.
///
/// Mirrors the property-equality/conjunction conditions of the underlying
/// automation API, which is all the grid and text façades ever need.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Equality on the element's automation id.
    AutomationId(String),
    /// Equality on the element's name.
    Name(String),
    /// Equality on the element's control type.
    ControlType(ControlType),
    /// The element exposes the grid-item pattern (i.e. it is a cell).
    GridItemAvailable,
    /// Equality on the cell's grid row index.
    Row(i32),
    /// Equality on the cell's grid column index.
    Column(i32),
    /// All inner conditions hold.
    And(Vec<Condition>),
}

impl Condition {
    /// Any cell in the given row, column unconstrained.
    ///
    /// This is the coarse-phase vertical search condition: virtualized grids
    /// may materialize a different column range than the target, so matching
    /// on the row alone is what proves the row itself exists.
    pub fn cell_in_row(row: i32) -> Self {
        Condition::And(vec![Condition::GridItemAvailable, Condition::Row(row)])
    }

    /// The exact cell at the given row and column.
    pub fn cell_at(row: i32, column: i32) -> Self {
        Condition::And(vec![
            Condition::GridItemAvailable,
            Condition::Row(row),
            Condition::Column(column),
        ])
    }
}
