//! Tabular control façade: dimensions, scroll-into-view, typed cell access.

use tracing::{debug, instrument};

use super::{CellControl, ElementBase};
use crate::condition::{Condition, TreeScope};
use crate::errors::AutomationError;
use crate::node::{ScrollAmount, ScrollPattern, UiNode};
use crate::wait::Waiter;
use crate::Session;

const KIND: &str = "DataGrid";

/// Which scroll axis a search/scroll phase operates on.
#[derive(Debug, Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn scrollable(&self, scroll: &dyn ScrollPattern) -> Result<bool, AutomationError> {
        match self {
            Axis::Vertical => scroll.vertically_scrollable(),
            Axis::Horizontal => scroll.horizontally_scrollable(),
        }
    }

    fn percent(&self, scroll: &dyn ScrollPattern) -> Result<f64, AutomationError> {
        match self {
            Axis::Vertical => scroll.vertical_scroll_percent(),
            Axis::Horizontal => scroll.horizontal_scroll_percent(),
        }
    }

    fn scroll(
        &self,
        scroll: &dyn ScrollPattern,
        amount: ScrollAmount,
    ) -> Result<(), AutomationError> {
        match self {
            Axis::Vertical => scroll.scroll_vertical(amount),
            Axis::Horizontal => scroll.scroll_horizontal(amount),
        }
    }
}

/// A table-shaped control exposing the grid and scroll patterns.
///
/// Virtualized grids only materialize visible rows and columns in the
/// automation tree, so locating an off-screen cell means scrolling and
/// re-querying; [`DataGrid::scroll_to`] does exactly that, while
/// [`DataGrid::item`] deliberately does not scroll and expects the caller to
/// have brought the cell into view first.
#[derive(Debug, Clone)]
pub struct DataGrid {
    base: ElementBase,
}

impl DataGrid {
    /// Locate a grid by automation id under `parent` and bind to it.
    pub fn new(
        session: &Session,
        parent: &UiNode,
        automation_id: &str,
    ) -> Result<Self, AutomationError> {
        let base = ElementBase::resolve(session.clone(), parent, automation_id, KIND)?;
        Ok(Self { base })
    }

    /// Bind to a node that has already been located.
    pub fn from_node(session: &Session, node: UiNode) -> Self {
        Self {
            base: ElementBase::bind(session.clone(), node),
        }
    }

    /// The node this grid is bound to.
    pub fn node(&self) -> &UiNode {
        &self.base.node
    }

    pub fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.base.node.is_enabled()
    }

    pub fn row_count(&self) -> Result<i32, AutomationError> {
        self.base.node.grid_pattern()?.row_count()
    }

    pub fn column_count(&self) -> Result<i32, AutomationError> {
        self.base.node.grid_pattern()?.column_count()
    }

    /// Scroll until the cell at `[row, column]` is geometrically visible.
    ///
    /// Works in two phases per axis: large-increment scrolls until a matching
    /// cell materializes in the automation tree, then small-increment scrolls
    /// until the grid's visible bounds contain it. Succeeds without issuing a
    /// single scroll action when the cell is already fully visible.
    #[instrument(level = "debug", skip(self))]
    pub fn scroll_to(&self, row: i32, column: i32) -> Result<(), AutomationError> {
        if row < 0 || column < 0 {
            return Err(AutomationError::InvalidArgument(format!(
                "cell [{row}, {column}] of {} does not exist: coordinates must be non-negative",
                self.base.describe(KIND)
            )));
        }

        let scroll = self.base.node.scroll_pattern().map_err(|_| {
            AutomationError::PatternNotSupported(format!(
                "{} does not support the scroll pattern",
                self.base.describe(KIND)
            ))
        })?;

        // Vertical: any cell in the target row proves the row exists. The
        // column is left unconstrained because the materialized column range
        // may not include the target yet.
        let row_condition = Condition::cell_in_row(row);
        self.bring_into_view(scroll.as_ref(), &row_condition, Axis::Vertical, || {
            AutomationError::ElementNotFound(format!(
                "{} has no row {row}",
                self.base.describe(KIND)
            ))
        })?;

        // Horizontal: now pin down the exact cell.
        let cell_condition = Condition::cell_at(row, column);
        self.bring_into_view(scroll.as_ref(), &cell_condition, Axis::Horizontal, || {
            AutomationError::ElementNotFound(format!(
                "{} has no column {column}",
                self.base.describe(KIND)
            ))
        })?;

        Ok(())
    }

    /// Return a typed façade for whatever control lives in cell `[row, column]`.
    ///
    /// Does not scroll; the cell must already be visible (see
    /// [`DataGrid::scroll_to`]). The grid is given a bounded wait to become
    /// enabled first, driven by the session's [`AutomationConfig`].
    ///
    /// [`AutomationConfig`]: crate::AutomationConfig
    #[instrument(level = "debug", skip(self))]
    pub fn item<T: CellControl>(&self, row: i32, column: i32) -> Result<T, AutomationError> {
        if row < 0 || column < 0 {
            return Err(AutomationError::InvalidArgument(format!(
                "cell [{row}, {column}] of {} does not exist: coordinates must be non-negative",
                self.base.describe(KIND)
            )));
        }

        let config = self.base.session.config();
        let waiter = Waiter::new(config.enable_wait_timeout, config.poll_interval);
        waiter
            .wait_for(|| self.is_enabled(), |enabled| *enabled)
            .map_err(|e| match e {
                AutomationError::Timeout(_) => AutomationError::ElementNotEnabled(format!(
                    "{} is disabled",
                    self.base.describe(KIND)
                )),
                other => other,
            })?;

        let condition = Condition::cell_at(row, column);
        let cell = self.base.node.find_first(TreeScope::Subtree, &condition)?;
        let cell = match cell {
            Some(cell) if self.base.node.geometrically_contains(&cell)? => cell,
            _ => {
                return Err(AutomationError::ElementNotFound(format!(
                    "cell [{row}, {column}] of {} is out of view or does not exist",
                    self.base.describe(KIND)
                )))
            }
        };

        let content = cell
            .find_first(
                TreeScope::Subtree,
                &Condition::ControlType(T::CONTROL_TYPE),
            )?
            .ok_or_else(|| {
                AutomationError::ElementNotFound(format!(
                    "cell [{row}, {column}] of {} holds no {:?} element",
                    self.base.describe(KIND),
                    T::CONTROL_TYPE
                ))
            })?;

        debug!(cell = %content.snapshot().to_json().unwrap_or_default(), "bound cell content");
        Ok(T::bind(self.base.session.clone(), content))
    }

    /// Coarse-then-fine search/scroll along one axis until the node matching
    /// `condition` is geometrically contained in the grid's bounds.
    fn bring_into_view(
        &self,
        scroll: &dyn ScrollPattern,
        condition: &Condition,
        axis: Axis,
        missing: impl Fn() -> AutomationError,
    ) -> Result<UiNode, AutomationError> {
        let config = self.base.session.config();

        let mut cell = self.base.node.find_first(TreeScope::Subtree, condition)?;

        // Coarse phase: page through until the target materializes or the
        // scroll range is exhausted.
        if cell.is_none() && axis.scrollable(scroll)? {
            let mut steps = 0;
            while cell.is_none()
                && axis.percent(scroll)? < config.scroll_end_threshold
                && steps < config.max_scroll_steps
            {
                axis.scroll(scroll, ScrollAmount::LargeIncrement)?;
                cell = self.base.node.find_first(TreeScope::Subtree, condition)?;
                steps += 1;
            }
        }
        let mut cell = cell.ok_or_else(&missing)?;

        // Fine phase: the coarse phase can overshoot or leave the cell half
        // clipped at a boundary; nudge until containment holds.
        let mut steps = 0;
        while !self.base.node.geometrically_contains(&cell)? {
            if steps >= config.max_scroll_steps {
                return Err(AutomationError::ScrollFailed(format!(
                    "{} kept a matching cell outside its bounds after {steps} fine scroll steps",
                    self.base.describe(KIND)
                )));
            }
            cell = self
                .base
                .node
                .find_first(TreeScope::Subtree, condition)?
                .ok_or_else(&missing)?;
            axis.scroll(scroll, ScrollAmount::SmallIncrement)?;
            steps += 1;
        }

        debug!(?axis, "target cell is in view");
        Ok(cell)
    }
}
