//! Handles into the live UI tree and the control-pattern surfaces they expose.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ControlType, TreeScope};
use crate::errors::AutomationError;
use crate::geometry::Rect;

/// Scroll step sizes of the platform scroll pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAmount {
    SmallDecrement,
    SmallIncrement,
    LargeDecrement,
    LargeIncrement,
}

/// Grid pattern of a tabular container: overall dimensions.
pub trait GridPattern {
    fn row_count(&self) -> Result<i32, AutomationError>;
    fn column_count(&self) -> Result<i32, AutomationError>;
}

/// Grid-item pattern of a cell: its logical coordinates inside the grid.
pub trait GridItemPattern {
    fn row(&self) -> Result<i32, AutomationError>;
    fn column(&self) -> Result<i32, AutomationError>;
}

/// Scroll pattern of a scrollable container.
///
/// Percentages run 0..=100; a container reports a direction as not
/// scrollable when all content in that direction already fits.
pub trait ScrollPattern {
    fn vertically_scrollable(&self) -> Result<bool, AutomationError>;
    fn horizontally_scrollable(&self) -> Result<bool, AutomationError>;
    fn vertical_scroll_percent(&self) -> Result<f64, AutomationError>;
    fn horizontal_scroll_percent(&self) -> Result<f64, AutomationError>;
    fn scroll_vertical(&self, amount: ScrollAmount) -> Result<(), AutomationError>;
    fn scroll_horizontal(&self, amount: ScrollAmount) -> Result<(), AutomationError>;
}

/// Text pattern: whole-document text retrieval.
pub trait TextPattern {
    fn document_text(&self) -> Result<String, AutomationError>;
}

/// Value pattern: the generic single-value read surface and its
/// read-only flag.
pub trait ValuePattern {
    fn value(&self) -> Result<String, AutomationError>;
    fn is_read_only(&self) -> Result<bool, AutomationError>;
}

/// Interface for platform-specific node implementations.
///
/// This is the full collaborator contract the façades rely on: property
/// reads that fail with [`AutomationError::PropertyNotSupported`] when the
/// node lacks the property, pattern getters that fail with
/// [`AutomationError::PatternNotSupported`] when the pattern is absent, and
/// a subtree search that reports "no match" as `Ok(None)` rather than an
/// error, because a missing element is a normal outcome for test code.
pub trait NodeImpl: Send + Sync + Debug {
    fn automation_id(&self) -> Result<String, AutomationError>;
    fn name(&self) -> Result<String, AutomationError>;
    fn control_type(&self) -> Result<ControlType, AutomationError>;
    fn is_enabled(&self) -> Result<bool, AutomationError>;
    fn bounds(&self) -> Result<Rect, AutomationError>;
    /// A point guaranteed to land inside the element's hit-test region,
    /// in the platform's floating screen coordinates.
    fn clickable_point(&self) -> Result<(f64, f64), AutomationError>;

    fn find_first(
        &self,
        scope: TreeScope,
        condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError>;

    fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError>;
    fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError>;
    fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError>;
    fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError>;
    fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError>;

    /// Enable downcasting to concrete node types.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// A non-owning handle to a node in the live UI tree.
///
/// Cloning the handle never clones the control; dropping it never destroys
/// the control. The handle may go stale when the underlying control is
/// destroyed, in which case further calls return errors instead of
/// panicking.
#[derive(Debug, Clone)]
pub struct UiNode {
    inner: Arc<dyn NodeImpl>,
}

impl UiNode {
    pub fn new(inner: Arc<dyn NodeImpl>) -> Self {
        Self { inner }
    }

    pub fn automation_id(&self) -> Result<String, AutomationError> {
        self.inner.automation_id()
    }

    pub fn name(&self) -> Result<String, AutomationError> {
        self.inner.name()
    }

    pub fn control_type(&self) -> Result<ControlType, AutomationError> {
        self.inner.control_type()
    }

    pub fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.inner.is_enabled()
    }

    pub fn bounds(&self) -> Result<Rect, AutomationError> {
        self.inner.bounds()
    }

    pub fn clickable_point(&self) -> Result<(f64, f64), AutomationError> {
        self.inner.clickable_point()
    }

    /// Search the given scope for the first node matching `condition`.
    pub fn find_first(
        &self,
        scope: TreeScope,
        condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError> {
        self.inner.find_first(scope, condition)
    }

    pub fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError> {
        self.inner.grid_pattern()
    }

    pub fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError> {
        self.inner.grid_item_pattern()
    }

    pub fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError> {
        self.inner.scroll_pattern()
    }

    pub fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError> {
        self.inner.text_pattern()
    }

    pub fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError> {
        self.inner.value_pattern()
    }

    /// Whether this node's bounding region geometrically contains `other`'s.
    pub fn geometrically_contains(&self, other: &UiNode) -> Result<bool, AutomationError> {
        Ok(self.bounds()?.contains(&other.bounds()?))
    }

    /// Best-effort property snapshot for logs and error messages.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            automation_id: self.automation_id().ok().filter(|id| !id.is_empty()),
            name: self.name().ok().filter(|n| !n.is_empty()),
            control_type: self.control_type().ok(),
            bounds: self.bounds().ok(),
            enabled: self.is_enabled().ok(),
        }
    }

    pub fn as_impl(&self) -> &dyn NodeImpl {
        self.inner.as_ref()
    }
}

/// Serializable property snapshot of a node.
///
/// Holds plain data only and cannot drive the UI; it exists for diagnostics,
/// assertion messages and structured logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ControlType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl NodeSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
