//! Typed control façades over raw automation nodes.

pub mod data_grid;
pub mod text_box;

pub use data_grid::DataGrid;
pub use text_box::TextBox;

use crate::condition::{Condition, ControlType, TreeScope};
use crate::errors::AutomationError;
use crate::node::UiNode;
use crate::Session;

/// A control that can be bound directly to an already-resolved node.
///
/// This is what `DataGrid::item` needs from its type parameter: the expected
/// control-type tag to search a cell's subtree for, and a constructor that
/// skips the identifier lookup.
pub trait CellControl: Sized {
    /// Control-type tag instances of this façade are expected to wrap.
    const CONTROL_TYPE: ControlType;

    /// Bind directly to a node that has already been located.
    fn bind(session: Session, node: UiNode) -> Self;
}

/// State shared by every element façade: the session it operates in and the
/// node it is bound to.
#[derive(Debug, Clone)]
pub(crate) struct ElementBase {
    pub(crate) session: Session,
    pub(crate) node: UiNode,
}

impl ElementBase {
    /// Resolve a child element by automation id under `parent` and bind to it.
    pub(crate) fn resolve(
        session: Session,
        parent: &UiNode,
        automation_id: &str,
        kind: &str,
    ) -> Result<Self, AutomationError> {
        if automation_id.is_empty() {
            return Err(AutomationError::InvalidArgument(format!(
                "cannot create a {kind} from an empty automation id"
            )));
        }
        let condition = Condition::AutomationId(automation_id.to_string());
        let node = parent
            .find_first(TreeScope::Subtree, &condition)?
            .ok_or_else(|| {
                AutomationError::ElementNotFound(format!(
                    "no {kind} with automation id {automation_id:?} under the given parent"
                ))
            })?;
        Ok(Self { session, node })
    }

    pub(crate) fn bind(session: Session, node: UiNode) -> Self {
        Self { session, node }
    }

    /// Short human-readable identity for error messages, e.g. `DataGrid "grid"`.
    pub(crate) fn describe(&self, kind: &str) -> String {
        match self.node.automation_id() {
            Ok(id) if !id.is_empty() => format!("{kind} {id:?}"),
            _ => match self.node.name() {
                Ok(name) if !name.is_empty() => format!("{kind} {name:?}"),
                _ => kind.to_string(),
            },
        }
    }
}
