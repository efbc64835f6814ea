//! Text-input façade: state introspection, text retrieval, simulated typing.

use tracing::{debug, instrument};

use super::{CellControl, ElementBase};
use crate::condition::ControlType;
use crate::errors::AutomationError;
use crate::geometry::Point;
use crate::input::MouseButton;
use crate::node::UiNode;
use crate::Session;

const KIND: &str = "TextBox";

/// A single- or multi-line text input.
///
/// Writing goes through a simulated click plus keystrokes rather than the
/// value pattern's setter, so the test exercises the same path a user does.
#[derive(Debug, Clone)]
pub struct TextBox {
    base: ElementBase,
}

impl TextBox {
    /// Locate a text box by automation id under `parent` and bind to it.
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

    /// The node this text box is bound to.
    pub fn node(&self) -> &UiNode {
        &self.base.node
    }

    pub fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.base.node.is_enabled()
    }

    /// Whether the control rejects value changes.
    pub fn is_read_only(&self) -> Result<bool, AutomationError> {
        self.base.node.value_pattern()?.is_read_only()
    }

    /// A point inside the control's hit-test region, truncated to integers.
    pub fn clickable_point(&self) -> Result<Point, AutomationError> {
        let (x, y) = self.base.node.clickable_point()?;
        Ok(Point::new(x as i32, y as i32))
    }

    /// The control's current text.
    ///
    /// Prefers the text pattern's whole-document range, which has no length
    /// limit; controls without it fall back to the generic value property.
    pub fn text(&self) -> Result<String, AutomationError> {
        match self.base.node.text_pattern() {
            Ok(text) => text.document_text(),
            Err(AutomationError::PatternNotSupported(_)) => {
                self.base.node.value_pattern()?.value()
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the control's contents with `text` via simulated input.
    ///
    /// Clicks the control to focus it, sends the select-all chord, then
    /// types the literal text over the selection. Disabled and read-only
    /// controls fail before any input is injected.
    #[instrument(level = "debug", skip(self, text))]
    pub fn set_text(&self, text: &str) -> Result<(), AutomationError> {
        if !self.is_enabled()? {
            return Err(AutomationError::ElementNotEnabled(format!(
                "{} is disabled and cannot accept text",
                self.base.describe(KIND)
            )));
        }
        if self.is_read_only()? {
            return Err(AutomationError::ElementReadOnly(format!(
                "{} is read-only",
                self.base.describe(KIND)
            )));
        }

        let point = self.clickable_point()?;
        let input = self.base.session.input();
        input.click(MouseButton::Left, point)?;
        input.select_all()?;
        input.type_text(text)?;

        debug!(target = %self.base.describe(KIND), "replaced text via simulated input");
        Ok(())
    }
}

impl CellControl for TextBox {
    const CONTROL_TYPE: ControlType = ControlType::Edit;

    fn bind(session: Session, node: UiNode) -> Self {
        Self::from_node(&session, node)
    }
}
