//! Windows backend over the UI Automation API.

use std::sync::Arc;

use tracing::{debug, warn};
use uiautomation::controls::ControlType as WinControlType;
use uiautomation::inputs::Mouse;
use uiautomation::patterns;
use uiautomation::types::{ScrollAmount as WinScrollAmount, TreeScope as WinTreeScope, UIProperty};
use uiautomation::variants::Variant;
use uiautomation::UIAutomation;

use super::AutomationBackend;
use crate::condition::{Condition, ControlType, TreeScope};
use crate::errors::AutomationError;
use crate::geometry::Rect;
use crate::input::{InputSimulator, MouseButton};
use crate::node::{
    GridItemPattern, GridPattern, NodeImpl, ScrollAmount, ScrollPattern, TextPattern, UiNode,
    ValuePattern,
};

/// Interval in milliseconds between simulated keystrokes.
const KEY_INTERVAL_MS: u64 = 10;

fn automation() -> Result<UIAutomation, AutomationError> {
    UIAutomation::new().map_err(|e| {
        AutomationError::PlatformError(format!("failed to create UI Automation instance: {e}"))
    })
}

fn platform_err(context: &str, e: uiautomation::Error) -> AutomationError {
    AutomationError::PlatformError(format!("{context}: {e}"))
}

pub struct WindowsBackend {
    automation: UIAutomation,
    input: Arc<dyn InputSimulator>,
}

impl WindowsBackend {
    pub fn new() -> Result<Self, AutomationError> {
        Ok(Self {
            automation: automation()?,
            input: Arc::new(WindowsInput),
        })
    }
}

impl AutomationBackend for WindowsBackend {
    fn root(&self) -> Result<UiNode, AutomationError> {
        let root = self
            .automation
            .get_root_element()
            .map_err(|e| platform_err("failed to get desktop root element", e))?;
        Ok(UiNode::new(Arc::new(WindowsNode::new(root))))
    }

    fn input(&self) -> Arc<dyn InputSimulator> {
        self.input.clone()
    }
}

fn to_win_control_type(control_type: ControlType) -> WinControlType {
    match control_type {
        ControlType::Button => WinControlType::Button,
        ControlType::CheckBox => WinControlType::CheckBox,
        ControlType::ComboBox => WinControlType::ComboBox,
        ControlType::DataGrid => WinControlType::DataGrid,
        ControlType::DataItem => WinControlType::DataItem,
        ControlType::Edit => WinControlType::Edit,
        ControlType::List => WinControlType::List,
        ControlType::ListItem => WinControlType::ListItem,
        ControlType::Pane => WinControlType::Pane,
        ControlType::Text => WinControlType::Text,
        ControlType::Window => WinControlType::Window,
        ControlType::Custom => WinControlType::Custom,
    }
}

fn from_win_control_type(control_type: WinControlType) -> ControlType {
    match control_type {
        WinControlType::Button => ControlType::Button,
        WinControlType::CheckBox => ControlType::CheckBox,
        WinControlType::ComboBox => ControlType::ComboBox,
        WinControlType::DataGrid => ControlType::DataGrid,
        WinControlType::DataItem => ControlType::DataItem,
        WinControlType::Edit => ControlType::Edit,
        WinControlType::List => ControlType::List,
        WinControlType::ListItem => ControlType::ListItem,
        WinControlType::Pane => ControlType::Pane,
        WinControlType::Text => ControlType::Text,
        WinControlType::Window => ControlType::Window,
        _ => ControlType::Custom,
    }
}

fn to_win_scroll_amount(amount: ScrollAmount) -> WinScrollAmount {
    match amount {
        ScrollAmount::SmallDecrement => WinScrollAmount::SmallDecrement,
        ScrollAmount::SmallIncrement => WinScrollAmount::SmallIncrement,
        ScrollAmount::LargeDecrement => WinScrollAmount::LargeDecrement,
        ScrollAmount::LargeIncrement => WinScrollAmount::LargeIncrement,
    }
}

/// Build a UIA condition tree from a composite [`Condition`].
fn build_condition(
    automation: &UIAutomation,
    condition: &Condition,
) -> Result<uiautomation::UICondition, AutomationError> {
    let property = |property: UIProperty, value: Variant| {
        automation
            .create_property_condition(property, value, None)
            .map_err(|e| platform_err("failed to create property condition", e))
    };

    match condition {
        Condition::AutomationId(id) => property(UIProperty::AutomationId, Variant::from(id.as_str())),
        Condition::Name(name) => property(UIProperty::Name, Variant::from(name.as_str())),
        Condition::ControlType(control_type) => property(
            UIProperty::ControlType,
            Variant::from(to_win_control_type(*control_type) as i32),
        ),
        Condition::GridItemAvailable => {
            property(UIProperty::IsGridItemPatternAvailable, Variant::from(true))
        }
        Condition::Row(row) => property(UIProperty::GridItemRow, Variant::from(*row)),
        Condition::Column(column) => property(UIProperty::GridItemColumn, Variant::from(*column)),
        Condition::And(parts) => {
            let mut parts = parts.iter();
            let first = parts.next().ok_or_else(|| {
                AutomationError::InvalidArgument("empty conjunction condition".to_string())
            })?;
            let mut combined = build_condition(automation, first)?;
            for part in parts {
                let next = build_condition(automation, part)?;
                combined = automation
                    .create_and_condition(combined, next)
                    .map_err(|e| platform_err("failed to combine conditions", e))?;
            }
            Ok(combined)
        }
    }
}

#[derive(Debug)]
pub(crate) struct WindowsNode {
    element: uiautomation::UIElement,
}

impl WindowsNode {
    pub(crate) fn new(element: uiautomation::UIElement) -> Self {
        Self { element }
    }
}

impl NodeImpl for WindowsNode {
    fn automation_id(&self) -> Result<String, AutomationError> {
        self.element
            .get_automation_id()
            .map_err(|e| platform_err("failed to read automation id", e))
    }

    fn name(&self) -> Result<String, AutomationError> {
        self.element
            .get_name()
            .map_err(|e| platform_err("failed to read name", e))
    }

    fn control_type(&self) -> Result<ControlType, AutomationError> {
        self.element
            .get_control_type()
            .map(from_win_control_type)
            .map_err(|e| platform_err("failed to read control type", e))
    }

    fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.element.is_enabled().map_err(|e| {
            AutomationError::PropertyNotSupported(format!("IsEnabled read failed: {e}"))
        })
    }

    fn bounds(&self) -> Result<Rect, AutomationError> {
        let rect = self
            .element
            .get_bounding_rectangle()
            .map_err(|e| platform_err("failed to read bounding rectangle", e))?;
        Ok(Rect::new(
            rect.get_left() as f64,
            rect.get_top() as f64,
            rect.get_width() as f64,
            rect.get_height() as f64,
        ))
    }

    fn clickable_point(&self) -> Result<(f64, f64), AutomationError> {
        let point = self
            .element
            .get_clickable_point()
            .map_err(|e| {
                AutomationError::PropertyNotSupported(format!("ClickablePoint read failed: {e}"))
            })?
            .ok_or_else(|| {
                AutomationError::PropertyNotSupported(
                    "element reports no clickable point".to_string(),
                )
            })?;
        Ok((point.get_x() as f64, point.get_y() as f64))
    }

    fn find_first(
        &self,
        scope: TreeScope,
        condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError> {
        let automation = automation()?;
        let win_condition = build_condition(&automation, condition)?;
        let win_scope = match scope {
            TreeScope::Children => WinTreeScope::Children,
            TreeScope::Subtree => WinTreeScope::Subtree,
        };
        // The platform reports "no match" as an error; a missing element is a
        // normal outcome here, so fold it into None.
        match self.element.find_first(win_scope, &win_condition) {
            Ok(found) => Ok(Some(UiNode::new(Arc::new(WindowsNode::new(found))))),
            Err(e) => {
                debug!("find_first matched nothing: {e}");
                Ok(None)
            }
        }
    }

    fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError> {
        let pattern = self
            .element
            .get_pattern::<patterns::UIGridPattern>()
            .map_err(|e| {
                AutomationError::PatternNotSupported(format!("grid pattern unavailable: {e}"))
            })?;
        Ok(Box::new(WindowsGridPattern { pattern }))
    }

    fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError> {
        let pattern = self
            .element
            .get_pattern::<patterns::UIGridItemPattern>()
            .map_err(|e| {
                AutomationError::PatternNotSupported(format!("grid-item pattern unavailable: {e}"))
            })?;
        Ok(Box::new(WindowsGridItemPattern { pattern }))
    }

    fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError> {
        let pattern = self
            .element
            .get_pattern::<patterns::UIScrollPattern>()
            .map_err(|e| {
                AutomationError::PatternNotSupported(format!("scroll pattern unavailable: {e}"))
            })?;
        Ok(Box::new(WindowsScrollPattern { pattern }))
    }

    fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError> {
        let pattern = self
            .element
            .get_pattern::<patterns::UITextPattern>()
            .map_err(|e| {
                AutomationError::PatternNotSupported(format!("text pattern unavailable: {e}"))
            })?;
        Ok(Box::new(WindowsTextPattern { pattern }))
    }

    fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError> {
        let pattern = self
            .element
            .get_pattern::<patterns::UIValuePattern>()
            .map_err(|e| {
                AutomationError::PatternNotSupported(format!("value pattern unavailable: {e}"))
            })?;
        Ok(Box::new(WindowsValuePattern { pattern }))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct WindowsGridPattern {
    pattern: patterns::UIGridPattern,
}

impl GridPattern for WindowsGridPattern {
    fn row_count(&self) -> Result<i32, AutomationError> {
        self.pattern
            .get_row_count()
            .map_err(|e| AutomationError::TypeMismatch(format!("GridRowCount read failed: {e}")))
    }

    fn column_count(&self) -> Result<i32, AutomationError> {
        self.pattern
            .get_column_count()
            .map_err(|e| AutomationError::TypeMismatch(format!("GridColumnCount read failed: {e}")))
    }
}

struct WindowsGridItemPattern {
    pattern: patterns::UIGridItemPattern,
}

impl GridItemPattern for WindowsGridItemPattern {
    fn row(&self) -> Result<i32, AutomationError> {
        self.pattern
            .get_row()
            .map_err(|e| AutomationError::TypeMismatch(format!("GridItemRow read failed: {e}")))
    }

    fn column(&self) -> Result<i32, AutomationError> {
        self.pattern
            .get_column()
            .map_err(|e| AutomationError::TypeMismatch(format!("GridItemColumn read failed: {e}")))
    }
}

struct WindowsScrollPattern {
    pattern: patterns::UIScrollPattern,
}

impl ScrollPattern for WindowsScrollPattern {
    fn vertically_scrollable(&self) -> Result<bool, AutomationError> {
        self.pattern
            .get_vertically_scrollable()
            .map_err(|e| platform_err("failed to read vertical scrollability", e))
    }

    fn horizontally_scrollable(&self) -> Result<bool, AutomationError> {
        self.pattern
            .get_horizontally_scrollable()
            .map_err(|e| platform_err("failed to read horizontal scrollability", e))
    }

    fn vertical_scroll_percent(&self) -> Result<f64, AutomationError> {
        self.pattern
            .get_vertical_scroll_percent()
            .map_err(|e| platform_err("failed to read vertical scroll percent", e))
    }

    fn horizontal_scroll_percent(&self) -> Result<f64, AutomationError> {
        self.pattern
            .get_horizontal_scroll_percent()
            .map_err(|e| platform_err("failed to read horizontal scroll percent", e))
    }

    fn scroll_vertical(&self, amount: ScrollAmount) -> Result<(), AutomationError> {
        self.pattern
            .scroll(WinScrollAmount::NoAmount, to_win_scroll_amount(amount))
            .map_err(|e| AutomationError::ScrollFailed(format!("vertical scroll failed: {e}")))
    }

    fn scroll_horizontal(&self, amount: ScrollAmount) -> Result<(), AutomationError> {
        self.pattern
            .scroll(to_win_scroll_amount(amount), WinScrollAmount::NoAmount)
            .map_err(|e| AutomationError::ScrollFailed(format!("horizontal scroll failed: {e}")))
    }
}

struct WindowsTextPattern {
    pattern: patterns::UITextPattern,
}

impl TextPattern for WindowsTextPattern {
    fn document_text(&self) -> Result<String, AutomationError> {
        let range = self
            .pattern
            .get_document_range()
            .map_err(|e| platform_err("failed to get document range", e))?;
        // -1 means unlimited length.
        range
            .get_text(-1)
            .map_err(|e| platform_err("failed to read document text", e))
    }
}

struct WindowsValuePattern {
    pattern: patterns::UIValuePattern,
}

impl ValuePattern for WindowsValuePattern {
    fn value(&self) -> Result<String, AutomationError> {
        self.pattern
            .get_value()
            .map_err(|e| AutomationError::TypeMismatch(format!("Value read failed: {e}")))
    }

    fn is_read_only(&self) -> Result<bool, AutomationError> {
        self.pattern
            .is_readonly()
            .map_err(|e| AutomationError::TypeMismatch(format!("IsReadOnly read failed: {e}")))
    }
}

/// Input simulation through the platform's mouse helper and keystroke
/// injection into the focused element.
#[derive(Debug, Default)]
pub struct WindowsInput;

impl InputSimulator for WindowsInput {
    fn click(&self, button: MouseButton, point: crate::geometry::Point) -> Result<(), AutomationError> {
        let mouse = Mouse::default();
        let target = uiautomation::types::Point::new(point.x, point.y);
        let result = match button {
            MouseButton::Left => mouse.click(target),
            MouseButton::Right => mouse.right_click(target),
            MouseButton::Middle => {
                return Err(AutomationError::PlatformError(
                    "middle-button clicks are not supported by the mouse helper".to_string(),
                ))
            }
        };
        result.map_err(|e| platform_err("simulated click failed", e))
    }

    fn select_all(&self) -> Result<(), AutomationError> {
        self.send_to_focused(|element| element.send_keys("{Ctrl}a", KEY_INTERVAL_MS))
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        let owned = text.to_string();
        self.send_to_focused(move |element| element.send_text(&owned, KEY_INTERVAL_MS))
    }
}

impl WindowsInput {
    fn send_to_focused(
        &self,
        send: impl FnOnce(&uiautomation::UIElement) -> uiautomation::Result<()>,
    ) -> Result<(), AutomationError> {
        let automation = automation()?;
        let focused = automation.get_focused_element().map_err(|e| {
            warn!("no focused element to receive keystrokes: {e}");
            platform_err("failed to get focused element", e)
        })?;
        send(&focused).map_err(|e| platform_err("keystroke injection failed", e))
    }
}
