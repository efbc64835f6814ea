//! Scripted fakes for driving the façades without a live UI tree.
//!
//! `FakeGridNode` models a virtualized table: only a window of rows and
//! columns is materialized in the tree at any scroll position, and cell
//! bounds are derived from the current scroll state so geometric containment
//! behaves like a real grid. `FakeInput` records injected input instead of
//! moving the cursor.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use quaestor::condition::{Condition, ControlType, TreeScope};
use quaestor::errors::AutomationError;
use quaestor::geometry::{Point, Rect};
use quaestor::input::{InputSimulator, MouseButton};
use quaestor::node::{
    GridItemPattern, GridPattern, NodeImpl, ScrollAmount, ScrollPattern, TextPattern, UiNode,
    ValuePattern,
};
use quaestor::platforms::AutomationBackend;
use quaestor::{AutomationConfig, Session};

/// Fast-polling configuration so timeout tests finish quickly.
pub fn test_config() -> AutomationConfig {
    AutomationConfig {
        enable_wait_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(10),
        scroll_end_threshold: 99.9,
        max_scroll_steps: 100,
    }
}

// ---------------------------------------------------------------------------
// Backend and root

#[derive(Debug)]
struct FakeRootNode {
    children: Vec<(String, UiNode)>,
}

impl NodeImpl for FakeRootNode {
    fn automation_id(&self) -> Result<String, AutomationError> {
        Ok(String::new())
    }

    fn name(&self) -> Result<String, AutomationError> {
        Ok("Desktop".to_string())
    }

    fn control_type(&self) -> Result<ControlType, AutomationError> {
        Ok(ControlType::Pane)
    }

    fn is_enabled(&self) -> Result<bool, AutomationError> {
        Ok(true)
    }

    fn bounds(&self) -> Result<Rect, AutomationError> {
        Ok(Rect::new(0.0, 0.0, 1920.0, 1080.0))
    }

    fn clickable_point(&self) -> Result<(f64, f64), AutomationError> {
        Ok((960.0, 540.0))
    }

    fn find_first(
        &self,
        _scope: TreeScope,
        condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError> {
        if let Condition::AutomationId(id) = condition {
            return Ok(self
                .children
                .iter()
                .find(|(child_id, _)| child_id == id)
                .map(|(_, node)| node.clone()));
        }
        Ok(None)
    }

    fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("grid".to_string()))
    }

    fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("grid item".to_string()))
    }

    fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("scroll".to_string()))
    }

    fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("text".to_string()))
    }

    fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("value".to_string()))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub struct FakeBackend {
    root: UiNode,
    input: Arc<FakeInput>,
}

impl AutomationBackend for FakeBackend {
    fn root(&self) -> Result<UiNode, AutomationError> {
        Ok(self.root.clone())
    }

    fn input(&self) -> Arc<dyn InputSimulator> {
        self.input.clone()
    }
}

/// Build a session over a fake desktop holding the given children.
pub fn fake_session(children: Vec<(String, UiNode)>) -> (Session, Arc<FakeInput>) {
    let input = Arc::new(FakeInput::default());
    let backend = FakeBackend {
        root: UiNode::new(Arc::new(FakeRootNode { children })),
        input: input.clone(),
    };
    let session = Session::with_backend(Arc::new(backend), test_config());
    (session, input)
}

// ---------------------------------------------------------------------------
// Grid

/// Static shape of a fake grid.
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub id: String,
    pub rows: i32,
    pub cols: i32,
    /// Rows that fit fully inside the grid's bounds.
    pub viewport_rows: i32,
    /// Rows present in the automation tree at any scroll position; the
    /// overhang past `viewport_rows` is materialized but clipped.
    pub materialized_rows: i32,
    pub viewport_cols: i32,
    pub materialized_cols: i32,
    pub v_large_step: f64,
    pub v_small_step: f64,
    pub h_large_step: f64,
    pub h_small_step: f64,
    pub enabled: bool,
    pub has_scroll_pattern: bool,
    pub has_grid_pattern: bool,
    /// Control type found inside every cell, if any.
    pub cell_child: Option<ControlType>,
    pub bounds: Rect,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            id: "grid".to_string(),
            rows: 50,
            cols: 5,
            viewport_rows: 8,
            materialized_rows: 10,
            viewport_cols: 5,
            materialized_cols: 5,
            v_large_step: 17.0,
            v_small_step: 2.0,
            h_large_step: 25.0,
            h_small_step: 2.5,
            enabled: true,
            has_scroll_pattern: true,
            has_grid_pattern: true,
            cell_child: Some(ControlType::Edit),
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
        }
    }
}

#[derive(Debug, Default)]
pub struct GridCounters {
    pub finds: usize,
    pub v_large: usize,
    pub v_small: usize,
    pub h_large: usize,
    pub h_small: usize,
}

#[derive(Debug, Default)]
pub struct GridState {
    pub v_percent: f64,
    pub h_percent: f64,
    pub counters: GridCounters,
}

impl GridState {
    pub fn total_scrolls(&self) -> usize {
        self.counters.v_large + self.counters.v_small + self.counters.h_large + self.counters.h_small
    }
}

fn first_visible(percent: f64, total: i32, viewport: i32) -> i32 {
    if total <= viewport {
        return 0;
    }
    ((percent / 100.0) * (total - viewport) as f64).floor() as i32
}

#[derive(Debug)]
pub struct FakeGridNode {
    spec: GridSpec,
    state: Arc<Mutex<GridState>>,
}

impl FakeGridNode {
    fn first_row(&self) -> i32 {
        let state = self.state.lock().unwrap();
        first_visible(state.v_percent, self.spec.rows, self.spec.viewport_rows)
    }

    fn first_col(&self) -> i32 {
        let state = self.state.lock().unwrap();
        first_visible(state.h_percent, self.spec.cols, self.spec.viewport_cols)
    }

    fn is_materialized(&self, row: i32, col: i32) -> bool {
        let first_row = self.first_row();
        let first_col = self.first_col();
        row >= first_row
            && row < (first_row + self.spec.materialized_rows).min(self.spec.rows)
            && col >= first_col
            && col < (first_col + self.spec.materialized_cols).min(self.spec.cols)
    }
}

/// The row/column constraints of a cell search condition.
fn parse_cell_condition(condition: &Condition) -> Option<(i32, Option<i32>)> {
    let Condition::And(parts) = condition else {
        return None;
    };
    let mut grid_item = false;
    let mut row = None;
    let mut col = None;
    for part in parts {
        match part {
            Condition::GridItemAvailable => grid_item = true,
            Condition::Row(r) => row = Some(*r),
            Condition::Column(c) => col = Some(*c),
            _ => return None,
        }
    }
    if grid_item {
        row.map(|r| (r, col))
    } else {
        None
    }
}

impl NodeImpl for FakeGridNode {
    fn automation_id(&self) -> Result<String, AutomationError> {
        Ok(self.spec.id.clone())
    }

    fn name(&self) -> Result<String, AutomationError> {
        Ok(String::new())
    }

    fn control_type(&self) -> Result<ControlType, AutomationError> {
        Ok(ControlType::DataGrid)
    }

    fn is_enabled(&self) -> Result<bool, AutomationError> {
        Ok(self.spec.enabled)
    }

    fn bounds(&self) -> Result<Rect, AutomationError> {
        Ok(self.spec.bounds)
    }

    fn clickable_point(&self) -> Result<(f64, f64), AutomationError> {
        let b = self.spec.bounds;
        Ok((b.x + b.width / 2.0, b.y + b.height / 2.0))
    }

    fn find_first(
        &self,
        _scope: TreeScope,
        condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError> {
        self.state.lock().unwrap().counters.finds += 1;
        let Some((row, col)) = parse_cell_condition(condition) else {
            return Ok(None);
        };
        let col = col.unwrap_or_else(|| self.first_col());
        if !self.is_materialized(row, col) {
            return Ok(None);
        }
        Ok(Some(UiNode::new(Arc::new(FakeCellNode {
            spec: self.spec.clone(),
            state: self.state.clone(),
            row,
            col,
        }))))
    }

    fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError> {
        if !self.spec.has_grid_pattern {
            return Err(AutomationError::PatternNotSupported(
                "fake grid has no grid pattern".to_string(),
            ));
        }
        Ok(Box::new(FakeGridPattern {
            rows: self.spec.rows,
            cols: self.spec.cols,
        }))
    }

    fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported(
            "the grid root is not a cell".to_string(),
        ))
    }

    fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError> {
        if !self.spec.has_scroll_pattern {
            return Err(AutomationError::PatternNotSupported(
                "fake grid has no scroll pattern".to_string(),
            ));
        }
        Ok(Box::new(FakeScrollPattern {
            spec: self.spec.clone(),
            state: self.state.clone(),
        }))
    }

    fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("text".to_string()))
    }

    fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("value".to_string()))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct FakeGridPattern {
    rows: i32,
    cols: i32,
}

impl GridPattern for FakeGridPattern {
    fn row_count(&self) -> Result<i32, AutomationError> {
        Ok(self.rows)
    }

    fn column_count(&self) -> Result<i32, AutomationError> {
        Ok(self.cols)
    }
}

struct FakeScrollPattern {
    spec: GridSpec,
    state: Arc<Mutex<GridState>>,
}

impl FakeScrollPattern {
    fn step(&self, amount: ScrollAmount, large: f64, small: f64) -> f64 {
        match amount {
            ScrollAmount::LargeIncrement => large,
            ScrollAmount::SmallIncrement => small,
            ScrollAmount::LargeDecrement => -large,
            ScrollAmount::SmallDecrement => -small,
        }
    }
}

impl ScrollPattern for FakeScrollPattern {
    fn vertically_scrollable(&self) -> Result<bool, AutomationError> {
        Ok(self.spec.rows > self.spec.viewport_rows)
    }

    fn horizontally_scrollable(&self) -> Result<bool, AutomationError> {
        Ok(self.spec.cols > self.spec.viewport_cols)
    }

    fn vertical_scroll_percent(&self) -> Result<f64, AutomationError> {
        Ok(self.state.lock().unwrap().v_percent)
    }

    fn horizontal_scroll_percent(&self) -> Result<f64, AutomationError> {
        Ok(self.state.lock().unwrap().h_percent)
    }

    fn scroll_vertical(&self, amount: ScrollAmount) -> Result<(), AutomationError> {
        let delta = self.step(amount, self.spec.v_large_step, self.spec.v_small_step);
        let mut state = self.state.lock().unwrap();
        state.v_percent = (state.v_percent + delta).clamp(0.0, 100.0);
        match amount {
            ScrollAmount::LargeIncrement | ScrollAmount::LargeDecrement => {
                state.counters.v_large += 1
            }
            _ => state.counters.v_small += 1,
        }
        Ok(())
    }

    fn scroll_horizontal(&self, amount: ScrollAmount) -> Result<(), AutomationError> {
        let delta = self.step(amount, self.spec.h_large_step, self.spec.h_small_step);
        let mut state = self.state.lock().unwrap();
        state.h_percent = (state.h_percent + delta).clamp(0.0, 100.0);
        match amount {
            ScrollAmount::LargeIncrement | ScrollAmount::LargeDecrement => {
                state.counters.h_large += 1
            }
            _ => state.counters.h_small += 1,
        }
        Ok(())
    }
}

#[derive(Debug)]
struct FakeCellNode {
    spec: GridSpec,
    state: Arc<Mutex<GridState>>,
    row: i32,
    col: i32,
}

impl NodeImpl for FakeCellNode {
    fn automation_id(&self) -> Result<String, AutomationError> {
        Ok(String::new())
    }

    fn name(&self) -> Result<String, AutomationError> {
        Ok(format!("cell [{}, {}]", self.row, self.col))
    }

    fn control_type(&self) -> Result<ControlType, AutomationError> {
        Ok(ControlType::DataItem)
    }

    fn is_enabled(&self) -> Result<bool, AutomationError> {
        Ok(true)
    }

    /// Bounds derived from the live scroll state: cells scrolled past the
    /// viewport land outside the grid's rectangle.
    fn bounds(&self) -> Result<Rect, AutomationError> {
        let (v_percent, h_percent) = {
            let state = self.state.lock().unwrap();
            (state.v_percent, state.h_percent)
        };
        let first_row = first_visible(v_percent, self.spec.rows, self.spec.viewport_rows);
        let first_col = first_visible(h_percent, self.spec.cols, self.spec.viewport_cols);
        let row_h = self.spec.bounds.height / self.spec.viewport_rows as f64;
        let col_w = self.spec.bounds.width / self.spec.viewport_cols as f64;
        Ok(Rect::new(
            self.spec.bounds.x + (self.col - first_col) as f64 * col_w,
            self.spec.bounds.y + (self.row - first_row) as f64 * row_h,
            col_w,
            row_h,
        ))
    }

    fn clickable_point(&self) -> Result<(f64, f64), AutomationError> {
        let b = self.bounds()?;
        Ok((b.x + b.width / 2.0, b.y + b.height / 2.0))
    }

    fn find_first(
        &self,
        _scope: TreeScope,
        condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError> {
        if let Condition::ControlType(wanted) = condition {
            if self.spec.cell_child == Some(*wanted) {
                let state = TextState {
                    value: format!("r{}c{}", self.row, self.col),
                    ..TextState::default()
                };
                return Ok(Some(UiNode::new(Arc::new(FakeTextNode {
                    id: String::new(),
                    state: Arc::new(Mutex::new(state)),
                }))));
            }
        }
        Ok(None)
    }

    fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("grid".to_string()))
    }

    fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError> {
        Ok(Box::new(FakeGridItemPattern {
            row: self.row,
            col: self.col,
        }))
    }

    fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("scroll".to_string()))
    }

    fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("text".to_string()))
    }

    fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("value".to_string()))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct FakeGridItemPattern {
    row: i32,
    col: i32,
}

impl GridItemPattern for FakeGridItemPattern {
    fn row(&self) -> Result<i32, AutomationError> {
        Ok(self.row)
    }

    fn column(&self) -> Result<i32, AutomationError> {
        Ok(self.col)
    }
}

/// Build a fake grid node plus a handle onto its scroll state and counters.
pub fn grid_node(spec: GridSpec) -> (UiNode, Arc<Mutex<GridState>>) {
    let state = Arc::new(Mutex::new(GridState::default()));
    let node = UiNode::new(Arc::new(FakeGridNode {
        spec,
        state: state.clone(),
    }));
    (node, state)
}

// ---------------------------------------------------------------------------
// Text box

#[derive(Debug, Clone)]
pub struct TextState {
    pub value: String,
    pub enabled: bool,
    pub read_only: bool,
    pub has_text_pattern: bool,
    pub has_value_pattern: bool,
    pub clickable: (f64, f64),
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            value: String::new(),
            enabled: true,
            read_only: false,
            has_text_pattern: true,
            has_value_pattern: true,
            clickable: (120.5, 240.5),
        }
    }
}

#[derive(Debug)]
pub struct FakeTextNode {
    id: String,
    state: Arc<Mutex<TextState>>,
}

impl NodeImpl for FakeTextNode {
    fn automation_id(&self) -> Result<String, AutomationError> {
        Ok(self.id.clone())
    }

    fn name(&self) -> Result<String, AutomationError> {
        Ok(String::new())
    }

    fn control_type(&self) -> Result<ControlType, AutomationError> {
        Ok(ControlType::Edit)
    }

    fn is_enabled(&self) -> Result<bool, AutomationError> {
        Ok(self.state.lock().unwrap().enabled)
    }

    fn bounds(&self) -> Result<Rect, AutomationError> {
        Ok(Rect::new(100.0, 220.0, 200.0, 40.0))
    }

    fn clickable_point(&self) -> Result<(f64, f64), AutomationError> {
        Ok(self.state.lock().unwrap().clickable)
    }

    fn find_first(
        &self,
        _scope: TreeScope,
        _condition: &Condition,
    ) -> Result<Option<UiNode>, AutomationError> {
        Ok(None)
    }

    fn grid_pattern(&self) -> Result<Box<dyn GridPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("grid".to_string()))
    }

    fn grid_item_pattern(&self) -> Result<Box<dyn GridItemPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("grid item".to_string()))
    }

    fn scroll_pattern(&self) -> Result<Box<dyn ScrollPattern + '_>, AutomationError> {
        Err(AutomationError::PatternNotSupported("scroll".to_string()))
    }

    fn text_pattern(&self) -> Result<Box<dyn TextPattern + '_>, AutomationError> {
        if !self.state.lock().unwrap().has_text_pattern {
            return Err(AutomationError::PatternNotSupported(
                "fake text box has no text pattern".to_string(),
            ));
        }
        Ok(Box::new(FakeTextPattern {
            state: self.state.clone(),
        }))
    }

    fn value_pattern(&self) -> Result<Box<dyn ValuePattern + '_>, AutomationError> {
        if !self.state.lock().unwrap().has_value_pattern {
            return Err(AutomationError::PatternNotSupported(
                "fake text box has no value pattern".to_string(),
            ));
        }
        Ok(Box::new(FakeValuePattern {
            state: self.state.clone(),
        }))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct FakeTextPattern {
    state: Arc<Mutex<TextState>>,
}

impl TextPattern for FakeTextPattern {
    fn document_text(&self) -> Result<String, AutomationError> {
        Ok(self.state.lock().unwrap().value.clone())
    }
}

struct FakeValuePattern {
    state: Arc<Mutex<TextState>>,
}

impl ValuePattern for FakeValuePattern {
    fn value(&self) -> Result<String, AutomationError> {
        Ok(self.state.lock().unwrap().value.clone())
    }

    fn is_read_only(&self) -> Result<bool, AutomationError> {
        Ok(self.state.lock().unwrap().read_only)
    }
}

/// Build a fake text-box node plus a handle onto its mutable state.
pub fn text_node(id: &str, state: TextState) -> (UiNode, Arc<Mutex<TextState>>) {
    let state = Arc::new(Mutex::new(state));
    let node = UiNode::new(Arc::new(FakeTextNode {
        id: id.to_string(),
        state: state.clone(),
    }));
    (node, state)
}

// ---------------------------------------------------------------------------
// Input recorder

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Click(MouseButton, Point),
    SelectAll,
    TypeText(String),
}

/// Records simulated input and applies keystrokes to a designated "focused"
/// text state, mimicking select-all-then-type semantics.
#[derive(Debug, Default)]
pub struct FakeInput {
    pub events: Mutex<Vec<InputEvent>>,
    pub focus: Mutex<Option<Arc<Mutex<TextState>>>>,
    pub fail_clicks: AtomicBool,
    select_all_armed: AtomicBool,
}

impl FakeInput {
    pub fn focus_on(&self, state: Arc<Mutex<TextState>>) {
        *self.focus.lock().unwrap() = Some(state);
    }

    pub fn recorded(&self) -> Vec<InputEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl InputSimulator for FakeInput {
    fn click(&self, button: MouseButton, point: Point) -> Result<(), AutomationError> {
        if self.fail_clicks.load(Ordering::SeqCst) {
            return Err(AutomationError::PlatformError(
                "click rejected by fake input".to_string(),
            ));
        }
        self.events
            .lock()
            .unwrap()
            .push(InputEvent::Click(button, point));
        Ok(())
    }

    fn select_all(&self) -> Result<(), AutomationError> {
        self.events.lock().unwrap().push(InputEvent::SelectAll);
        self.select_all_armed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.events
            .lock()
            .unwrap()
            .push(InputEvent::TypeText(text.to_string()));
        if let Some(state) = self.focus.lock().unwrap().as_ref() {
            let mut state = state.lock().unwrap();
            if self.select_all_armed.swap(false, Ordering::SeqCst) {
                state.value = text.to_string();
            } else {
                state.value.push_str(text);
            }
        }
        Ok(())
    }
}
