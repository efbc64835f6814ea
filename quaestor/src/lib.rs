//! Desktop UI test automation through accessibility APIs
//!
//! This crate is a test-helper façade over the platform's UI Automation
//! tree: locate on-screen controls, read their properties, scroll grid cells
//! into view and drive text inputs the way a user would. All operations are
//! synchronous and blocking; every loop is bounded by a configured timeout
//! or scroll threshold, and expected failures come back as
//! [`AutomationError`] values rather than panics.
//!
//! ```no_run
//! use quaestor::{DataGrid, Session, TextBox};
//!
//! # fn main() -> Result<(), quaestor::AutomationError> {
//! let session = Session::new()?;
//! let root = session.root()?;
//!
//! let grid = DataGrid::new(&session, &root, "ResultsGrid")?;
//! grid.scroll_to(30, 2)?;
//! let cell: TextBox = grid.item(30, 2)?;
//! assert_eq!(cell.text()?, "expected");
//!
//! let name = TextBox::new(&session, &root, "NameBox")?;
//! name.set_text("Ada")?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::instrument;

pub mod condition;
pub mod config;
pub mod elements;
pub mod errors;
pub mod geometry;
pub mod input;
pub mod node;
pub mod platforms;
pub mod wait;

pub use condition::{Condition, ControlType, TreeScope};
pub use config::AutomationConfig;
pub use elements::{CellControl, DataGrid, TextBox};
pub use errors::AutomationError;
pub use geometry::{Point, Rect};
pub use input::{InputSimulator, MouseButton};
pub use node::{NodeSnapshot, UiNode};
pub use platforms::AutomationBackend;

/// The entry point for UI automation.
///
/// Owns the platform backend and the timing/scrolling configuration that
/// element façades consult. Cloning a session is cheap and shares the
/// backend.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn AutomationBackend>,
    config: Arc<AutomationConfig>,
}

impl Session {
    /// Create a session on the current platform's backend with defaults.
    #[instrument]
    pub fn new() -> Result<Self, AutomationError> {
        Self::with_config(AutomationConfig::default())
    }

    /// Create a session on the current platform's backend with a custom
    /// configuration.
    pub fn with_config(config: AutomationConfig) -> Result<Self, AutomationError> {
        let backend = platforms::create_backend()?;
        Ok(Self::with_backend(backend, config))
    }

    /// Create a session over an injected backend.
    ///
    /// This is how tests substitute a scripted fake for the live UI tree and
    /// real input injection.
    pub fn with_backend(backend: Arc<dyn AutomationBackend>, config: AutomationConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Root element of the desktop UI tree.
    pub fn root(&self) -> Result<UiNode, AutomationError> {
        self.backend.root()
    }

    /// The input simulator of this session's backend.
    pub fn input(&self) -> Arc<dyn InputSimulator> {
        self.backend.input()
    }

    /// Timing and scrolling configuration.
    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish()
    }
}
