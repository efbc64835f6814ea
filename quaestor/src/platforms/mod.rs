//! Platform backends: the bridge between the façades and a concrete
//! accessibility API.

use std::sync::Arc;

use crate::errors::AutomationError;
use crate::input::InputSimulator;
use crate::node::UiNode;

/// The common trait every platform backend must implement.
///
/// A backend hands out the root of the UI tree and the input simulator for
/// that platform. Tests implement this with scripted fakes; production code
/// uses the engine created by [`create_backend`].
pub trait AutomationBackend: Send + Sync {
    /// Root element of the desktop UI tree.
    fn root(&self) -> Result<UiNode, AutomationError>;

    /// Input simulator for this platform.
    fn input(&self) -> Arc<dyn InputSimulator>;
}

#[cfg(target_os = "windows")]
pub mod windows;

/// Create the backend for the current platform.
pub fn create_backend() -> Result<Arc<dyn AutomationBackend>, AutomationError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsBackend::new()?))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(AutomationError::UnsupportedPlatform(
            "no UI Automation backend for this platform; inject one via Session::with_backend"
                .to_string(),
        ))
    }
}
