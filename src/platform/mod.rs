// =============================================================================
// platform - Native screen, clipboard, hotkeys and run loop
// =============================================================================

use crate::error::Result;
use crate::store::SharedStore;

/// Implémentation macOS
/// macOS implementation
#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub use macos::{CarbonBackend, CoreGraphicsScreen, MacApp, Pasteboard};

/// Lance le picker interactif jusqu'à l'arrêt du processus
/// Runs the interactive picker until the process is stopped
pub fn run(store: SharedStore) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        macos::run(store)
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = store;
        Err(crate::error::PickerError::UnsupportedPlatform)
    }
}

/// Copie l'entrée `index` de l'historique dans le presse-papiers système
/// Copies history entry `index` to the system clipboard
///
/// Returns the copied text. The history order is left untouched.
pub fn copy_history(store: SharedStore, index: usize) -> Result<String> {
    #[cfg(target_os = "macos")]
    {
        macos::copy_history(store, index)
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = (store, index);
        Err(crate::error::PickerError::UnsupportedPlatform)
    }
}
