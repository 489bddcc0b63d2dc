// =============================================================================
// lib.rs - Sélecteur de couleur pour la barre de menus
// lib.rs - Menu-bar color picker
// =============================================================================

// =============================================================================
// MODULES
// =============================================================================

/// Configuration partagée (constantes)
/// Shared configuration (constants)
pub mod config;

/// Erreurs de la bibliothèque
/// Library errors
pub mod error;

/// Couleur RGBA et conversions (HSB, HSL, HWB, CMYK)
/// RGBA color and conversions (HSB, HSL, HWB, CMYK)
pub mod color;

/// Formats de sortie textuels
/// Textual output formats
pub mod format;

/// Notification des changements
/// Change notification
pub mod events;

/// Préférences persistées en JSON
/// Preferences persisted as JSON
pub mod store;

/// Historique des couleurs copiées
/// History of copied colors
pub mod history;

/// Raccourcis clavier
/// Keyboard shortcuts
pub mod shortcut;

/// Liaisons des raccourcis aux actions
/// Shortcut bindings for each action
pub mod preferences;

/// Raccourcis globaux
/// Global hotkeys
pub mod hotkey;

/// Presse-papiers
/// Clipboard
pub mod clipboard;

/// Points, rectangles et images d'aperçu
/// Points, rectangles and preview images
pub mod geometry;

/// Lecture du pixel sous le curseur
/// Reading the pixel under the cursor
pub mod sampler;

/// Racine de composition
/// Composition root
pub mod app;

/// Initialisation des logs
/// Logging setup
pub mod logging;

/// Chemins de configuration
/// Configuration paths
pub mod paths;

/// Implémentations natives
/// Native implementations
pub mod platform;

pub use app::{AppEvent, PickerApp};
pub use color::Color;
pub use error::{PickerError, Result};
pub use format::ColorFormat;

use store::{SharedStore, Store};

/// Ouvre le store de préférences de l'utilisateur
/// Opens the user's preferences store
pub fn open_store() -> SharedStore {
    Store::open(paths::preferences_file()).shared()
}

/// Lance le picker interactif avec les préférences de l'utilisateur
/// Runs the interactive picker with the user's preferences
pub fn run() -> Result<()> {
    platform::run(open_store())
}
