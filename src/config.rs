//! Configuration constants shared across all platforms
//!
//! These values control the behavior of the sampler, the history and the
//! default preferences.

/// Number of colors kept in the history
/// Nombre de couleurs conservées dans l'historique
pub const HISTORY_SIZE: usize = 6;

/// Side of the square preview captured around the cursor (in points)
/// The sampled color is the center pixel of this area
pub const CAPTURE_SIZE: f64 = 28.0;

/// Interval between two sampler ticks (in seconds)
/// Intervalle entre deux lectures du sampler (en secondes)
pub const POLL_INTERVAL_SECS: f64 = 1.0 / 30.0;

/// Two channels closer than this are considered equal when deciding
/// whether a color is a shade of gray
pub const GRAYSCALE_TOLERANCE: f64 = 0.001;

/// Colors seeding the history on first launch, as (r, g, b) in [0, 1]
/// Couleurs initiales de l'historique au premier lancement
pub const DEFAULT_HISTORY: [(f64, f64, f64); HISTORY_SIZE] = [
    (0.93, 0.47, 0.24),
    (0.13, 0.80, 0.70),
    (1.00, 0.85, 0.19),
    (0.09, 0.54, 0.91),
    (0.95, 0.54, 0.14),
    (0.54, 0.96, 0.89),
];

/// Virtual key code of the default shortcut key (kVK_ANSI_P)
pub const DEFAULT_SHORTCUT_KEY_CODE: u16 = 0x23;

/// Name of the preferences file inside the config directory
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Environment variable overriding the preferences file location
pub const PREFERENCES_ENV: &str = "PICKER_PREFERENCES";

/// Window level used by the pinned preview (NSFloatingWindowLevel)
pub const PINNED_WINDOW_LEVEL: i64 = 3;

/// Zoom factor of the pinned preview (preview points per captured point)
pub const PINNED_ZOOM_FACTOR: f64 = 5.0;
