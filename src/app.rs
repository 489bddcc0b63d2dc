// =============================================================================
// app.rs - Picker application state
// =============================================================================

use crate::clipboard::Clipboard;
use crate::color::Color;
use crate::error::{PickerError, Result};
use crate::events::{ListenerId, Listeners};
use crate::format::ColorFormat;
use crate::history::ColorHistory;
use crate::hotkey::{HotkeyBackend, HotkeyManager};
use crate::preferences::Preferences;
use crate::sampler::{ColorSampler, ScreenSource};
use crate::shortcut::{Shortcut, ShortcutAction};
use crate::store::SharedStore;

/// Clé du format sélectionné (identifiant numérique)
/// Selected format key (numeric id)
pub const FORMAT_KEY: &str = "format";

/// Événements de l'application
/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PinChanged(bool),
    FormatChanged(ColorFormat),
    Copied { color: Color, text: String },
}

// =============================================================================
// PICKER APP
// =============================================================================

/// Racine de composition : possède tous les composants
/// Composition root: owns every component
pub struct PickerApp<S: ScreenSource, C: Clipboard, B: HotkeyBackend> {
    store: SharedStore,
    sampler: ColorSampler<S>,
    history: ColorHistory,
    preferences: Preferences,
    hotkeys: HotkeyManager<B>,
    clipboard: C,
    format: ColorFormat,
    pinned: bool,
    listeners: Listeners<AppEvent>,
}

impl<S: ScreenSource, C: Clipboard, B: HotkeyBackend> PickerApp<S, C, B> {
    /// Registers the defaults, loads the saved state and binds the hotkeys
    pub fn new(store: SharedStore, screen: S, clipboard: C, backend: B) -> Result<Self> {
        ColorHistory::register_defaults(&store)?;
        Preferences::register_defaults(&store)?;
        store
            .borrow_mut()
            .register_default(FORMAT_KEY, &ColorFormat::default().id())?;

        let format = load_format(&store);
        let history = ColorHistory::load(store.clone());
        let preferences = Preferences::load(store.clone());

        let mut app = Self {
            store,
            sampler: ColorSampler::new(screen),
            history,
            preferences,
            hotkeys: HotkeyManager::new(backend),
            clipboard,
            format,
            pinned: false,
            listeners: Listeners::new(),
        };
        app.register_hotkeys();

        tracing::info!("Picker ready, format: {}", app.format.display_name());
        Ok(app)
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    /// Selects and persists the output format
    pub fn set_format(&mut self, format: ColorFormat) -> Result<()> {
        self.format = format;
        let saved = self.store.borrow_mut().set(FORMAT_KEY, &format.id());
        tracing::info!("Format set to {}", format.display_name());
        self.listeners.emit(&AppEvent::FormatChanged(format));
        saved
    }

    /// Samples the pixel under the cursor, copies it and records it
    pub fn copy_color(&mut self) -> Result<String> {
        let color = self.sampler.sample_now();
        self.copy(color, true)
    }

    /// Copies `color` in the selected format
    ///
    /// Colors picked from the history are copied with `save_to_history` set
    /// to `false` so that the history order does not change.
    pub fn copy(&mut self, color: Color, save_to_history: bool) -> Result<String> {
        let text = self.format.format(&color);
        self.clipboard.write_text(&text)?;
        if save_to_history {
            self.history.push(color)?;
        }
        tracing::info!("Copied {}", text);

        self.listeners.emit(&AppEvent::Copied {
            color,
            text: text.clone(),
        });
        Ok(text)
    }

    /// Copies the history entry at `index` (0 = most recent) without moving it
    pub fn copy_history(&mut self, index: usize) -> Result<String> {
        let color = self.history.get(index).ok_or(PickerError::HistoryIndex(index))?;
        self.copy(color, false)
    }

    /// Shows or hides the pinned preview; the sampler tracks while pinned
    pub fn toggle_pin(&mut self) -> bool {
        self.set_pinned(!self.pinned);
        self.pinned
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        if self.pinned == pinned {
            return;
        }
        self.pinned = pinned;
        if pinned {
            self.sampler.start_tracking();
        } else {
            self.sampler.stop_tracking();
        }
        self.listeners.emit(&AppEvent::PinChanged(pinned));
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Changes a binding and re-registers every hotkey
    pub fn set_shortcut(&mut self, action: ShortcutAction, shortcut: Option<Shortcut>) -> Result<()> {
        let saved = self.preferences.set_shortcut(action, shortcut);
        self.register_hotkeys();
        saved
    }

    pub fn handle_action(&mut self, action: ShortcutAction) -> Result<()> {
        tracing::debug!("Action: {}", action.display_name());
        match action {
            ShortcutAction::CopyColor => self.copy_color().map(|_| ()),
            ShortcutAction::PinToScreen => {
                self.toggle_pin();
                Ok(())
            }
        }
    }

    /// One timer tick: samples if tracking, then runs pressed shortcuts.
    /// Returns `true` when the sampled color or location changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.sampler.poll();
        for action in self.hotkeys.poll() {
            if let Err(e) = self.handle_action(action) {
                tracing::warn!("{} failed: {}", action.display_name(), e);
            }
        }
        changed
    }

    fn register_hotkeys(&mut self) {
        self.hotkeys.unregister_all();
        for action in ShortcutAction::ALL {
            let Some(shortcut) = self.preferences.shortcut(action) else {
                continue;
            };
            if let Err(e) = self.hotkeys.register(shortcut, action) {
                tracing::warn!("Could not register {} for {}: {}", shortcut, action.display_name(), e);
            }
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&AppEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn sampler(&self) -> &ColorSampler<S> {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut ColorSampler<S> {
        &mut self.sampler
    }

    pub fn history(&self) -> &ColorHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ColorHistory {
        &mut self.history
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn hotkeys(&self) -> &HotkeyManager<B> {
        &self.hotkeys
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

fn load_format(store: &SharedStore) -> ColorFormat {
    let id = store.borrow().get::<u8>(FORMAT_KEY);
    match id.map(|id| (id, ColorFormat::from_id(id))) {
        Some((_, Some(format))) => format,
        Some((id, None)) => {
            tracing::warn!("Unknown format id {}, using hex", id);
            ColorFormat::default()
        }
        None => ColorFormat::default(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::geometry::{Point, PreviewImage, Rect};
    use crate::hotkey::NullBackend;
    use crate::shortcut::ModifierFlags;
    use crate::store::Store;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Screen filled with a single color
    struct SolidScreen(Rc<Cell<Color>>);

    impl ScreenSource for SolidScreen {
        fn cursor_location(&self) -> Option<Point> {
            Some(Point::new(50.0, 50.0))
        }

        fn screen_bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 100.0, 100.0)
        }

        fn capture(&self, rect: Rect) -> Option<PreviewImage> {
            Some(PreviewImage::filled(rect.width as usize, rect.height as usize, self.0.get()))
        }
    }

    type TestApp = PickerApp<SolidScreen, MemoryClipboard, NullBackend>;

    fn app_with(store: SharedStore, color: Color) -> (TestApp, Rc<Cell<Color>>) {
        let screen = Rc::new(Cell::new(color));
        let app = PickerApp::new(store, SolidScreen(screen.clone()), MemoryClipboard::new(), NullBackend)
            .unwrap();
        (app, screen)
    }

    #[test]
    fn test_copy_color_formats_copies_and_records() {
        let (mut app, _) = app_with(Store::in_memory().shared(), Color::from_rgb8(255, 87, 51));

        let text = app.copy_color().unwrap();
        assert_eq!(text, "#FF5733");
        assert_eq!(app.clipboard().contents(), Some("#FF5733"));
        assert_eq!(app.history().at(0), Color::from_rgb8(255, 87, 51));
        assert_eq!(app.history().len(), 6);
    }

    #[test]
    fn test_copy_from_history_keeps_order() {
        let (mut app, _) = app_with(Store::in_memory().shared(), Color::BLACK);
        let before = app.history().colors();

        let text = app.copy_history(3).unwrap();
        assert_eq!(text, before[3].hex());
        assert_eq!(app.clipboard().contents(), Some(text.as_str()));
        assert_eq!(app.history().colors(), before);
        assert_eq!(app.clipboard().writes(), 1);
    }

    #[test]
    fn test_copy_history_out_of_range_writes_nothing() {
        let (mut app, _) = app_with(Store::in_memory().shared(), Color::BLACK);
        assert!(matches!(app.copy_history(6), Err(PickerError::HistoryIndex(6))));
        assert_eq!(app.clipboard().writes(), 0);
    }

    #[test]
    fn test_format_is_persisted() {
        let store = Store::in_memory().shared();
        let (mut app, _) = app_with(store.clone(), Color::WHITE);
        assert_eq!(app.format(), ColorFormat::Hex);

        app.set_format(ColorFormat::Rgb).unwrap();
        assert_eq!(app.copy(Color::WHITE, false).unwrap(), "rgb(255, 255, 255)");

        let (reloaded, _) = app_with(store, Color::WHITE);
        assert_eq!(reloaded.format(), ColorFormat::Rgb);
    }

    #[test]
    fn test_unknown_format_id_falls_back_to_hex() {
        let store = Store::in_memory().shared();
        store.borrow_mut().set(FORMAT_KEY, &200u8).unwrap();
        let (app, _) = app_with(store, Color::WHITE);
        assert_eq!(app.format(), ColorFormat::Hex);
    }

    #[test]
    fn test_pin_drives_tracking_and_events() {
        let (mut app, screen) = app_with(Store::in_memory().shared(), Color::WHITE);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        app.subscribe(move |e: &AppEvent| sink.borrow_mut().push(e.clone()));

        assert!(app.toggle_pin());
        assert!(app.sampler().is_tracking());
        assert_eq!(app.sampler().current_color(), Color::WHITE);

        screen.set(Color::from_rgb8(1, 2, 3));
        assert!(app.tick());
        assert!(!app.tick());

        assert!(!app.toggle_pin());
        assert!(!app.sampler().is_tracking());
        assert_eq!(
            *seen.borrow(),
            vec![AppEvent::PinChanged(true), AppEvent::PinChanged(false)]
        );
    }

    #[test]
    fn test_set_shortcut_rebinds_hotkeys() {
        let (mut app, _) = app_with(Store::in_memory().shared(), Color::WHITE);
        let old = app.preferences().copy_color_shortcut().unwrap();
        assert_eq!(app.hotkeys().action_for(&old), Some(ShortcutAction::CopyColor));

        let new = Shortcut::new(0x08, ModifierFlags::CONTROL | ModifierFlags::OPTION);
        app.set_shortcut(ShortcutAction::CopyColor, Some(new)).unwrap();
        assert!(!app.hotkeys().is_registered(&old));
        assert_eq!(app.hotkeys().action_for(&new), Some(ShortcutAction::CopyColor));

        app.set_shortcut(ShortcutAction::CopyColor, None).unwrap();
        assert!(!app.hotkeys().is_registered(&new));
        assert!(app.preferences().pin_to_screen_shortcut().is_some());
    }

    #[test]
    fn test_handle_action_dispatch() {
        let (mut app, _) = app_with(Store::in_memory().shared(), Color::WHITE);
        app.handle_action(ShortcutAction::PinToScreen).unwrap();
        assert!(app.is_pinned());

        app.handle_action(ShortcutAction::CopyColor).unwrap();
        assert_eq!(app.clipboard().contents(), Some("#FFFFFF"));
    }
}
