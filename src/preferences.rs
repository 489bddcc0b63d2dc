// =============================================================================
// preferences.rs - Shortcut bindings
// =============================================================================

use crate::config;
use crate::error::Result;
use crate::events::{ListenerId, Listeners};
use crate::shortcut::{ModifierFlags, Shortcut, ShortcutAction};
use crate::store::SharedStore;

pub const COPY_COLOR_SHORTCUT_KEY: &str = "shortcuts.copy_color";
pub const PIN_TO_SCREEN_SHORTCUT_KEY: &str = "shortcuts.pin_to_screen";

fn store_key(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::CopyColor => COPY_COLOR_SHORTCUT_KEY,
        ShortcutAction::PinToScreen => PIN_TO_SCREEN_SHORTCUT_KEY,
    }
}

/// Raccourci modifié (None = désactivé)
/// Shortcut changed (None = disabled)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutChanged {
    pub action: ShortcutAction,
    pub shortcut: Option<Shortcut>,
}

/// Default binding for each action: ⇧⌘P copies, ⌥⇧⌘P pins
pub fn default_shortcut(action: ShortcutAction) -> Shortcut {
    let base = ModifierFlags::COMMAND | ModifierFlags::SHIFT;
    let modifiers = match action {
        ShortcutAction::CopyColor => base,
        ShortcutAction::PinToScreen => base | ModifierFlags::OPTION,
    };
    Shortcut::new(config::DEFAULT_SHORTCUT_KEY_CODE, modifiers)
}

pub struct Preferences {
    store: SharedStore,
    copy_color: Option<Shortcut>,
    pin_to_screen: Option<Shortcut>,
    listeners: Listeners<ShortcutChanged>,
}

impl Preferences {
    pub fn register_defaults(store: &SharedStore) -> Result<()> {
        let mut store = store.borrow_mut();
        for action in ShortcutAction::ALL {
            store.register_default(store_key(action), &default_shortcut(action))?;
        }
        Ok(())
    }

    pub fn load(store: SharedStore) -> Self {
        let read = |action| store.borrow().get::<Shortcut>(store_key(action));
        let copy_color = read(ShortcutAction::CopyColor);
        let pin_to_screen = read(ShortcutAction::PinToScreen);

        Self {
            store,
            copy_color,
            pin_to_screen,
            listeners: Listeners::new(),
        }
    }

    pub fn shortcut(&self, action: ShortcutAction) -> Option<Shortcut> {
        match action {
            ShortcutAction::CopyColor => self.copy_color,
            ShortcutAction::PinToScreen => self.pin_to_screen,
        }
    }

    pub fn copy_color_shortcut(&self) -> Option<Shortcut> {
        self.copy_color
    }

    pub fn pin_to_screen_shortcut(&self) -> Option<Shortcut> {
        self.pin_to_screen
    }

    /// Met à jour et sauvegarde un raccourci
    /// Updates and persists a shortcut
    ///
    /// `None` disables the action; the choice is persisted so that the
    /// default does not come back on next launch.
    pub fn set_shortcut(&mut self, action: ShortcutAction, shortcut: Option<Shortcut>) -> Result<()> {
        match action {
            ShortcutAction::CopyColor => self.copy_color = shortcut,
            ShortcutAction::PinToScreen => self.pin_to_screen = shortcut,
        }

        let saved = {
            let mut store = self.store.borrow_mut();
            match shortcut {
                Some(s) => store.set(store_key(action), &s),
                None => store.clear(store_key(action)),
            }
        };
        tracing::info!(
            "{} shortcut set to {}",
            action.display_name(),
            shortcut.map(|s| s.display_string()).unwrap_or_else(|| "none".to_string())
        );

        self.listeners.emit(&ShortcutChanged { action, shortcut });
        saved
    }

    /// Restores the default binding of `action`
    pub fn reset_shortcut(&mut self, action: ShortcutAction) -> Result<()> {
        self.store.borrow_mut().remove(store_key(action))?;
        let shortcut = self.store.borrow().get::<Shortcut>(store_key(action));
        match action {
            ShortcutAction::CopyColor => self.copy_color = shortcut,
            ShortcutAction::PinToScreen => self.pin_to_screen = shortcut,
        }
        self.listeners.emit(&ShortcutChanged { action, shortcut });
        Ok(())
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ShortcutChanged) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fresh() -> (SharedStore, Preferences) {
        let store = Store::in_memory().shared();
        Preferences::register_defaults(&store).unwrap();
        let prefs = Preferences::load(store.clone());
        (store, prefs)
    }

    #[test]
    fn test_defaults() {
        let (_, prefs) = fresh();
        assert_eq!(prefs.copy_color_shortcut().unwrap().display_string(), "\u{21E7}\u{2318}P");
        assert_eq!(
            prefs.pin_to_screen_shortcut().unwrap().display_string(),
            "\u{2325}\u{21E7}\u{2318}P"
        );
    }

    #[test]
    fn test_set_persists_and_notifies() {
        let (store, mut prefs) = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        prefs.subscribe(move |e: &ShortcutChanged| sink.borrow_mut().push(*e));

        let new = Shortcut::new(0x07, ModifierFlags::CONTROL);
        prefs.set_shortcut(ShortcutAction::CopyColor, Some(new)).unwrap();

        assert_eq!(Preferences::load(store).copy_color_shortcut(), Some(new));
        assert_eq!(
            *seen.borrow(),
            vec![ShortcutChanged { action: ShortcutAction::CopyColor, shortcut: Some(new) }]
        );
    }

    #[test]
    fn test_disabled_shortcut_stays_disabled() {
        let (store, mut prefs) = fresh();
        prefs.set_shortcut(ShortcutAction::PinToScreen, None).unwrap();

        let reloaded = Preferences::load(store);
        assert_eq!(reloaded.pin_to_screen_shortcut(), None);
        assert!(reloaded.copy_color_shortcut().is_some());
    }

    #[test]
    fn test_reset_restores_default() {
        let (_, mut prefs) = fresh();
        prefs.set_shortcut(ShortcutAction::CopyColor, None).unwrap();
        prefs.reset_shortcut(ShortcutAction::CopyColor).unwrap();
        assert_eq!(
            prefs.copy_color_shortcut(),
            Some(default_shortcut(ShortcutAction::CopyColor))
        );
    }
}
