// =============================================================================
// hotkey.rs - Global hotkey registration and dispatch
// =============================================================================

use std::collections::{HashMap, VecDeque};

use crate::error::Result;
use crate::shortcut::{Shortcut, ShortcutAction};

/// Mécanisme système d'enregistrement des raccourcis
/// System mechanism behind global shortcuts
pub trait HotkeyBackend {
    fn register(&mut self, shortcut: &Shortcut) -> Result<()>;

    fn unregister(&mut self, shortcut: &Shortcut);

    /// Shortcuts pressed since the previous call
    fn poll(&mut self) -> Vec<Shortcut> {
        Vec::new()
    }
}

/// Backend that accepts every registration and never fires
#[derive(Debug, Default)]
pub struct NullBackend;

impl HotkeyBackend for NullBackend {
    fn register(&mut self, _shortcut: &Shortcut) -> Result<()> {
        Ok(())
    }

    fn unregister(&mut self, _shortcut: &Shortcut) {}
}

/// Raccourcis déclenchés par le système, en attente du prochain poll
/// Hotkeys fired by the system, waiting for the next poll
///
/// Each registered shortcut gets a non-zero id that is handed to the system.
/// The system reports presses by id, possibly several between two polls.
#[derive(Debug, Default)]
pub struct HotkeyQueue {
    last_id: u32,
    registered: HashMap<u32, Shortcut>,
    fired: VecDeque<u32>,
}

impl HotkeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh id to `shortcut`. Ids are never reused.
    pub fn assign(&mut self, shortcut: Shortcut) -> u32 {
        self.last_id += 1;
        self.registered.insert(self.last_id, shortcut);
        self.last_id
    }

    /// Forgets `shortcut` and returns the id it had
    pub fn release(&mut self, shortcut: &Shortcut) -> Option<u32> {
        let id = self.id_of(shortcut)?;
        self.registered.remove(&id);
        Some(id)
    }

    pub fn id_of(&self, shortcut: &Shortcut) -> Option<u32> {
        self.registered
            .iter()
            .find(|(_, s)| *s == shortcut)
            .map(|(id, _)| *id)
    }

    /// Records a press reported by the system. Unknown ids are ignored.
    pub fn fire(&mut self, id: u32) -> bool {
        let known = self.registered.contains_key(&id);
        if known {
            self.fired.push_back(id);
        }
        known
    }

    /// Shortcuts pressed since the previous drain, oldest first
    ///
    /// Presses of shortcuts released in the meantime are dropped.
    pub fn drain(&mut self) -> Vec<Shortcut> {
        self.fired
            .drain(..)
            .filter_map(|id| self.registered.get(&id).copied())
            .collect()
    }
}

/// Gestionnaire des raccourcis globaux
/// Global shortcut manager
pub struct HotkeyManager<B: HotkeyBackend> {
    backend: B,
    bindings: HashMap<Shortcut, ShortcutAction>,
}

impl<B: HotkeyBackend> HotkeyManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bindings: HashMap::new(),
        }
    }

    /// Binds `shortcut` to `action`, replacing any existing binding of the
    /// same shortcut
    pub fn register(&mut self, shortcut: Shortcut, action: ShortcutAction) -> Result<()> {
        if self.bindings.remove(&shortcut).is_some() {
            self.backend.unregister(&shortcut);
        }
        self.backend.register(&shortcut)?;
        self.bindings.insert(shortcut, action);
        tracing::debug!("Registered {} for {}", shortcut, action.display_name());
        Ok(())
    }

    pub fn unregister(&mut self, shortcut: &Shortcut) -> bool {
        let removed = self.bindings.remove(shortcut).is_some();
        if removed {
            self.backend.unregister(shortcut);
            tracing::debug!("Unregistered {}", shortcut);
        }
        removed
    }

    pub fn unregister_all(&mut self) {
        for (shortcut, _) in self.bindings.drain() {
            self.backend.unregister(&shortcut);
        }
    }

    pub fn is_registered(&self, shortcut: &Shortcut) -> bool {
        self.bindings.contains_key(shortcut)
    }

    pub fn action_for(&self, shortcut: &Shortcut) -> Option<ShortcutAction> {
        self.bindings.get(shortcut).copied()
    }

    /// Actions whose shortcut was pressed since the previous poll
    pub fn poll(&mut self) -> Vec<ShortcutAction> {
        self.backend
            .poll()
            .iter()
            .filter_map(|s| self.action_for(s))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickerError;
    use crate::shortcut::ModifierFlags;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend whose presses are injected by the test, like the system would
    #[derive(Clone, Default)]
    struct FakeSystem(Rc<RefCell<HotkeyQueue>>);

    impl FakeSystem {
        fn press(&self, shortcut: &Shortcut) {
            let id = self.0.borrow().id_of(shortcut);
            if let Some(id) = id {
                self.0.borrow_mut().fire(id);
            }
        }
    }

    impl HotkeyBackend for FakeSystem {
        fn register(&mut self, shortcut: &Shortcut) -> Result<()> {
            self.0.borrow_mut().assign(*shortcut);
            Ok(())
        }

        fn unregister(&mut self, shortcut: &Shortcut) {
            self.0.borrow_mut().release(shortcut);
        }

        fn poll(&mut self) -> Vec<Shortcut> {
            self.0.borrow_mut().drain()
        }
    }

    struct RefusingBackend;

    impl HotkeyBackend for RefusingBackend {
        fn register(&mut self, shortcut: &Shortcut) -> Result<()> {
            Err(PickerError::Hotkey(format!("{} is taken", shortcut)))
        }

        fn unregister(&mut self, _shortcut: &Shortcut) {}
    }

    fn cmd_shift_p() -> Shortcut {
        Shortcut::new(0x23, ModifierFlags::COMMAND | ModifierFlags::SHIFT)
    }

    fn option_cmd_shift_p() -> Shortcut {
        Shortcut::new(
            0x23,
            ModifierFlags::COMMAND | ModifierFlags::SHIFT | ModifierFlags::OPTION,
        )
    }

    #[test]
    fn test_queue_ids_are_fresh_and_unknown_ids_ignored() {
        let mut queue = HotkeyQueue::new();
        let first = queue.assign(cmd_shift_p());
        assert_ne!(first, 0);
        assert_eq!(queue.release(&cmd_shift_p()), Some(first));
        let second = queue.assign(cmd_shift_p());
        assert_ne!(first, second);

        assert!(!queue.fire(first));
        assert!(queue.fire(second));
        assert_eq!(queue.drain(), vec![cmd_shift_p()]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_presses_between_polls_are_all_delivered() {
        let system = FakeSystem::default();
        let mut manager = HotkeyManager::new(system.clone());
        manager.register(cmd_shift_p(), ShortcutAction::CopyColor).unwrap();
        manager.register(option_cmd_shift_p(), ShortcutAction::PinToScreen).unwrap();

        assert!(manager.poll().is_empty());

        system.press(&cmd_shift_p());
        system.press(&option_cmd_shift_p());
        system.press(&cmd_shift_p());
        assert_eq!(
            manager.poll(),
            vec![
                ShortcutAction::CopyColor,
                ShortcutAction::PinToScreen,
                ShortcutAction::CopyColor
            ]
        );
        assert!(manager.poll().is_empty());
    }

    #[test]
    fn test_nothing_fires_without_a_key_down() {
        // P held while option goes down and up again: the system reports a
        // single key-down, so later ticks must stay silent
        let system = FakeSystem::default();
        let mut manager = HotkeyManager::new(system.clone());
        manager.register(cmd_shift_p(), ShortcutAction::CopyColor).unwrap();
        manager.register(option_cmd_shift_p(), ShortcutAction::PinToScreen).unwrap();

        system.press(&cmd_shift_p());
        assert_eq!(manager.poll(), vec![ShortcutAction::CopyColor]);
        for _ in 0..3 {
            assert!(manager.poll().is_empty());
        }
    }

    #[test]
    fn test_press_of_released_shortcut_is_dropped() {
        let system = FakeSystem::default();
        let mut manager = HotkeyManager::new(system.clone());
        manager.register(cmd_shift_p(), ShortcutAction::CopyColor).unwrap();

        system.press(&cmd_shift_p());
        assert!(manager.unregister(&cmd_shift_p()));
        assert!(manager.poll().is_empty());
    }

    #[test]
    fn test_register_replaces_and_unregister_silences() {
        let system = FakeSystem::default();
        let mut manager = HotkeyManager::new(system.clone());
        manager.register(cmd_shift_p(), ShortcutAction::CopyColor).unwrap();
        manager.register(cmd_shift_p(), ShortcutAction::PinToScreen).unwrap();
        assert_eq!(manager.action_for(&cmd_shift_p()), Some(ShortcutAction::PinToScreen));

        system.press(&cmd_shift_p());
        assert_eq!(manager.poll(), vec![ShortcutAction::PinToScreen]);

        assert!(manager.unregister(&cmd_shift_p()));
        assert!(!manager.is_registered(&cmd_shift_p()));

        system.press(&cmd_shift_p());
        assert!(manager.poll().is_empty());
    }

    #[test]
    fn test_refused_registration_leaves_no_binding() {
        let mut manager = HotkeyManager::new(RefusingBackend);
        assert!(matches!(
            manager.register(cmd_shift_p(), ShortcutAction::CopyColor),
            Err(PickerError::Hotkey(_))
        ));
        assert!(!manager.is_registered(&cmd_shift_p()));
    }

    #[test]
    fn test_unregister_all() {
        let mut manager = HotkeyManager::new(NullBackend);
        manager.register(cmd_shift_p(), ShortcutAction::CopyColor).unwrap();
        manager.unregister_all();
        assert!(!manager.is_registered(&cmd_shift_p()));
        assert!(manager.poll().is_empty());
    }
}
