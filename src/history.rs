// =============================================================================
// history.rs - Most recently copied colors
// =============================================================================

use std::collections::VecDeque;

use crate::color::Color;
use crate::config;
use crate::error::Result;
use crate::events::{ListenerId, Listeners};
use crate::store::SharedStore;

/// Clé de l'historique dans le store
/// History key in the store
pub const HISTORY_KEY: &str = "history";

/// Événement émis après chaque modification
/// Event emitted after every change
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChanged {
    pub colors: Vec<Color>,
}

/// Historique borné, le plus récent en premier
/// Bounded history, most recent first
pub struct ColorHistory {
    store: SharedStore,
    capacity: usize,
    colors: VecDeque<Color>,
    listeners: Listeners<HistoryChanged>,
}

impl ColorHistory {
    /// Registers the default colors in the store. Called once at startup.
    pub fn register_defaults(store: &SharedStore) -> Result<()> {
        let defaults: Vec<Color> = config::DEFAULT_HISTORY
            .iter()
            .map(|&(r, g, b)| Color::rgb(r, g, b))
            .collect();
        store.borrow_mut().register_default(HISTORY_KEY, &defaults)
    }

    pub fn load(store: SharedStore) -> Self {
        Self::with_capacity(store, config::HISTORY_SIZE)
    }

    /// Loads the history from the store, keeping at most `capacity` entries
    pub fn with_capacity(store: SharedStore, capacity: usize) -> Self {
        let stored: Vec<Color> = store.borrow().get(HISTORY_KEY).unwrap_or_default();
        let colors: VecDeque<Color> = stored.into_iter().take(capacity).collect();
        tracing::debug!("Loaded {} history colors", colors.len());

        Self {
            store,
            capacity,
            colors,
            listeners: Listeners::new(),
        }
    }

    /// Ajoute une couleur en tête et retire la plus ancienne si plein
    /// Inserts a color at the front, evicting the oldest when full
    pub fn push(&mut self, color: Color) -> Result<()> {
        if self.capacity == 0 {
            return Ok(());
        }

        self.colors.push_front(color);
        self.colors.truncate(self.capacity);

        let snapshot = self.colors();
        let saved = self.store.borrow_mut().set(HISTORY_KEY, &snapshot);
        self.listeners.emit(&HistoryChanged { colors: snapshot });
        saved
    }

    /// Color at `index` (0 = most recent), opaque black when out of range
    pub fn at(&self, index: usize) -> Color {
        self.get(index).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.colors.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&HistoryChanged) + 'static) -> ListenerId {
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

    fn gray(i: u8) -> Color {
        Color::from_rgb8(i, i, i)
    }

    #[test]
    fn test_defaults_seed_first_launch() {
        let store = Store::in_memory().shared();
        ColorHistory::register_defaults(&store).unwrap();
        let history = ColorHistory::load(store);

        assert_eq!(history.len(), config::HISTORY_SIZE);
        assert_eq!(history.at(0), Color::rgb(0.93, 0.47, 0.24));
    }

    #[test]
    fn test_seven_pushes_keep_six_most_recent() {
        let store = Store::in_memory().shared();
        let mut history = ColorHistory::load(store);

        for i in 1..=7 {
            history.push(gray(i)).unwrap();
        }

        let expected: Vec<Color> = (2..=7).rev().map(gray).collect();
        assert_eq!(history.colors(), expected);
        assert_eq!(history.len(), 6);
    }

    #[test]
    fn test_out_of_range_returns_default() {
        let store = Store::in_memory().shared();
        let mut history = ColorHistory::load(store);
        history.push(Color::WHITE).unwrap();

        assert_eq!(history.at(0), Color::WHITE);
        assert_eq!(history.at(1), Color::BLACK);
        assert_eq!(history.at(usize::MAX), Color::BLACK);
        assert_eq!(history.get(1), None);
    }

    #[test]
    fn test_push_persists_and_notifies() {
        let store = Store::in_memory().shared();
        let mut history = ColorHistory::load(store.clone());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        history.subscribe(move |e: &HistoryChanged| sink.borrow_mut().push(e.colors.len()));

        history.push(Color::WHITE).unwrap();
        history.push(Color::BLACK).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
        let reloaded = ColorHistory::load(store);
        assert_eq!(reloaded.colors(), vec![Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn test_malformed_stored_history_uses_defaults() {
        let store = Store::in_memory().shared();
        ColorHistory::register_defaults(&store).unwrap();
        store.borrow_mut().set(HISTORY_KEY, &"garbage").unwrap();

        let history = ColorHistory::load(store);
        assert_eq!(history.len(), config::HISTORY_SIZE);
        assert_eq!(history.at(1), Color::rgb(0.13, 0.80, 0.70));
    }

    #[test]
    fn test_oversized_stored_history_is_truncated() {
        let store = Store::in_memory().shared();
        let many: Vec<Color> = (0..10).map(gray).collect();
        store.borrow_mut().set(HISTORY_KEY, &many).unwrap();

        let history = ColorHistory::with_capacity(store, 3);
        assert_eq!(history.colors(), vec![gray(0), gray(1), gray(2)]);
    }
}
