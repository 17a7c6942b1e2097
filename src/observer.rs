//! Multicast observer registry that can hold its observers either strongly
//! or weakly.
//!
//! A weakly held observer lives only as long as somebody else owns it; once
//! its last `Rc` is gone the entry is dead and is pruned on the next
//! notification (or an explicit [`MulticastRegistry::prune`]).

use log::{debug, warn};
use std::rc::{Rc, Weak};

/// How the registry holds on to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// The registry owns a reference and keeps the observer alive.
    Strong,
    /// The registry only watches; the observer disappears with its owner.
    Weak,
}

enum Entry<T: ?Sized> {
    Strong(Rc<T>),
    Weak(Weak<T>),
}

impl<T: ?Sized> Entry<T> {
    fn new(observer: &Rc<T>, retention: Retention) -> Self {
        match retention {
            Retention::Strong => Entry::Strong(Rc::clone(observer)),
            Retention::Weak => Entry::Weak(Rc::downgrade(observer)),
        }
    }

    fn upgrade(&self) -> Option<Rc<T>> {
        match self {
            Entry::Strong(rc) => Some(Rc::clone(rc)),
            Entry::Weak(weak) => weak.upgrade(),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            Entry::Strong(_) => true,
            Entry::Weak(weak) => weak.strong_count() > 0,
        }
    }

    fn points_to(&self, observer: &Rc<T>) -> bool {
        match self {
            Entry::Strong(rc) => Rc::ptr_eq(rc, observer),
            Entry::Weak(weak) => weak.strong_count() > 0 && weak.ptr_eq(&Rc::downgrade(observer)),
        }
    }

    fn retention(&self) -> Retention {
        match self {
            Entry::Strong(_) => Retention::Strong,
            Entry::Weak(_) => Retention::Weak,
        }
    }
}

pub struct MulticastRegistry<T: ?Sized> {
    entries: Vec<Entry<T>>,
}

impl<T: ?Sized> MulticastRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `observer`. Registering an observer that is already present
    /// swaps its retention rather than adding a second entry, so every
    /// observer is notified at most once per [`invoke`](Self::invoke).
    pub fn add(&mut self, observer: &Rc<T>, retention: Retention) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.points_to(observer)) {
            if entry.retention() != retention {
                debug!("observer re-registered, retention now {:?}", retention);
                *entry = Entry::new(observer, retention);
            }
            return;
        }
        self.entries.push(Entry::new(observer, retention));
    }

    pub fn add_strong(&mut self, observer: &Rc<T>) {
        self.add(observer, Retention::Strong);
    }

    pub fn add_weak(&mut self, observer: &Rc<T>) {
        self.add(observer, Retention::Weak);
    }

    pub fn remove(&mut self, observer: &Rc<T>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.points_to(observer));
        let removed = self.entries.len() != before;
        if !removed {
            warn!("tried to remove an observer that was never registered");
        }
        removed
    }

    pub fn contains(&self, observer: &Rc<T>) -> bool {
        self.entries.iter().any(|e| e.points_to(observer))
    }

    pub fn retention_of(&self, observer: &Rc<T>) -> Option<Retention> {
        self.entries
            .iter()
            .find(|e| e.points_to(observer))
            .map(Entry::retention)
    }

    /// Drops entries whose weakly held observer is gone.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(Entry::is_alive);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!("pruned {} dead observer(s)", pruned);
        }
        pruned
    }

    /// Calls `f` on every live observer in registration order and returns
    /// how many were notified.
    ///
    /// All live observers are upgraded before the first call, so an observer
    /// whose owner lets go of it during the notification still gets its turn.
    pub fn invoke<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&T),
    {
        self.prune();
        let live: Vec<Rc<T>> = self.entries.iter().filter_map(Entry::upgrade).collect();
        for observer in &live {
            f(observer);
        }
        live.len()
    }

    /// Live observers, in registration order.
    pub fn observers(&self) -> Vec<Rc<T>> {
        self.entries.iter().filter_map(Entry::upgrade).collect()
    }

    /// Number of entries, dead weak ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: ?Sized> Default for MulticastRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
