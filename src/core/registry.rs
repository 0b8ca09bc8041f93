// LogWeave - core/registry.rs
//
// Ordered, identity-unique collection of shared references.
// Backs the mutator, filter, and child-strategy lists.
//
// Identity is the address of the `Arc` allocation: two distinct mutators with
// identical behaviour are different members, the same `Arc` cloned twice is
// one member. A registered `Arc` keeps its allocation alive, so an address
// cannot be reused while it is in the set.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Identity key of a shared reference.
pub fn identity<T: ?Sized>(item: &Arc<T>) -> usize {
    Arc::as_ptr(item).cast::<()>() as usize
}

struct Entries<T: ?Sized> {
    /// Members in insertion order.
    order: Vec<Arc<T>>,
    /// Identity keys of `order`, for O(1) membership checks.
    index: HashSet<usize>,
}

/// Insertion-ordered set of `Arc<T>` keyed by identity.
///
/// All operations take `&self`; the lists are guarded by a `RwLock` so a
/// strategy that is shared (e.g. a child of a `Logger`) can still be
/// reconfigured.
pub struct Registry<T: ?Sized> {
    entries: RwLock<Entries<T>>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries {
                order: Vec::new(),
                index: HashSet::new(),
            }),
        }
    }

    /// Append `item` unless it is already a member.
    /// Returns whether it was added.
    pub fn add(&self, item: Arc<T>) -> bool {
        let key = identity(&item);
        let mut entries = self.entries.write();
        if !entries.index.insert(key) {
            return false;
        }
        entries.order.push(item);
        true
    }

    /// Remove `item` if it is a member.
    /// Returns whether it was removed.
    pub fn remove(&self, item: &Arc<T>) -> bool {
        let key = identity(item);
        let mut entries = self.entries.write();
        if !entries.index.remove(&key) {
            return false;
        }
        entries.order.retain(|member| identity(member) != key);
        true
    }

    pub fn contains(&self, item: &Arc<T>) -> bool {
        self.entries.read().index.contains(&identity(item))
    }

    /// Members in insertion order.
    ///
    /// The returned vector shares the members but not the list: later
    /// registrations do not show up in it.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.entries.read().order.clone()
    }

    /// Remove every member. Always succeeds, also on an empty registry.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.order.clear();
        entries.index.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}
