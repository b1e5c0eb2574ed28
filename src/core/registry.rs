//=========================================================================
// Registry
//=========================================================================
//
// Ordered collection of callbacks whose lifetime is tied to a handle.
//
// Architecture:
//   register(item) → Registration ──drop/cancel()──► flag cleared
//                                                        ↓
//   run_active()   → skips cleared entries, prunes them afterwards
//
// The flag is a shared `Cell`, so a handle can be cancelled from inside a
// callback that is currently being run by the registry (e.g. a frame task
// that unmounts a sibling component). Single-threaded by construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

//=== Registration ========================================================

/// Keeps a registry entry alive. Dropping it (or calling
/// [`cancel`](Self::cancel)) removes the entry before its next run.
#[derive(Debug)]
#[must_use = "dropping a Registration cancels it immediately"]
pub struct Registration {
    active: Rc<Cell<bool>>,
}

impl Registration {
    /// Cancels the entry. Idempotent.
    pub fn cancel(&self) {
        self.active.set(false);
    }

    /// Returns `true` until the entry is cancelled or finishes on its own.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.cancel();
    }
}

//=== Registry ============================================================

struct Entry<T> {
    active: Rc<Cell<bool>>,
    item: T,
}

/// Insertion-ordered set of items, each guarded by a [`Registration`].
pub(crate) struct Registry<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds an item and returns the handle that controls its lifetime.
    pub(crate) fn register(&mut self, item: T) -> Registration {
        let active = Rc::new(Cell::new(true));
        self.entries.push(Entry {
            active: Rc::clone(&active),
            item,
        });
        Registration { active }
    }

    /// Runs `f` on every active item in insertion order.
    ///
    /// Returning `false` from `f` retires the item. The active flag is
    /// checked right before each call, so items cancelled by an earlier
    /// call in the same pass are skipped.
    pub(crate) fn run_active<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        for entry in &mut self.entries {
            if !entry.active.get() {
                continue;
            }
            if !f(&mut entry.item) {
                entry.active.set(false);
            }
        }
        self.prune();
    }

    /// Number of entries that have not been cancelled.
    pub(crate) fn active_len(&self) -> usize {
        self.entries.iter().filter(|e| e.active.get()).count()
    }

    /// Drops cancelled entries.
    pub(crate) fn prune(&mut self) {
        self.entries.retain(|e| e.active.get());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn runs_in_insertion_order() {
        let mut registry = Registry::new();
        let _a = registry.register(1);
        let _b = registry.register(2);
        let _c = registry.register(3);

        let mut seen = Vec::new();
        registry.run_active(|item| {
            seen.push(*item);
            true
        });

        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn dropping_registration_removes_entry() {
        let mut registry = Registry::new();
        let a = registry.register("a");
        let _b = registry.register("b");

        drop(a);

        let mut seen = Vec::new();
        registry.run_active(|item| {
            seen.push(*item);
            true
        });
        assert_eq!(seen, vec!["b"]);
        assert_eq!(registry.active_len(), 1);
    }

    #[test]
    fn returning_false_retires_item() {
        let mut registry = Registry::new();
        let handle = registry.register(0u32);

        registry.run_active(|_| false);

        assert!(!handle.is_active());
        assert_eq!(registry.active_len(), 0);
    }

    #[test]
    fn cancel_during_pass_skips_later_entry() {
        let mut registry: Registry<Box<dyn FnMut() -> bool>> = Registry::new();
        let victim: Rc<RefCell<Option<Registration>>> = Rc::new(RefCell::new(None));
        let ran_victim = Rc::new(Cell::new(false));

        let victim_slot = Rc::clone(&victim);
        let _killer = registry.register(Box::new(move || {
            if let Some(handle) = victim_slot.borrow().as_ref() {
                handle.cancel();
            }
            true
        }));

        let ran = Rc::clone(&ran_victim);
        *victim.borrow_mut() = Some(registry.register(Box::new(move || {
            ran.set(true);
            true
        })));

        registry.run_active(|f| f());

        assert!(!ran_victim.get());
        assert_eq!(registry.active_len(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut registry = Registry::new();
        let handle = registry.register(());
        handle.cancel();
        handle.cancel();
        assert!(!handle.is_active());
        registry.prune();
        assert_eq!(registry.active_len(), 0);
    }
}
