//! A deduplicating cache for immutable values.
//!
//! On first presentation of a value it is stored; every subsequent equal
//! value returns the same `Arc`. Used for locale identifiers and for sorted
//! tuples of them, so that two `LocaleIds` sets with the same effective locale
//! set compare equal by pointer as well as by value, and so we don't carry
//! thousands of duplicate `Vec<String>` locale lists around in the derived
//! tables. `Arc`/`Mutex` rather than `Rc`/`RefCell` so the tables built on
//! top of this stay `Send + Sync`.
//!
//! A pure formatter/parser has no need to deduplicate strings like this;
//! the design echoes a Python `_InternTable` this crate's corpus model
//! descends from, expressed with `Arc` handles instead of dict identity.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// A locale identifier, interned so that repeated locale names across the
/// corpus share one allocation.
pub type LocaleId = Arc<str>;

/// A sorted, deduplicated set of locale identifiers. An empty slice means
/// "matches any locale".
pub type LocaleIds = Arc<[LocaleId]>;

#[derive(Default)]
pub struct Interner<T: ?Sized> {
    table: Mutex<HashMap<Arc<T>, Arc<T>>>,
}

impl<T: Eq + Hash + ?Sized> Interner<T> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }

    /// Return the canonical `Arc` for a value equal to `v`, storing `v` as
    /// the canonical instance the first time it is seen.
    pub fn intern(&self, v: Arc<T>) -> Arc<T> {
        let mut table = self.table.lock().expect("interner mutex poisoned");
        if let Some(existing) = table.get(&v) {
            return Arc::clone(existing);
        }
        table.insert(Arc::clone(&v), Arc::clone(&v));
        v
    }

    pub fn len(&self) -> usize {
        self.table.lock().expect("interner mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interns locale identifier strings and sorted locale-identifier tuples.
///
/// Kept as two separate tables (string identity is cheaper to share than
/// the tuples built from them) the way the original keeps `uniqlocales` and
/// `uniqlocalesets` distinct.
pub struct LocaleInterner {
    locales: Interner<str>,
    sets: Interner<[LocaleId]>,
}

impl LocaleInterner {
    pub fn new() -> Self {
        Self {
            locales: Interner::new(),
            sets: Interner::new(),
        }
    }

    pub fn locale(&self, name: &str) -> LocaleId {
        self.locales.intern(Arc::from(name))
    }

    /// Intern an arbitrary collection of locale names as a sorted,
    /// deduplicated `LocaleIds`.
    pub fn locale_set<I, S>(&self, names: I) -> LocaleIds
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: Vec<LocaleId> = names.into_iter().map(|s| self.locale(s.as_ref())).collect();
        ids.sort();
        ids.dedup();
        self.sets.intern(Arc::from(ids))
    }

    /// Intern the union of several already-interned locale sets.
    pub fn union(&self, sets: impl IntoIterator<Item = LocaleIds>) -> LocaleIds {
        let mut ids: Vec<LocaleId> = sets.into_iter().flat_map(|s| s.iter().cloned()).collect();
        ids.sort();
        ids.dedup();
        self.sets.intern(Arc::from(ids))
    }

    /// The empty (universal) locale set.
    pub fn universal(&self) -> LocaleIds {
        self.sets.intern(Arc::from(Vec::<LocaleId>::new()))
    }
}

impl Default for LocaleInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn equal_values_share_storage() {
        let interner: Interner<str> = Interner::new();
        let a = interner.intern(Arc::from("en_US"));
        let b = interner.intern(Arc::from("en_US"));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn locale_sets_are_sorted_and_deduped() {
        let interner = LocaleInterner::new();
        let set = interner.locale_set(["en_US", "ja_JP", "en_US"]);
        let names: Vec<&str> = set.iter().map(|s| s.as_ref()).collect();
        assert_eq!(names, vec!["en_US", "ja_JP"]);
    }

    #[test]
    fn same_members_intern_to_the_same_set() {
        let interner = LocaleInterner::new();
        let a = interner.locale_set(["ja_JP", "en_US"]);
        let b = interner.locale_set(["en_US", "ja_JP"]);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn universal_is_empty() {
        let interner = LocaleInterner::new();
        assert!(interner.universal().is_empty());
    }
}
