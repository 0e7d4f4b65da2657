//! Shared name table
//!
//! Insertion-only and safe to use from many worker threads at once. Cloning
//! an `Interner` shares the underlying table.

use dashmap::DashSet;
use std::sync::Arc;

use crate::Name;

#[derive(Debug, Clone, Default)]
pub struct Interner {
    names: Arc<DashSet<Arc<str>>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared copy of `name`, inserting it on first use
    pub fn intern(&self, name: &str) -> Name {
        if let Some(existing) = self.names.get(name) {
            return existing.key().clone();
        }
        let fresh: Arc<str> = Arc::from(name);
        if self.names.insert(fresh.clone()) {
            return fresh;
        }
        // Another thread inserted it between the lookup and the insert
        match self.names.get(name) {
            Some(existing) => existing.key().clone(),
            None => fresh,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_same_name_shares_allocation() {
        let interner = Interner::new();
        let a = interner.intern("SampleClass");
        let b = interner.intern("SampleClass");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_concurrent_interning() {
        let interner = Interner::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let interner = interner.clone();
                thread::spawn(move || {
                    for n in 0..50 {
                        interner.intern(&format!("name{}", (n + i) % 50));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(interner.len(), 50);
        assert!(interner.contains("name7"));
    }
}
