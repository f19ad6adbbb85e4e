use fxhash::FxHashMap;

/// Results computed per module, keyed by the name of the module.
pub struct Cache<T> {
    entries: FxHashMap<String, CacheEntry<T>>,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self { entries: FxHashMap::default() }
    }
}

impl<T> Cache<T> {
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Get the value associated with a module regardless of staleness
    pub fn get_even_if_stale(&self, name: &str) -> Option<&T> {
        self.entries.get(name).map(|entry| entry.value())
    }

    /// Get the value associated with a module if it is not stale
    pub fn get_unless_stale(&self, name: &str) -> Option<&T> {
        if self.is_stale(name) { None } else { self.get_even_if_stale(name) }
    }

    pub fn insert(&mut self, name: String, value: T) {
        self.entries.insert(name, CacheEntry::from(value));
    }

    pub fn is_stale(&self, name: &str) -> bool {
        self.entries.get(name).map(|entry| entry.stale).unwrap_or(true)
    }

    pub fn invalidate(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.stale = true;
        }
    }
}

pub struct CacheEntry<T> {
    value: T,
    stale: bool,
}

impl<T> CacheEntry<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> From<T> for CacheEntry<T> {
    fn from(value: T) -> Self {
        Self { value, stale: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidated_entries_are_stale() {
        let mut cache = Cache::default();
        assert!(cache.is_stale("a"));
        cache.insert("a".to_owned(), 1);
        assert_eq!(cache.get_unless_stale("a"), Some(&1));
        cache.invalidate("a");
        assert_eq!(cache.get_unless_stale("a"), None);
        assert_eq!(cache.get_even_if_stale("a"), Some(&1));
        cache.insert("a".to_owned(), 2);
        assert_eq!(cache.get_unless_stale("a"), Some(&2));
    }
}
