use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};

/// Typed container for one kind of asset.
///
/// Assets can optionally be registered under a name so that shared resources
/// (for example a material reused by several parts) are created only once.
pub struct AssetStorage<H: Key, T> {
    map: SlotMap<H, T>,
    lookup: FxHashMap<String, H>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, asset: impl Into<T>) -> H {
        self.map.insert(asset.into())
    }

    /// Adds a named asset, or returns the handle already registered under
    /// `name` without touching the stored value.
    pub fn add_named(&mut self, name: impl Into<String>, asset: impl Into<T>) -> H {
        let name = name.into();
        if let Some(&handle) = self.lookup.get(&name)
            && self.map.contains_key(handle)
        {
            return handle;
        }
        let handle = self.map.insert(asset.into());
        self.lookup.insert(name, handle);
        handle
    }

    #[must_use]
    pub fn get(&self, handle: H) -> Option<&T> {
        self.map.get(handle)
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.map.get_mut(handle)
    }

    #[must_use]
    pub fn handle_by_name(&self, name: &str) -> Option<H> {
        self.lookup
            .get(name)
            .copied()
            .filter(|h| self.map.contains_key(*h))
    }

    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.lookup.retain(|_, h| *h != handle);
        self.map.remove(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: H) -> bool {
        self.map.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.map.iter()
    }
}
