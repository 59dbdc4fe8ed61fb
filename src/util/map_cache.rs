use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::NaiveDate;

use crate::{
    data_types::{map::MapView, Meters},
    error::AppResult,
    logvbln,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapKey {
    pub date: NaiveDate,
    pub segment_index: usize,
    pub distance_m: Meters,
}

/// Built maps by (date, segment, distance). Entries live until invalidated.
#[derive(Default)]
pub struct MapCache {
    maps: Mutex<HashMap<MapKey, Arc<MapView>>>,
}

impl MapCache {
    const CC: &str = "MapCache";

    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, key: &MapKey) -> Option<Arc<MapView>> {
        self.maps().get(key).cloned()
    }

    /// Returns the cached map or builds, stores and returns a new one.
    ///
    /// The lock is not held while `build` runs; two concurrent misses on the
    /// same key both build and the first insert wins.
    pub fn get_or_try_insert_with<F>(&self, key: MapKey, build: F) -> AppResult<Arc<MapView>>
    where
        F: FnOnce() -> AppResult<MapView>,
    {
        if let Some(map) = self.get(&key) {
            logvbln!("hit {:?}", key);
            return Ok(map);
        }

        logvbln!("miss {:?}", key);
        let built = Arc::new(build()?);

        Ok(self.maps().entry(key).or_insert(built).clone())
    }

    pub fn invalidate(&self, key: &MapKey) -> bool {
        self.maps().remove(key).is_some()
    }

    pub fn invalidate_date(&self, date: NaiveDate) -> usize {
        let mut maps = self.maps();
        let before = maps.len();
        maps.retain(|key, _| key.date != date);
        before - maps.len()
    }

    pub fn clear(&self) -> usize {
        let mut maps = self.maps();
        let removed = maps.len();
        maps.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.maps().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn maps(&self) -> MutexGuard<'_, HashMap<MapKey, Arc<MapView>>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.maps.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
