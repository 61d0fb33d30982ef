//! Process-lifetime memoization of one dataset load.
//!
//! ```text
//!   Uninitialized ──get()──▶ Loading ──ok──▶ Ready(Arc<Dataset>)
//!         ▲                     │
//!         └──────── err/panic ──┘          invalidate(): any ──▶ Uninitialized
//! ```

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use super::loader;
use super::model::Dataset;
use super::source::Source;
use crate::error::DatasetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Loading,
    Ready,
}

enum Slot {
    Uninitialized,
    Loading,
    Ready(Arc<Dataset>),
}

/// Explicit handle owning a source, its column list, and the cached result.
///
/// `get()` fetches and parses at most once per successful load; concurrent
/// callers that arrive while a load is running wait for it.
pub struct DatasetCache {
    source: Box<dyn Source>,
    columns: Vec<String>,
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl DatasetCache {
    pub fn new<S: AsRef<str>>(source: Box<dyn Source>, columns: &[S]) -> Self {
        Self {
            source,
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            slot: Mutex::new(Slot::Uninitialized),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> CacheState {
        match &*self.lock() {
            Slot::Uninitialized => CacheState::Uninitialized,
            Slot::Loading => CacheState::Loading,
            Slot::Ready(_) => CacheState::Ready,
        }
    }

    /// Return the cached dataset, loading it first if needed.
    pub fn get(&self) -> Result<Arc<Dataset>, DatasetError> {
        {
            let mut slot = self.lock();
            loop {
                let loading = match &*slot {
                    Slot::Ready(ds) => return Ok(Arc::clone(ds)),
                    Slot::Loading => true,
                    Slot::Uninitialized => false,
                };
                if !loading {
                    *slot = Slot::Loading;
                    break;
                }
                slot = self
                    .ready
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
        debug!("cache miss for {}, loading", self.source.locator());

        let mut guard = LoadingGuard {
            cache: self,
            armed: true,
        };
        let result = loader::load(self.source.as_ref(), self.columns.as_slice());

        let mut slot = self.lock();
        guard.armed = false;
        let out = match result {
            Ok(ds) => {
                let ds = Arc::new(ds);
                *slot = Slot::Ready(Arc::clone(&ds));
                Ok(ds)
            }
            Err(e) => {
                warn!("loading {} failed: {e}", self.source.locator());
                *slot = Slot::Uninitialized;
                Err(e)
            }
        };
        drop(slot);
        self.ready.notify_all();
        out
    }

    /// Forget the cached dataset; the next `get()` loads again.
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        if let Slot::Ready(_) = &*slot {
            debug!("invalidating cached dataset for {}", self.source.locator());
            *slot = Slot::Uninitialized;
        }
    }
}

/// Puts the slot back to `Uninitialized` if loading unwinds.
struct LoadingGuard<'a> {
    cache: &'a DatasetCache,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.cache.lock() = Slot::Uninitialized;
            self.cache.ready.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ADULT_COLUMNS;
    use crate::data::source::MemorySource;
    use crate::error::ErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    const ROW: &str = "39, State-gov, 77516, Bachelors, 13, Never-married, Adm-clerical, Not-in-family, White, Male, 2174, 0, 40, United-States, <=50K\n";

    /// Shares its counter with the test after being boxed into the cache.
    struct Probe {
        fetches: Arc<AtomicUsize>,
        body: &'static str,
        delay: Duration,
    }

    impl Source for Probe {
        fn locator(&self) -> &str {
            "probe"
        }

        fn fetch(&self) -> Result<Vec<u8>, DatasetError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            if self.body.is_empty() {
                return Err(DatasetError::unavailable("probe", "offline"));
            }
            Ok(self.body.as_bytes().to_vec())
        }
    }

    fn probe(body: &'static str, delay_ms: u64) -> (Box<Probe>, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let p = Probe {
            fetches: Arc::clone(&fetches),
            body,
            delay: Duration::from_millis(delay_ms),
        };
        (Box::new(p), fetches)
    }

    #[test]
    fn second_get_hits_cache() {
        let cache = DatasetCache::new(Box::new(MemorySource::new("mem", ROW)), &ADULT_COLUMNS);
        assert_eq!(cache.state(), CacheState::Uninitialized);
        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.state(), CacheState::Ready);
    }

    #[test]
    fn invalidate_forces_reload() {
        let (src, fetches) = probe(ROW, 0);
        let cache = DatasetCache::new(src, &ADULT_COLUMNS);
        let a = cache.get().unwrap();
        cache.invalidate();
        assert_eq!(cache.state(), CacheState::Uninitialized);
        let b = cache.get().unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert_eq!(*a, *b);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let (src, fetches) = probe("", 0);
        let cache = DatasetCache::new(src, &ADULT_COLUMNS);
        let err = cache.get().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert_eq!(cache.state(), CacheState::Uninitialized);
        assert!(cache.get().is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_callers_share_one_fetch() {
        let (src, fetches) = probe(ROW, 50);
        let cache = Arc::new(DatasetCache::new(src, &ADULT_COLUMNS));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get().unwrap())
            })
            .collect();
        let results: Vec<Arc<Dataset>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        for ds in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], ds));
        }
    }
}
