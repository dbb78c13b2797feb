#![forbid(unsafe_code)]

//! Process-wide cache of synthesized templates.
//!
//! Templates are synthesized lazily on the first render of a name and then
//! served by that name. Reads never lock: the table lives behind an
//! [`ArcSwap`] and writers publish a new table with `rcu`, keeping the
//! first entry stored under a name.
//!
//! Each entry remembers a fingerprint of the layout it was built from. A
//! later request for the same name with a different layout still gets the
//! cached template, but a stale-template warning is logged and
//! [`TemplateCache::is_stale`] reports the mismatch so the caller can
//! [`invalidate`](TemplateCache::invalidate) it.
//!
//! # Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | One template per name | `rcu` keeps an existing entry, the losing builder's template is dropped |
//! | Readers never block | lookups go through `ArcSwap::load` |
//! | Cached entries are immutable | entries are `Arc<Template>` |
//! | `Synthesizing` ends with the build | a drop guard releases the name, even when `build` panics |

use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use ahash::{AHashMap, RandomState};
use arc_swap::ArcSwap;
use formwork_core::Template;

/// Lifecycle of a template name in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateState {
    Absent,
    /// A builder is producing the template right now.
    Synthesizing,
    Cached,
}

#[derive(Debug, Clone)]
struct Entry {
    template: Arc<Template>,
    fingerprint: u64,
}

/// Name-keyed template cache. See the module docs.
pub struct TemplateCache {
    entries: ArcSwap<AHashMap<String, Entry>>,
    /// Names being synthesized, with the number of builders on each.
    building: Mutex<AHashMap<String, usize>>,
    hasher: RandomState,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self {
            entries: ArcSwap::from_pointee(AHashMap::new()),
            building: Mutex::new(AHashMap::new()),
            hasher: RandomState::new(),
        }
    }
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("cached", &self.len())
            .field("building", &self.building_set().len())
            .finish()
    }
}

static GLOBAL: OnceLock<TemplateCache> = OnceLock::new();

impl TemplateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every list and tree form in the process.
    pub fn global() -> &'static TemplateCache {
        GLOBAL.get_or_init(TemplateCache::new)
    }

    /// Fingerprint of a layout, comparable only within this cache.
    #[must_use]
    pub fn fingerprint<T: Hash + ?Sized>(&self, layout: &T) -> u64 {
        BuildHasher::hash_one(&self.hasher, layout)
    }

    #[must_use]
    pub fn state(&self, name: &str) -> TemplateState {
        if self.entries.load().contains_key(name) {
            TemplateState::Cached
        } else if self.building_set().contains_key(name) {
            TemplateState::Synthesizing
        } else {
            TemplateState::Absent
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Template>> {
        self.entries.load().get(name).map(|e| Arc::clone(&e.template))
    }

    /// Whether `name` is cached from a layout other than `fingerprint`.
    #[must_use]
    pub fn is_stale(&self, name: &str, fingerprint: u64) -> bool {
        self.entries
            .load()
            .get(name)
            .is_some_and(|e| e.fingerprint != fingerprint)
    }

    /// Return the template cached under `name`, synthesizing it with
    /// `build` when absent.
    ///
    /// When two threads race on an absent name both may build, but only the
    /// first to publish is kept and both receive that template.
    pub fn get_or_build<F>(&self, name: &str, fingerprint: u64, build: F) -> Arc<Template>
    where
        F: FnOnce() -> String,
    {
        if let Some(entry) = self.entries.load().get(name) {
            if entry.fingerprint != fingerprint {
                tracing::warn!(
                    template = name,
                    "serving cached template built from a different layout"
                );
            }
            return Arc::clone(&entry.template);
        }

        let _building = BuildingGuard::enter(self, name);
        let _span = tracing::debug_span!("synthesize_template", template = name).entered();
        let built = Entry {
            template: Arc::new(Template::new(name, build())),
            fingerprint,
        };
        tracing::debug!(template = name, bytes = built.template.source().len(), "template synthesized");

        let previous = self.entries.rcu(|current| {
            let mut next = AHashMap::clone(current);
            next.entry(name.to_owned()).or_insert_with(|| built.clone());
            next
        });

        match previous.get(name) {
            Some(winner) => Arc::clone(&winner.template),
            None => built.template,
        }
    }

    /// Drop the template cached under `name`. Returns whether one was cached.
    pub fn invalidate(&self, name: &str) -> bool {
        let previous = self.entries.rcu(|current| {
            let mut next = AHashMap::clone(current);
            next.remove(name);
            next
        });
        let removed = previous.contains_key(name);
        if removed {
            tracing::debug!(template = name, "template invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.store(Arc::new(AHashMap::new()));
        tracing::debug!("template cache cleared");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn building_set(&self) -> std::sync::MutexGuard<'_, AHashMap<String, usize>> {
        self.building.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a name as `Synthesizing` for as long as it lives.
struct BuildingGuard<'a> {
    cache: &'a TemplateCache,
    name: &'a str,
}

impl<'a> BuildingGuard<'a> {
    fn enter(cache: &'a TemplateCache, name: &'a str) -> Self {
        *cache.building_set().entry(name.to_owned()).or_insert(0) += 1;
        Self { cache, name }
    }
}

impl Drop for BuildingGuard<'_> {
    fn drop(&mut self) {
        let mut building = self.cache.building_set();
        if let Some(count) = building.get_mut(self.name) {
            *count -= 1;
            if *count == 0 {
                building.remove(self.name);
            }
        }
    }
}
