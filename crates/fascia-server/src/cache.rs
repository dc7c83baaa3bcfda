//! Stale-while-revalidate page cache.
//!
//! Generated pages may be served for `ttl_seconds` without question. After
//! that a hit still serves the stale copy immediately; the first such hit
//! claims the refresh so exactly one regeneration runs while every other
//! request keeps being served stale. A miss either triggers on-demand
//! generation (serving a placeholder meanwhile) or is a 404, per policy.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use fascia_static::RenderedPage;

/// How the serving layer may cache and regenerate pages.
///
/// This is the explicit form of the original framework's `revalidate` +
/// `fallback` return values.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Maximum age before a cached page must attempt a refresh
    pub ttl_seconds: u64,

    /// Whether paths outside the enumerated set may be generated on demand
    pub allow_on_demand_generation: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl_seconds: 5,
            allow_on_demand_generation: true,
        }
    }
}

/// One cached page.
#[derive(Debug)]
struct CacheEntry {
    rendered: RenderedPage,
    rendered_at: Instant,
    revalidating: bool,
}

/// Outcome of a cache lookup.
#[derive(Debug)]
pub enum CacheDecision {
    /// Entry within its TTL; serve as-is
    Fresh(RenderedPage),

    /// Entry past its TTL; serve it anyway. `claimed_refresh` is true for
    /// exactly one caller, which must regenerate (or release the claim).
    Stale {
        rendered: RenderedPage,
        claimed_refresh: bool,
    },

    /// Unknown path; policy allows generating it on demand
    MissGenerate,

    /// Unknown path; policy forbids on-demand generation
    MissNotFound,
}

/// In-process cache of rendered pages, keyed by URL path.
pub struct PageCache {
    policy: CachePolicy,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl PageCache {
    /// Create an empty cache under the given policy.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The policy this cache runs under.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Look up a path, claiming the refresh when the entry has gone stale.
    pub async fn lookup(&self, path: &str) -> CacheDecision {
        let ttl = Duration::from_secs(self.policy.ttl_seconds);

        let mut entries = self.entries.write().await;
        match entries.get_mut(path) {
            Some(entry) => {
                if entry.rendered_at.elapsed() <= ttl {
                    CacheDecision::Fresh(entry.rendered.clone())
                } else {
                    // First stale hit claims the refresh; later hits keep
                    // serving stale without piling on regenerations.
                    let claimed = !entry.revalidating;
                    entry.revalidating = true;
                    CacheDecision::Stale {
                        rendered: entry.rendered.clone(),
                        claimed_refresh: claimed,
                    }
                }
            }
            None => {
                if self.policy.allow_on_demand_generation {
                    CacheDecision::MissGenerate
                } else {
                    CacheDecision::MissNotFound
                }
            }
        }
    }

    /// Store a freshly rendered page, clearing any refresh claim.
    pub async fn insert(&self, path: &str, rendered: RenderedPage) {
        let mut entries = self.entries.write().await;
        entries.insert(
            path.to_string(),
            CacheEntry {
                rendered,
                rendered_at: Instant::now(),
                revalidating: false,
            },
        );
    }

    /// Release a refresh claim without replacing the entry.
    ///
    /// Called when regeneration fails so the next stale hit can try again;
    /// the stale copy stays serveable.
    pub async fn release_refresh(&self, path: &str) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(path) {
            entry.revalidating = false;
        }
    }

    /// Number of cached paths.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no pages.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
