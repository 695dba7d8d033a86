//! WCAG relative luminance with a shared memo table.
//!
//! Luminance depends only on the `(r, g, b)` triple, so results are memoized
//! for the life of the process. The table is injected as a
//! [`LuminanceCache`] and shared across concurrent analyses behind an `Arc`.
//! Entries are write-once and never evicted; two racing writers compute the
//! same value, so a lost update is harmless.

use dashmap::DashMap;
use std::sync::Arc;

/// Cache key: an opaque sRGB triple.
pub type RgbKey = (u8, u8, u8);

/// Storage for memoized luminance values.
pub trait LuminanceCache: Send + Sync {
    /// Returns the stored luminance for `key`, if any.
    fn get(&self, key: RgbKey) -> Option<f64>;

    /// Stores `value` for `key`. An existing entry is kept.
    fn put(&self, key: RgbKey, value: f64);
}

/// Lock-free [`LuminanceCache`] over a `DashMap`.
#[derive(Debug, Default)]
pub struct ConcurrentLuminanceCache {
    entries: DashMap<RgbKey, f64>,
}

impl ConcurrentLuminanceCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache, ready to share.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of memoized triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `key` has been memoized.
    #[must_use]
    pub fn contains(&self, key: RgbKey) -> bool {
        self.entries.contains_key(&key)
    }
}

impl LuminanceCache for ConcurrentLuminanceCache {
    fn get(&self, key: RgbKey) -> Option<f64> {
        self.entries.get(&key).map(|entry| *entry)
    }

    fn put(&self, key: RgbKey, value: f64) {
        self.entries.entry(key).or_insert(value);
    }
}

/// Linearizes one sRGB channel.
fn linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an opaque sRGB triple, in `[0, 1]`.
#[must_use]
pub fn relative_luminance(red: u8, green: u8, blue: u8) -> f64 {
    0.2126 * linear(red) + 0.7152 * linear(green) + 0.0722 * linear(blue)
}

/// [`relative_luminance`] through `cache`.
pub fn cached_luminance(cache: &dyn LuminanceCache, key: RgbKey) -> f64 {
    if let Some(value) = cache.get(key) {
        return value;
    }
    let value = relative_luminance(key.0, key.1, key.2);
    cache.put(key, value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts writes so tests can tell a hit from a recomputation.
    #[derive(Default)]
    struct CountingCache {
        inner: ConcurrentLuminanceCache,
        puts: AtomicUsize,
    }

    impl LuminanceCache for CountingCache {
        fn get(&self, key: RgbKey) -> Option<f64> {
            self.inner.get(key)
        }

        fn put(&self, key: RgbKey, value: f64) {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put(key, value);
        }
    }

    #[test]
    fn black_and_white_bound_the_range() {
        assert_eq!(relative_luminance(0, 0, 0), 0.0);
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn channel_weights_follow_wcag() {
        assert!((relative_luminance(255, 0, 0) - 0.2126).abs() < 1e-12);
        assert!((relative_luminance(0, 255, 0) - 0.7152).abs() < 1e-12);
        assert!((relative_luminance(0, 0, 255) - 0.0722).abs() < 1e-12);
    }

    #[test]
    fn low_channels_use_the_linear_segment() {
        // 10 / 255 = 0.0392 <= 0.03928
        let expected = 0.2126 * (10.0 / 255.0) / 12.92;
        assert!((relative_luminance(10, 0, 0) - expected).abs() < 1e-15);
    }

    #[test]
    fn second_lookup_is_served_from_cache() {
        let cache = CountingCache::default();

        let first = cached_luminance(&cache, (12, 34, 56));
        let second = cached_luminance(&cache, (12, 34, 56));

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(cache.puts.load(Ordering::SeqCst), 1);
        assert!(cache.inner.contains((12, 34, 56)));
    }

    #[test]
    fn put_is_write_once() {
        let cache = ConcurrentLuminanceCache::new();
        cache.put((1, 2, 3), 0.5);
        cache.put((1, 2, 3), 0.9);
        assert_eq!(cache.get((1, 2, 3)), Some(0.5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_writers_agree() {
        let cache = ConcurrentLuminanceCache::shared();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for v in 0..=255u8 {
                        cached_luminance(cache.as_ref(), (v, v, v));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(cache.len(), 256);
        for v in 0..=255u8 {
            assert_eq!(cache.get((v, v, v)), Some(relative_luminance(v, v, v)));
        }
    }
}
