//! In-process cooldown tracking.
//!
//! Cooldowns are last-used timestamps in a mutex-guarded map, checked on
//! demand rather than scheduled. Callers pass the current [`Instant`]
//! explicitly so tests can steer the clock.
//!
//! Coinflip cooldowns are keyed by user id alone (global across servers);
//! job-application cooldowns are keyed by `(server_id, user_id)`.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Seconds a user must wait between coinflips.
pub const FLIP_WINDOW: Duration = Duration::from_secs(10);

/// Hours a user must wait between job applications in the same server.
pub const APPLICATION_WINDOW: Duration = Duration::from_secs(24 * 3600);

/// A single cooldown map with a fixed window.
#[derive(Debug)]
pub struct CooldownMap<K> {
    window: Duration,
    last_used: Mutex<HashMap<K, Instant>>,
}

impl<K: Eq + Hash + Clone> CooldownMap<K> {
    /// Creates an empty map with the given window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_used: Mutex::new(HashMap::new()),
        }
    }

    /// Time left before `key` may act again, or `None` if it may act now.
    ///
    /// Checking does not consume the cooldown; call [`Self::touch`] once the
    /// action actually completes.
    pub fn remaining(&self, key: &K, now: Instant) -> Option<Duration> {
        let guard = self.last_used.lock().unwrap_or_else(|e| e.into_inner());
        let last = guard.get(key)?;
        let elapsed = now.saturating_duration_since(*last);
        (elapsed < self.window).then(|| self.window - elapsed)
    }

    /// Records that `key` acted at `now`, starting a fresh window.
    pub fn touch(&self, key: K, now: Instant) {
        let mut guard = self.last_used.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(key, now);
    }
}

/// All cooldown state owned by the bot instance.
#[derive(Debug)]
pub struct Cooldowns {
    /// Coinflip cooldowns, keyed by user id
    pub flips: CooldownMap<String>,
    /// Job-application cooldowns, keyed by (server id, user id)
    pub applications: CooldownMap<(String, String)>,
}

impl Cooldowns {
    /// Creates cooldown state with the standard windows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flips: CooldownMap::new(FLIP_WINDOW),
            applications: CooldownMap::new(APPLICATION_WINDOW),
        }
    }
}

impl Default for Cooldowns {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_key_has_no_cooldown() {
        let map: CooldownMap<String> = CooldownMap::new(Duration::from_secs(10));
        assert!(map.remaining(&"u1".to_string(), Instant::now()).is_none());
    }

    #[test]
    fn test_touch_starts_window() {
        let map: CooldownMap<String> = CooldownMap::new(Duration::from_secs(10));
        let start = Instant::now();
        map.touch("u1".to_string(), start);

        let remaining = map
            .remaining(&"u1".to_string(), start + Duration::from_secs(3))
            .expect("should still be cooling down");
        assert_eq!(remaining, Duration::from_secs(7));

        // Window fully elapsed
        assert!(
            map.remaining(&"u1".to_string(), start + Duration::from_secs(10))
                .is_none()
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let map: CooldownMap<String> = CooldownMap::new(Duration::from_secs(10));
        let start = Instant::now();
        map.touch("u1".to_string(), start);
        assert!(map.remaining(&"u2".to_string(), start).is_none());
    }

    #[test]
    fn test_flip_and_application_maps_are_independent() {
        let cooldowns = Cooldowns::new();
        let start = Instant::now();
        cooldowns.flips.touch("u1".to_string(), start);
        assert!(
            cooldowns
                .applications
                .remaining(&("s1".to_string(), "u1".to_string()), start)
                .is_none()
        );
    }
}
