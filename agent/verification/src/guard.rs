//! Admission control against abusive repeated verification requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Outcome of an admission check. Rejection is a policy decision, not an
/// error; the check itself is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The attempt may proceed; `attempt` is 1-based within the current window.
    Allowed { attempt: u32 },
    /// The identifier is locked out for the remaining duration.
    Rejected { retry_after: Duration },
}

#[derive(Debug)]
struct AttemptRecord {
    count: u32,
    window_start: Instant,
    locked_until: Option<Instant>,
}

/// Per-identifier attempt counter with a maximum threshold and a cool-down
/// window (fixed bucket anchored at the first attempt of the window).
///
/// The map is guarded by a single mutex held only for the duration of one
/// check, which keeps per-identifier updates atomic without holding a lock
/// across any await point.
pub struct AttemptGuard {
    max_attempts: u32,
    cooldown: Duration,
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl AttemptGuard {
    pub fn new(max_attempts: u32, cooldown: Duration) -> Self {
        Self {
            max_attempts,
            cooldown,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up (or creates) the attempt record for `identifier`, records the
    /// attempt and decides whether it may proceed.
    pub fn check_and_record(&self, identifier: &str) -> Admission {
        self.check_and_record_at(identifier, Instant::now())
    }

    fn check_and_record_at(&self, identifier: &str, now: Instant) -> Admission {
        let mut records = self.records.lock().expect("attempt guard mutex poisoned");
        let record = records
            .entry(identifier.to_string())
            .or_insert_with(|| AttemptRecord {
                count: 0,
                window_start: now,
                locked_until: None,
            });

        if let Some(until) = record.locked_until {
            if now < until {
                return Admission::Rejected {
                    retry_after: until - now,
                };
            }
            // Lock expired: the next attempt starts a fresh window.
            record.count = 0;
            record.window_start = now;
            record.locked_until = None;
        }

        if now.duration_since(record.window_start) >= self.cooldown {
            record.count = 0;
            record.window_start = now;
        }

        record.count += 1;
        if record.count > self.max_attempts {
            record.locked_until = Some(now + self.cooldown);
            return Admission::Rejected {
                retry_after: self.cooldown,
            };
        }

        Admission::Allowed {
            attempt: record.count,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(600);

    fn guard() -> AttemptGuard {
        AttemptGuard::new(5, COOLDOWN)
    }

    #[test]
    fn allows_up_to_max_attempts() {
        let guard = guard();
        let t0 = Instant::now();
        for expected in 1..=5 {
            assert_eq!(
                guard.check_and_record_at("+998998888931", t0),
                Admission::Allowed { attempt: expected }
            );
        }
    }

    #[test]
    fn rejects_attempt_after_max() {
        let guard = guard();
        let t0 = Instant::now();
        for _ in 0..5 {
            guard.check_and_record_at("id", t0);
        }
        assert_eq!(
            guard.check_and_record_at("id", t0),
            Admission::Rejected {
                retry_after: COOLDOWN
            }
        );
    }

    #[test]
    fn rejection_reports_remaining_lock_time() {
        let guard = guard();
        let t0 = Instant::now();
        for _ in 0..6 {
            guard.check_and_record_at("id", t0);
        }
        let later = t0 + Duration::from_secs(200);
        assert_eq!(
            guard.check_and_record_at("id", later),
            Admission::Rejected {
                retry_after: Duration::from_secs(400)
            }
        );
    }

    #[test]
    fn lock_expires_after_cooldown() {
        let guard = guard();
        let t0 = Instant::now();
        for _ in 0..6 {
            guard.check_and_record_at("id", t0);
        }
        let after_lock = t0 + COOLDOWN + Duration::from_secs(1);
        assert_eq!(
            guard.check_and_record_at("id", after_lock),
            Admission::Allowed { attempt: 1 }
        );
    }

    #[test]
    fn elapsed_window_resets_counter() {
        let guard = guard();
        let t0 = Instant::now();
        for _ in 0..4 {
            guard.check_and_record_at("id", t0);
        }
        let next_window = t0 + COOLDOWN;
        assert_eq!(
            guard.check_and_record_at("id", next_window),
            Admission::Allowed { attempt: 1 }
        );
    }

    #[test]
    fn identifiers_are_independent() {
        let guard = guard();
        let t0 = Instant::now();
        for _ in 0..6 {
            guard.check_and_record_at("first", t0);
        }
        assert_eq!(
            guard.check_and_record_at("second", t0),
            Admission::Allowed { attempt: 1 }
        );
    }
}
