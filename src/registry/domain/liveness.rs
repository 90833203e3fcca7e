//! Expiration policy and liveness cutoffs.

use super::RegistryDomainError;
use chrono::{DateTime, TimeDelta, Utc};

/// Time-based expiration rule applied to every registered service.
///
/// A service whose `last_seen` is at least `threshold` old is dead. There is
/// no grace counter: missing a single expiration window is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    threshold: TimeDelta,
}

impl ExpirationPolicy {
    /// Default expiration threshold in seconds.
    pub const DEFAULT_EXPIRATION_SECS: u64 = 120;

    /// Recommended heartbeat cadence in seconds for registrants.
    pub const DEFAULT_HEARTBEAT_SECS: u64 = 20;

    /// Creates a policy expiring services after `secs` seconds of silence.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidExpiration`] when `secs` is zero
    /// or does not fit a [`TimeDelta`].
    pub fn from_secs(secs: u64) -> Result<Self, RegistryDomainError> {
        let threshold = i64::try_from(secs)
            .ok()
            .filter(|value| *value > 0)
            .and_then(TimeDelta::try_seconds)
            .ok_or(RegistryDomainError::InvalidExpiration(secs))?;
        Ok(Self { threshold })
    }

    /// Returns the expiration threshold.
    #[must_use]
    pub const fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    /// Returns the cutoff that separates live from dead services at `now`.
    #[must_use]
    pub fn cutoff_at(&self, now: DateTime<Utc>) -> LivenessCutoff {
        LivenessCutoff(
            now.checked_sub_signed(self.threshold)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }

    /// Returns whether a service last seen at `last_seen` is dead at `now`.
    #[must_use]
    pub fn is_expired(&self, last_seen: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        !self.cutoff_at(now).admits(last_seen)
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self {
            threshold: TimeDelta::seconds(Self::DEFAULT_EXPIRATION_SECS.cast_signed()),
        }
    }
}

/// The oldest `last_seen` a live service may have, exclusive.
///
/// Computed once per operation so that every record touched by that
/// operation is judged against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LivenessCutoff(DateTime<Utc>);

impl LivenessCutoff {
    /// Creates a cutoff at an explicit instant.
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Returns the cutoff instant.
    #[must_use]
    pub const fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns whether a service last seen at `last_seen` is still live.
    #[must_use]
    pub fn admits(self, last_seen: DateTime<Utc>) -> bool {
        last_seen > self.0
    }
}
