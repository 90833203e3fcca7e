//! Behaviour shared by agent and tool records.

use super::{LivenessCutoff, ServiceId, ServiceKind, ServiceProfile};
use chrono::{DateTime, Utc};
use std::fmt;

/// A registered service whose liveness is tracked by `last_seen`.
pub trait ServiceRecord: fmt::Debug + Clone + Send + Sync + 'static {
    /// Kind of service this record describes.
    const KIND: ServiceKind;

    /// Returns the record identifier.
    fn service_id(&self) -> ServiceId;

    /// Returns the shared descriptive metadata.
    fn service_profile(&self) -> &ServiceProfile;

    /// Returns the last time the service registered or sent a heartbeat.
    fn seen_at(&self) -> DateTime<Utc>;

    /// Moves `last_seen` forward to `instant`.
    ///
    /// Earlier instants are ignored so `last_seen` never decreases.
    fn touch(&mut self, instant: DateTime<Utc>);

    /// Returns whether the record is live with respect to `cutoff`.
    fn is_live(&self, cutoff: LivenessCutoff) -> bool {
        cutoff.admits(self.seen_at())
    }
}
