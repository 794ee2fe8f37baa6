//! Last-write-wins conflict resolution.
//!
//! The entire conflict policy: whichever device wrote a record most
//! recently wins wholesale. There is no field-level merge and no vector
//! clock; ledger line items have no meaningful partial merge.

use crate::record::Record;

/// Outcome of resolving one incoming write against stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The incoming record replaces (or creates) the stored one.
    Apply,
    /// The stored record wins; the incoming write is a silent no-op.
    Reject,
}

/// Decides whether `incoming` may overwrite `existing`.
///
/// Rules, in order:
/// - no stored record: `Apply` (treated as an ADD);
/// - both stamped: `Apply` iff `incoming.updated_at` is strictly later.
///   Equal stamps favor the stored record, which makes a replayed push
///   an idempotent no-op;
/// - stored record has no stamp (rows predating LWW stamping): `Apply`;
/// - incoming record has no stamp: `Reject`. Ingestion stamps incoming
///   records before resolving, so this arm only guards direct callers.
pub fn resolve(incoming: &Record, existing: Option<&Record>) -> Decision {
    let Some(existing) = existing else {
        return Decision::Apply;
    };
    match (incoming.updated_at, existing.updated_at) {
        (Some(inc), Some(cur)) if inc > cur => Decision::Apply,
        (Some(_), Some(_)) => Decision::Reject,
        (Some(_), None) => Decision::Apply,
        (None, _) => Decision::Reject,
    }
}
