//! Default-value policies applied while a candidate is deserialized.
//!
//! Only *absent* fields are defaulted; a present-but-invalid value always
//! fails validation. Static fills (`tier`, `ticketImport`, empty lists and
//! maps) use `Default` impls next to their types; generated identifiers
//! live here so the policy has one home.

use uuid::Uuid;

/// Fresh v4 identifier for a record that arrived without one.
pub(crate) fn generated_id() -> Uuid {
    Uuid::new_v4()
}
