use chrono::{DateTime, Utc};

use crate::models::discount::DiscountStatus;

/// Effective status of a discount at `now`.
///
/// Expiry wins over the persisted flag: once `now` passes `expiry` the
/// result is `Expired` no matter what `enabled` says.
pub fn derive_status(expiry: DateTime<Utc>, enabled: bool, now: DateTime<Utc>) -> DiscountStatus {
    if now > expiry {
        DiscountStatus::Expired
    } else if enabled {
        DiscountStatus::Active
    } else {
        DiscountStatus::Inactive
    }
}
