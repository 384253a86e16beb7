//! Listing query engine: status refresh, filtering, ordering and paging
//! over a snapshot of a store.

pub mod filter;
pub mod paginate;
pub mod status;

use chrono::{DateTime, Utc};

use crate::store::Record;

pub use filter::{FieldFilter, Query, contains_ignore_case, filter};
pub use paginate::{Page, paginate};
pub use status::derive_status;

/// A record that can be searched and listed.
pub trait Listable: Record {
    /// Fields matched case-insensitively by free text. Missing optional
    /// fields should be passed as `""`.
    fn search_fields(&self) -> Vec<&str>;

    /// Fields matched by plain substring, no case folding (phone numbers,
    /// addresses).
    fn raw_search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Recompute anything derived from time. Most records have nothing.
    fn refresh_status(&mut self, _now: DateTime<Utc>) {}
}

/// The single read path: refresh derived status, filter, order by
/// `created_at` newest first (stable, so ties keep insertion order), then page.
///
/// `total` is the filtered count before paging.
pub fn list<R, F>(
    mut snapshot: Vec<R>,
    query: &Query<F>,
    page: i64,
    limit: i64,
    now: DateTime<Utc>,
) -> Page<R>
where
    R: Listable,
    F: FieldFilter<R>,
{
    for record in &mut snapshot {
        record.refresh_status(now);
    }

    let mut matched = filter(snapshot, query);
    matched.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    paginate(matched, page, limit)
}
