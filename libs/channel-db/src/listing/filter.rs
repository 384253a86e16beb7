use chrono::{DateTime, Utc};

use super::Listable;

/// Entity-specific structured predicates (module, status, ...).
pub trait FieldFilter<R> {
    fn matches(&self, record: &R) -> bool;
}

/// No structured filters.
impl<R> FieldFilter<R> for () {
    fn matches(&self, _record: &R) -> bool {
        true
    }
}

/// Everything a listing request can narrow by. All parts are optional and
/// combined with AND.
#[derive(Debug, Clone, Default)]
pub struct Query<F> {
    /// Free text. Blank means no text filter.
    pub text: Option<String>,
    /// Inclusive lower bound on the record's primary timestamp.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the record's primary timestamp.
    pub date_to: Option<DateTime<Utc>>,
    pub fields: F,
}

impl<F: Default> Query<F> {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keeps the records matching every part of `query`. Input order is kept,
/// but ordering is not part of this step's contract.
pub fn filter<R, F>(records: Vec<R>, query: &Query<F>) -> Vec<R>
where
    R: Listable,
    F: FieldFilter<R>,
{
    let text = query.text.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let lowered = text.map(str::to_lowercase);

    records
        .into_iter()
        .filter(|record| {
            if let (Some(raw), Some(lowered)) = (text, lowered.as_deref()) {
                let folded = record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(lowered));
                let exact = record
                    .raw_search_fields()
                    .iter()
                    .any(|field| field.contains(raw));
                if !folded && !exact {
                    return false;
                }
            }

            let at = record.created_at();
            query.date_from.is_none_or(|from| at >= from)
                && query.date_to.is_none_or(|to| at <= to)
                && query.fields.matches(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit_log::{AuditLog, AuditLogFilter, AuditOutcome};
    use crate::utils::{DayBound, parse_instant};

    fn log(id: &str, action: &str, user: &str, module: &str, ip: &str, at: &str) -> AuditLog {
        AuditLog {
            id: id.to_string(),
            action: action.to_string(),
            user: user.to_string(),
            user_id: "U001".to_string(),
            user_role: "Admin".to_string(),
            timestamp: parse_instant(at, DayBound::Start).unwrap(),
            details: String::new(),
            module: module.to_string(),
            ip_address: ip.to_string(),
            status: AuditOutcome::Success,
        }
    }

    fn logs() -> Vec<AuditLog> {
        vec![
            log("1", "User Login", "John Admin", "Authentication", "192.168.1.100", "2025-10-25T08:30:15"),
            log("2", "Hospital Created", "Sarah Manager", "Hospitals", "192.168.1.105", "2025-10-26T09:15:22"),
            log("3", "Doctor Updated", "Mike Editor", "Doctors", "10.0.0.7", "2025-10-27T10:22:45"),
        ]
    }

    fn ids(records: &[AuditLog]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let out = filter(logs(), &Query::<AuditLogFilter>::default());
        assert_eq!(out, logs());
    }

    #[test]
    fn whitespace_text_is_ignored() {
        let out = filter(logs(), &Query::<()>::text("   "));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn text_is_case_insensitive_over_search_fields() {
        let out = filter(logs(), &Query::<()>::text("sarah"));
        assert_eq!(ids(&out), ["2"]);

        let out = filter(logs(), &Query::<()>::text("UPDATED"));
        assert_eq!(ids(&out), ["3"]);
    }

    #[test]
    fn raw_fields_match_without_folding() {
        let out = filter(logs(), &Query::<()>::text("192.168.1"));
        assert_eq!(ids(&out), ["1", "2"]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let query = Query::<()> {
            date_from: Some(parse_instant("2025-10-26T09:15:22", DayBound::Start).unwrap()),
            date_to: Some(parse_instant("2025-10-27", DayBound::Through).unwrap()),
            ..Query::default()
        };
        assert_eq!(ids(&filter(logs(), &query)), ["2", "3"]);
    }

    #[test]
    fn date_only_upper_bound_keeps_sub_second_entries() {
        let mut late = log(
            "4",
            "User Logout",
            "John Admin",
            "Authentication",
            "192.168.1.100",
            "2025-10-26T23:59:59",
        );
        late.timestamp += chrono::Duration::milliseconds(500);
        let query = Query::<()> {
            date_from: Some(parse_instant("2025-10-26", DayBound::Start).unwrap()),
            date_to: Some(parse_instant("2025-10-26", DayBound::Through).unwrap()),
            ..Query::default()
        };
        assert_eq!(ids(&filter(vec![late], &query)), ["4"]);
    }

    #[test]
    fn structured_filters_combine_with_text() {
        let query = Query {
            text: Some("login".to_string()),
            fields: AuditLogFilter {
                module: Some("Authentication".to_string()),
                ..AuditLogFilter::default()
            },
            ..Query::default()
        };
        assert_eq!(ids(&filter(logs(), &query)), ["1"]);

        let query = Query {
            text: Some("login".to_string()),
            fields: AuditLogFilter {
                module: Some("Doctors".to_string()),
                ..AuditLogFilter::default()
            },
            ..Query::default()
        };
        assert!(filter(logs(), &query).is_empty());
    }

    #[test]
    fn user_and_action_filters_are_substring_matches() {
        let query = Query {
            fields: AuditLogFilter {
                user: Some("admin".to_string()),
                action: Some("LOGIN".to_string()),
                ..AuditLogFilter::default()
            },
            ..Query::default()
        };
        assert_eq!(ids(&filter(logs(), &query)), ["1"]);
    }
}
