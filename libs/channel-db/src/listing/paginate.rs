use serde::{Deserialize, Serialize};

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Slices `records` into page `page` of `limit` items. Zero or negative
/// `page`/`limit` are treated as 1; a page past the end is empty.
pub fn paginate<T>(records: Vec<T>, page: i64, limit: i64) -> Page<T> {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);

    let total = records.len();
    let start = (page - 1).saturating_mul(limit);
    let items = records.into_iter().skip(start).take(limit).collect();

    Page { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn last_partial_page() {
        let page = paginate(numbers(25), 3, 10);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total, 25);
    }

    #[test]
    fn out_of_range_page_is_empty_with_total() {
        let page = paginate(numbers(25), 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 25);

        let page = paginate(numbers(3), i64::MAX, i64::MAX);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn non_positive_inputs_clamp_to_one() {
        let page = paginate(numbers(5), 0, 0);
        assert_eq!(page.items, vec![0]);

        let page = paginate(numbers(5), -3, 2);
        assert_eq!(page.items, vec![0, 1]);
    }

    #[test]
    fn pages_cover_every_item_exactly_once() {
        for n in 0usize..40 {
            for limit in 1usize..12 {
                let pages = n.div_ceil(limit).max(1);
                let mut seen = Vec::new();
                for p in 1..=pages {
                    let page = paginate(numbers(n), p as i64, limit as i64);
                    assert_eq!(page.total, n);
                    seen.extend(page.items);
                }
                assert_eq!(seen, numbers(n), "n={n} limit={limit}");
            }
        }
    }

    #[test]
    fn serializes_as_items_and_total() {
        let json = serde_json::to_value(paginate(vec!["a", "b"], 1, 10)).unwrap();
        assert_eq!(json, serde_json::json!({ "items": ["a", "b"], "total": 2 }));
    }
}
