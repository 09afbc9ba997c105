//! Read-only views over the ledger: substring search and pagination.
//!
//! Nothing here mutates records. [`ViewState`] is the caller's current
//! filter and page, held next to the records but not part of them.

use super::record::IdentityRecord;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Case-insensitive substring match against `name` or `email`. An empty
/// query matches every record. Results keep ledger order and carry each
/// record's index.
pub fn search<'a>(records: &'a [IdentityRecord], query: &str) -> Vec<(usize, &'a IdentityRecord)> {
    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| is_match(rec, &needle))
        .collect()
}

fn is_match(record: &IdentityRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.name().to_lowercase().contains(needle)
        || record.email().to_lowercase().contains(needle)
}

/// Number of pages needed to show `total` items, `page_size` at a time.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Slice out 1-based page `page` of `items`.
///
/// Fails closed: page 0, a zero page size, or a page past the end yields an
/// empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// The caller's current filter and 1-based page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: String,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            page: 1,
        }
    }
}

/// One page of a filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub items: Vec<(usize, &'a IdentityRecord)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SealedId;

    fn rec(name: &str, email: &str) -> IdentityRecord {
        IdentityRecord::new(name, email, "2000-01-01", SealedId::from_ciphertext("ct".into()))
            .unwrap()
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let records = vec![rec("John", "j@x.io"), rec("Amy", "amy@x.io")];
        let hits = search(&records, "jo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 0);
        assert_eq!(hits[0].1.name(), "John");

        let hits = search(&records, "JOHN");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn search_matches_email() {
        let records = vec![rec("John", "john@work.io"), rec("Amy", "amy@home.io")];
        let hits = search(&records, "HOME");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 1);
    }

    #[test]
    fn empty_query_matches_all_in_order() {
        let records = vec![rec("B", "b@x"), rec("A", "a@x"), rec("C", "c@x")];
        let idx: Vec<usize> = search(&records, "").iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn search_preserves_ledger_order() {
        let records = vec![rec("Jo B", "1@x"), rec("Amy", "2@x"), rec("Jo A", "3@x")];
        let idx: Vec<usize> = search(&records, "jo").iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(3, 0), 0);
    }

    #[test]
    fn paginate_slices_pages() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(paginate(&items, 1, 5), [0u32, 1, 2, 3, 4].as_slice());
        assert_eq!(paginate(&items, 3, 5), [10u32, 11].as_slice());
    }

    #[test]
    fn paginate_fails_closed() {
        let items: Vec<u32> = (0..12).collect();
        assert!(paginate(&items, 4, 5).is_empty());
        assert!(paginate(&items, 0, 5).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, 5).is_empty());
        assert!(paginate::<u32>(&[], 1, 5).is_empty());
    }
}
