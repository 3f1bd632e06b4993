//! Domain-specific assertion macros for druglist harnesses.
//!
//! These add context-rich failure messages on top of `pretty_assertions`.

/// Assert that a slice of rows (anything with a `launch_date` field) is in
/// launch date descending order.
///
/// ```rust
/// assert_launch_desc!(page.data);
/// ```
#[macro_export]
macro_rules! assert_launch_desc {
    ($rows:expr) => {{
        let rows = &$rows;
        for pair in rows.windows(2) {
            if pair[0].launch_date < pair[1].launch_date {
                panic!(
                    "assert_launch_desc! failed: {:?} sorts before {:?}",
                    pair[0].launch_date, pair[1].launch_date
                );
            }
        }
    }};
}

/// Assert the pagination block of a `DrugPage`.
///
/// ```rust
/// assert_pagination!(page, current = 2, pages = 3, total = 25);
/// ```
#[macro_export]
macro_rules! assert_pagination {
    ($page:expr, current = $current:expr, pages = $pages:expr, total = $total:expr) => {{
        let p = &$page.pagination;
        pretty_assertions::assert_eq!(
            (p.current_page, p.total_pages, p.total_records),
            ($current, $pages, $total),
            "pagination (current, pages, total) mismatch"
        );
        assert_eq!(p.has_next_page, p.current_page < p.total_pages, "hasNextPage");
        assert_eq!(p.has_prev_page, p.current_page > 1, "hasPrevPage");
    }};
}

/// Assert that a normalised record is valid, printing its missing fields if
/// not.
#[macro_export]
macro_rules! assert_valid_record {
    ($record:expr) => {{
        let record: &druglist_core::DrugRecord = &$record;
        if !record.is_valid() {
            panic!(
                "assert_valid_record! failed: missing {:?} in {:?}",
                record.missing_fields(),
                record
            );
        }
    }};
}
