//! Domain-specific assertion macros for jcat harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! query property that was violated.

/// Assert the titles of a result page, in order.
///
/// ```rust,ignore
/// assert_titles!(result, ["Cell", "Nature"]);
/// ```
#[macro_export]
macro_rules! assert_titles {
    ($result:expr, [$($title:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $result
            .items
            .iter()
            .map(|r| r.title().unwrap_or("<untitled>"))
            .collect();
        let expected: Vec<&str> = vec![$($title),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_titles! failed: page order differs");
    }};
}

/// Assert the clamped page, the filtered total and the page length.
#[macro_export]
macro_rules! assert_page {
    ($result:expr, page = $page:expr, total = $total:expr, len = $len:expr) => {{
        let r = &$result;
        assert_eq!(
            (r.page, r.total, r.items.len()),
            ($page, $total, $len),
            "assert_page! failed: (page, total, len) differ"
        );
    }};
}

/// Assert that every record on a page satisfies a predicate.
#[macro_export]
macro_rules! assert_all {
    ($result:expr, $pred:expr, $what:expr) => {{
        for (i, record) in $result.items.iter().enumerate() {
            assert!(
                ($pred)(record),
                "assert_all! failed: record {} ({:?}) is not {}",
                i,
                record.title(),
                $what
            );
        }
    }};
}
