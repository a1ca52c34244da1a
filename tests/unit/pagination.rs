//! Unit tests for pagination math

use web_search_client::client::PageInfo;

#[test]
fn test_page_info_middle_page() {
    // 25 results at 10 per page: pages 1..=3
    let info = PageInfo::compute(2, 10, 25);

    assert_eq!(info.current_page, 2);
    assert_eq!(info.per_page, 10);
    assert_eq!(info.total_results, 25);
    assert_eq!(info.total_pages, 3);
    assert!(info.has_previous);
    assert!(info.has_next);
    assert_eq!(info.previous_page, 1);
    assert_eq!(info.next_page, 3);
}

#[test]
fn test_page_info_first_page() {
    let info = PageInfo::compute(1, 10, 25);

    assert!(!info.has_previous);
    assert!(info.has_next);
    assert_eq!(info.previous_page, 1, "previous page clamps to 1");
    assert_eq!(info.next_page, 2);
}

#[test]
fn test_page_info_last_page() {
    let info = PageInfo::compute(3, 10, 25);

    assert!(info.has_previous);
    assert!(!info.has_next);
    assert_eq!(info.previous_page, 2);
    assert_eq!(info.next_page, 3, "next page clamps to the last page");
}

#[test]
fn test_page_info_exact_multiple() {
    let info = PageInfo::compute(2, 10, 30);
    assert_eq!(info.total_pages, 3);
    assert!(info.has_next);
}

#[test]
fn test_page_info_zero_results() {
    let info = PageInfo::compute(1, 10, 0);

    assert_eq!(info.total_pages, 0);
    assert!(!info.has_previous);
    assert!(!info.has_next);
    assert_eq!(info.previous_page, 1);
    assert_eq!(info.next_page, 1);
}

#[test]
fn test_page_info_single_partial_page() {
    let info = PageInfo::compute(1, 10, 7);

    assert_eq!(info.total_pages, 1);
    assert!(!info.has_next);
    assert_eq!(info.next_page, 1);
}
