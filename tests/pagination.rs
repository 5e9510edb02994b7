use roster::pagination::{Page, PageParams, PageRequest};
use serde_json::json;

#[test]
fn empty_page_shapes_to_zero_counts() {
    let page: Page<String> = Page::empty(PageRequest::new(0, 10));
    let value = serde_json::to_value(page.envelope("items")).unwrap();
    assert_eq!(
        value,
        json!({ "items": [], "current-page": 0, "total-items": 0, "total-pages": 0 })
    );
}

#[test]
fn envelope_uses_collection_name() {
    let page = Page::new(vec!["a", "b"], PageRequest::new(2, 2), 5);
    let value = serde_json::to_value(page.envelope("users")).unwrap();
    assert_eq!(value["users"], json!(["a", "b"]));
    assert_eq!(value["current-page"], 2);
    assert_eq!(value["total-items"], 5);
    assert_eq!(value["total-pages"], 3);
    assert_eq!(value.as_object().unwrap().len(), 4);
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(Page::<u8>::new(vec![], PageRequest::new(0, 10), 10).total_pages(), 1);
    assert_eq!(Page::<u8>::new(vec![], PageRequest::new(0, 10), 11).total_pages(), 2);
    assert_eq!(Page::<u8>::new(vec![], PageRequest::new(0, 1), 3).total_pages(), 3);
}

#[test]
fn map_keeps_page_metadata() {
    let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 4).map(|n| n * 10);
    assert_eq!(page.items, vec![10, 20]);
    assert_eq!(page.number, 1);
    assert_eq!(page.total_items, 4);
}

#[test]
fn page_request_offset() {
    assert_eq!(PageRequest::new(0, 10).offset(), 0);
    assert_eq!(PageRequest::new(3, 25).offset(), 75);
    assert_eq!(PageRequest::new(0, 0).size, 1);
}

#[test]
fn params_fall_back_to_defaults_and_clamp() {
    let defaults = PageParams::default().resolve(10, 100);
    assert_eq!(defaults, PageRequest::new(0, 10));

    let zero = PageParams { page: Some(2), size: Some(0) }.resolve(10, 100);
    assert_eq!(zero, PageRequest::new(2, 10));

    let huge = PageParams { page: None, size: Some(5000) }.resolve(10, 100);
    assert_eq!(huge.size, 100);
}
