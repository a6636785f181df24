use model_scopes::query_builder::pagination::{PageArg, Pagination};

#[test]
fn test_first_page_pagination() {
    let pagination = Pagination::for_page(1, 20).unwrap();
    assert_eq!(pagination.limit, Some(20));
    assert_eq!(pagination.offset, Some(0));
    assert_eq!(pagination.to_sql(), " LIMIT 20 OFFSET 0");
}

#[test]
fn test_limit_only() {
    let pagination = Pagination::limit_only(5);
    assert_eq!(pagination.offset, None);
    assert_eq!(pagination.to_sql(), " LIMIT 5");
}

#[test]
fn test_offset_only() {
    let pagination = Pagination::offset_only(15);
    assert_eq!(pagination.limit, None);
    assert_eq!(pagination.to_sql(), " OFFSET 15");
}

#[test]
fn test_textual_page_arguments() {
    let page = PageArg::from("3").as_int();
    let per_page = PageArg::from(String::from("25")).as_int();
    let pagination = Pagination::for_page(page, per_page).unwrap();
    assert_eq!(pagination.to_sql(), " LIMIT 25 OFFSET 50");
    assert_eq!(pagination.current_page(), 3);
}
