//! Paginated sources and their termination rules
//!
//! Each export endpoint signals "more pages" differently. A [`PageSource`] turns a
//! response body into a [`Page`] and names the [`Termination`] rule to apply to it.

use crate::domain::{ApiError, BulkError, DedupStrategy, Record, Result};
use serde_json::Value;

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    /// URL of the following page, if the server sent one
    pub next_page: Option<String>,
    /// Explicit continuation flag, if the server sent one
    pub has_more: Option<bool>,
}

impl Page {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            next_page: None,
            has_more: None,
        }
    }

    pub fn with_next_page(mut self, next_page: Option<String>) -> Self {
        self.next_page = next_page;
        self
    }

    pub fn with_has_more(mut self, has_more: Option<bool>) -> Self {
        self.has_more = has_more;
        self
    }
}

/// How a source decides whether another page exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Continue while `has_more` is true
    ExplicitFlag,
    /// Continue while `next_page` is non-null
    NextPointer,
    /// Continue while a page is full; an explicit flag wins when present
    CountCeiling(usize),
}

impl Termination {
    /// URL of the next page to fetch, or `None` when the walk is over
    pub fn next_url(&self, page: &Page) -> Option<String> {
        let more = match self {
            Termination::ExplicitFlag => page.has_more == Some(true),
            Termination::NextPointer => page.next_page.is_some(),
            Termination::CountCeiling(ceiling) => page
                .has_more
                .unwrap_or(page.records.len() >= *ceiling),
        };

        if more {
            page.next_page.clone()
        } else {
            None
        }
    }
}

/// A paginated listing endpoint
pub trait PageSource {
    /// Name used in log lines
    fn name(&self) -> &str;

    fn parse(&self, body: &Value) -> Result<Page>;

    fn termination(&self) -> Termination;

    fn dedup(&self) -> DedupStrategy;

    /// Whether an error means "result cap reached" rather than failure
    fn is_result_cap(&self, _error: &ApiError) -> bool {
        false
    }
}

fn records_at(body: &Value, key: &str) -> Result<Vec<Record>> {
    match body.get(key) {
        Some(Value::Array(items)) => Ok(items.iter().cloned().map(Record::new).collect()),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => Err(BulkError::Serialization(format!(
            "expected `{key}` to be an array"
        ))),
    }
}

fn string_at(body: &Value, pointer: &str) -> Option<String> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Incremental ticket export (`incremental/tickets.json`)
///
/// The endpoint always sends `next_page`, so fullness decides continuation unless the
/// response carries `end_of_stream`.
#[derive(Debug, Clone, Copy)]
pub struct IncrementalTicketSource;

/// Page size of the incremental ticket export
pub const INCREMENTAL_PAGE_LIMIT: usize = 1000;

impl PageSource for IncrementalTicketSource {
    fn name(&self) -> &str {
        "incremental tickets"
    }

    fn parse(&self, body: &Value) -> Result<Page> {
        let records = records_at(body, "tickets")?;
        let has_more = body
            .get("end_of_stream")
            .and_then(Value::as_bool)
            .map(|end| !end);
        Ok(Page::new(records)
            .with_next_page(string_at(body, "/next_page"))
            .with_has_more(has_more))
    }

    fn termination(&self) -> Termination {
        Termination::CountCeiling(INCREMENTAL_PAGE_LIMIT)
    }

    fn dedup(&self) -> DedupStrategy {
        DedupStrategy::IdAndUpdatedAt
    }
}

/// Community posts of one topic (`community/topics/{id}/posts`), cursor paginated
#[derive(Debug, Clone, Copy)]
pub struct CommunityPostSource;

impl PageSource for CommunityPostSource {
    fn name(&self) -> &str {
        "community posts"
    }

    fn parse(&self, body: &Value) -> Result<Page> {
        let records = records_at(body, "posts")?;
        let has_more = body.pointer("/meta/has_more").and_then(Value::as_bool);
        Ok(Page::new(records)
            .with_next_page(string_at(body, "/links/next"))
            .with_has_more(has_more))
    }

    fn termination(&self) -> Termination {
        Termination::ExplicitFlag
    }

    fn dedup(&self) -> DedupStrategy {
        DedupStrategy::Id
    }
}

/// Search results (`search.json`), offset paginated with a server-side result cap
#[derive(Debug, Clone, Copy)]
pub struct TicketSearchSource;

impl PageSource for TicketSearchSource {
    fn name(&self) -> &str {
        "ticket search"
    }

    fn parse(&self, body: &Value) -> Result<Page> {
        let records = records_at(body, "results")?;
        Ok(Page::new(records).with_next_page(string_at(body, "/next_page")))
    }

    fn termination(&self) -> Termination {
        Termination::NextPointer
    }

    fn dedup(&self) -> DedupStrategy {
        DedupStrategy::Id
    }

    fn is_result_cap(&self, error: &ApiError) -> bool {
        matches!(
            error,
            ApiError::ResultCapExceeded(_) | ApiError::ClientError { status: 422, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(n: usize) -> Vec<Record> {
        (0..n).map(|i| Record::new(json!({ "id": i }))).collect()
    }

    #[test]
    fn test_count_ceiling() {
        let rule = Termination::CountCeiling(1000);
        let next = Some("https://next".to_string());

        let full = Page::new(records(1000)).with_next_page(next.clone());
        assert_eq!(rule.next_url(&full), next);

        let short = Page::new(records(999)).with_next_page(next.clone());
        assert_eq!(rule.next_url(&short), None);
    }

    #[test]
    fn test_count_ceiling_prefers_explicit_flag() {
        let rule = Termination::CountCeiling(1000);
        let next = Some("https://next".to_string());

        let ended = Page::new(records(1000))
            .with_next_page(next.clone())
            .with_has_more(Some(false));
        assert_eq!(rule.next_url(&ended), None);

        let more = Page::new(records(10))
            .with_next_page(next.clone())
            .with_has_more(Some(true));
        assert_eq!(rule.next_url(&more), next);
    }

    #[test]
    fn test_explicit_flag_and_next_pointer() {
        let next = Some("https://next".to_string());
        let page = Page::new(records(1)).with_next_page(next.clone());

        assert_eq!(Termination::ExplicitFlag.next_url(&page), None);
        assert_eq!(Termination::NextPointer.next_url(&page), next);
        assert_eq!(
            Termination::NextPointer.next_url(&Page::new(records(1))),
            None
        );
    }

    #[test]
    fn test_parse_incremental_page() {
        let body = json!({
            "tickets": [{"id": 1, "updated_at": "2024-01-01T00:00:00Z"}],
            "next_page": "https://acme.zendesk.com/api/v2/incremental/tickets.json?start_time=2",
            "count": 1,
            "end_of_stream": true
        });
        let page = IncrementalTicketSource.parse(&body).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.has_more, Some(false));
        assert!(page.next_page.is_some());
    }

    #[test]
    fn test_parse_posts_page() {
        let body = json!({
            "posts": [{"id": 1}, {"id": 2}],
            "meta": {"has_more": true, "after_cursor": "xyz"},
            "links": {"next": "https://acme.zendesk.com/api/v2/community/topics/9/posts?page[after]=xyz"}
        });
        let page = CommunityPostSource.parse(&body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.has_more, Some(true));
        assert!(CommunityPostSource.termination().next_url(&page).is_some());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let body = json!({"results": "nope"});
        assert!(TicketSearchSource.parse(&body).is_err());
    }

    #[test]
    fn test_search_result_cap() {
        let cap = ApiError::ClientError {
            status: 422,
            message: "Unprocessable".to_string(),
        };
        assert!(TicketSearchSource.is_result_cap(&cap));
        assert!(!TicketSearchSource.is_result_cap(&ApiError::NotFound(String::new())));
        assert!(!CommunityPostSource.is_result_cap(&cap));
    }
}
