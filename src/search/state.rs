//! Search-and-paginate state
//!
//! Pure transitions over three events: a new search, a request for the next
//! page, and a page arriving. Transitions that need network I/O hand back a
//! [`PageRequest`]; whoever owns the runtime performs it and feeds the outcome
//! back through [`SearchState::page_fetched`].

use crate::backend::{BookSummary, FetchError, PageQuery, SearchField};

pub const NO_RESULTS_MESSAGE: &str = "No books found.";
pub const FETCH_ERROR_PREFIX: &str = "An error occurred while fetching data";

/// What a successful page with zero items does to accumulated results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPagePolicy {
    /// Wipe everything fetched so far, even on page 2+
    #[default]
    ClearResults,
    /// Keep what was already fetched and only report the notice
    KeepResults,
}

/// A fetch the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    pub query: PageQuery,
}

#[derive(Debug, Clone)]
pub enum Event {
    SubmitSearch { text: String, field: SearchField },
    LoadMore,
    PageFetched {
        request_id: u64,
        outcome: Result<Vec<BookSummary>, FetchError>,
    },
}

#[derive(Debug, Clone)]
pub struct SearchState {
    query_text: String,
    search_field: SearchField,
    results: Vec<BookSummary>,
    next_offset: u32,
    page_size: u32,
    error_message: Option<String>,
    empty_page_policy: EmptyPagePolicy,
    pending: Option<u64>,
    last_request_id: u64,
    search_id: u64,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query_text: String::new(),
            search_field: SearchField::default(),
            results: Vec::new(),
            next_offset: 0,
            page_size,
            error_message: None,
            empty_page_policy: EmptyPagePolicy::default(),
            pending: None,
            last_request_id: 0,
            search_id: 0,
        }
    }

    pub fn with_empty_page_policy(mut self, policy: EmptyPagePolicy) -> Self {
        self.empty_page_policy = policy;
        self
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn search_field(&self) -> SearchField {
        self.search_field
    }

    pub fn results(&self) -> &[BookSummary] {
        &self.results
    }

    pub fn next_offset(&self) -> u32 {
        self.next_offset
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Id of the request that started the current search; 0 before any
    pub fn search_id(&self) -> u64 {
        self.search_id
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a "load more" action makes sense right now
    pub fn can_load_more(&self) -> bool {
        !self.results.is_empty() && self.pending.is_none()
    }

    pub fn apply(&mut self, event: Event) -> Option<PageRequest> {
        match event {
            Event::SubmitSearch { text, field } => Some(self.submit_search(text, field)),
            Event::LoadMore => self.load_next_page(),
            Event::PageFetched { request_id, outcome } => {
                self.page_fetched(request_id, outcome);
                None
            }
        }
    }

    /// Start a new search from offset 0, superseding any pending fetch
    pub fn submit_search(&mut self, text: impl Into<String>, field: SearchField) -> PageRequest {
        if let Some(stale) = self.pending {
            tracing::debug!(request_id = stale, "Superseding pending fetch");
        }
        self.query_text = text.into();
        self.search_field = field;
        self.results.clear();
        self.next_offset = 0;
        self.error_message = None;
        let request = self.request_page(0);
        self.search_id = request.id;
        request
    }

    /// Continue the current search at the cursor; `None` if nothing to continue
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        if self.results.is_empty() {
            tracing::debug!("Load more ignored: no results yet");
            return None;
        }
        if let Some(pending) = self.pending {
            tracing::debug!(request_id = pending, "Load more ignored: fetch in flight");
            return None;
        }
        Some(self.request_page(self.next_offset))
    }

    /// Apply a fetch outcome. Returns false when the outcome belongs to a
    /// superseded request and was dropped.
    pub fn page_fetched(&mut self, request_id: u64, outcome: Result<Vec<BookSummary>, FetchError>) -> bool {
        if self.pending != Some(request_id) {
            tracing::debug!(request_id, "Dropping stale page");
            return false;
        }
        self.pending = None;

        match outcome {
            Err(err) => {
                tracing::warn!(request_id, "Catalog fetch failed: {}", err);
                self.error_message = Some(format!("{}: {}", FETCH_ERROR_PREFIX, err));
            }
            Ok(books) if books.is_empty() => self.apply_empty_page(),
            Ok(books) => {
                tracing::info!(
                    request_id,
                    count = books.len(),
                    offset = self.next_offset,
                    "Page fetched"
                );
                self.results.extend(books);
                self.next_offset += self.page_size;
                self.error_message = None;
            }
        }
        true
    }

    fn apply_empty_page(&mut self) {
        match self.empty_page_policy {
            EmptyPagePolicy::ClearResults => self.results.clear(),
            EmptyPagePolicy::KeepResults => {}
        }
        self.error_message = Some(NO_RESULTS_MESSAGE.to_string());
    }

    fn request_page(&mut self, offset: u32) -> PageRequest {
        self.last_request_id += 1;
        self.pending = Some(self.last_request_id);
        PageRequest {
            id: self.last_request_id,
            query: PageQuery {
                field: self.search_field,
                text: self.query_text.clone(),
                limit: self.page_size,
                offset,
            },
        }
    }
}
