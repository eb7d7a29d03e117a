//! Async driver for [`SearchState`] over a [`Catalog`]
//!
//! Used by the command line; the window drives the same state through iced
//! tasks instead.

use crate::backend::{Catalog, SearchField};

use super::state::{Event, PageRequest, SearchState};

pub struct SearchController<C> {
    catalog: C,
    state: SearchState,
}

impl<C: Catalog> SearchController<C> {
    pub fn new(catalog: C, state: SearchState) -> Self {
        Self { catalog, state }
    }

    pub async fn submit_search(&mut self, text: impl Into<String>, field: SearchField) -> &SearchState {
        let request = self.state.submit_search(text, field);
        self.fetch_page(request).await;
        &self.state
    }

    pub async fn load_next_page(&mut self) -> &SearchState {
        if let Some(request) = self.state.load_next_page() {
            self.fetch_page(request).await;
        }
        &self.state
    }

    async fn fetch_page(&mut self, request: PageRequest) {
        let outcome = self.catalog.fetch_page(&request.query).await;
        self.state.apply(Event::PageFetched {
            request_id: request.id,
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BookSummary, FetchError, PageQuery};
    use crate::search::state::NO_RESULTS_MESSAGE;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned outcomes and records the queries it saw
    #[derive(Default)]
    struct ScriptedCatalog {
        outcomes: Mutex<VecDeque<Result<Vec<BookSummary>, FetchError>>>,
        seen: Mutex<Vec<PageQuery>>,
    }

    impl ScriptedCatalog {
        fn new(outcomes: Vec<Result<Vec<BookSummary>, FetchError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Catalog for ScriptedCatalog {
        async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<BookSummary>, FetchError> {
            self.seen.lock().unwrap().push(query.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn book(id: &str, title: &str) -> BookSummary {
        BookSummary {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Frank Herbert".to_string()],
            thumbnail_url: None,
            description: None,
        }
    }

    fn controller(outcomes: Vec<Result<Vec<BookSummary>, FetchError>>) -> SearchController<ScriptedCatalog> {
        SearchController::new(ScriptedCatalog::new(outcomes), SearchState::new(10))
    }

    #[tokio::test]
    async fn test_submit_then_empty_load_more() {
        let mut search = controller(vec![
            Ok(vec![book("1", "Dune"), book("2", "Dune Messiah")]),
            Ok(vec![]),
        ]);

        let state = search.submit_search("Dune", SearchField::Title).await;
        assert_eq!(state.results().len(), 2);
        assert_eq!(state.next_offset(), 10);
        assert_eq!(state.error_message(), None);

        let state = search.load_next_page().await;
        assert_eq!(state.results().len(), 0);
        assert_eq!(state.error_message(), Some(NO_RESULTS_MESSAGE));

        let seen = search.catalog.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].offset, 0);
        assert_eq!(seen[1].offset, 10);
        assert_eq!(seen[1].q(), "intitle:Dune");
    }

    #[tokio::test]
    async fn test_forbidden_keeps_previous_results() {
        let mut search = controller(vec![
            Ok(vec![book("1", "Dune")]),
            Err(FetchError::Status {
                status: 403,
                message: "quota exceeded".to_string(),
            }),
        ]);
        search.submit_search("Dune", SearchField::Title).await;

        let state = search.load_next_page().await;

        assert_eq!(state.results().len(), 1);
        assert_eq!(state.next_offset(), 10);
        let message = state.error_message().unwrap();
        assert!(message.contains("403"));
        assert!(message.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_forbidden_first_page() {
        let mut search = controller(vec![Err(FetchError::Status {
            status: 403,
            message: "quota exceeded".to_string(),
        })]);

        let state = search.submit_search("Dune", SearchField::Title).await;

        assert!(state.results().is_empty());
        assert_eq!(state.next_offset(), 0);
        assert!(state.error_message().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_load_more_without_results_sends_nothing() {
        let mut search = controller(vec![]);

        search.load_next_page().await;

        assert!(search.catalog.seen.lock().unwrap().is_empty());
    }
}
