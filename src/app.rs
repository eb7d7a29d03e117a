//! Core application state and Iced Application implementation
//!
//! The window is a thin binding over [`SearchState`]: user actions become
//! state transitions, and the page requests they produce run as tasks whose
//! results come back as [`Message::PageFetched`].

use std::collections::HashMap;
use std::sync::Arc;

use iced::widget::{button, column, container, image, scrollable, text, Space};
use iced::{Element, Length, Task, Theme};

use crate::backend::{BookSummary, Catalog, CatalogClient, FetchError, SearchField};
use crate::config::Config;
use crate::search::{Event, PageRequest, SearchState};
use crate::ui::theme::{self, colors};
use crate::ui::{book_card, search_bar};

pub struct BookFinder {
    query: String,
    field: SearchField,
    search: SearchState,
    client: Arc<CatalogClient>,
    /// Cover images for the current search, keyed by thumbnail URL
    thumbnails: HashMap<String, image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    FieldSelected(SearchField),
    Submit,
    LoadMore,
    PageFetched(u64, Result<Vec<BookSummary>, FetchError>),
    /// Search id the cover was requested for, its URL, and the download
    ThumbnailLoaded(u64, String, Result<Vec<u8>, FetchError>),
}

impl BookFinder {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let search = SearchState::new(config.page_size).with_empty_page_policy(config.empty_page_policy());
        Ok(Self {
            query: String::new(),
            field: SearchField::default(),
            search,
            client: Arc::new(CatalogClient::new(config)?),
            thumbnails: HashMap::new(),
        })
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                Task::none()
            }

            Message::FieldSelected(field) => {
                self.field = field;
                Task::none()
            }

            Message::Submit => {
                self.thumbnails.clear();
                self.dispatch(Event::SubmitSearch {
                    text: self.query.clone(),
                    field: self.field,
                })
            }

            Message::LoadMore => self.dispatch(Event::LoadMore),

            Message::PageFetched(request_id, outcome) => {
                let covers: Vec<String> = match &outcome {
                    Ok(books) => books.iter().filter_map(|b| b.thumbnail_url.clone()).collect(),
                    Err(_) => Vec::new(),
                };

                if !self.search.page_fetched(request_id, outcome) {
                    return Task::none();
                }

                let search_id = self.search.search_id();
                let missing: Vec<String> = covers
                    .into_iter()
                    .filter(|url| !self.thumbnails.contains_key(url))
                    .collect();
                Task::batch(missing.into_iter().map(|url| self.fetch_thumbnail(search_id, url)))
            }

            Message::ThumbnailLoaded(search_id, url, result) => {
                if search_id != self.search.search_id() {
                    tracing::debug!("Dropping cover {} from a previous search", url);
                    return Task::none();
                }
                match result {
                    Ok(bytes) => {
                        self.thumbnails.insert(url, image::Handle::from_bytes(bytes));
                    }
                    Err(e) => tracing::debug!("Thumbnail {} unavailable: {}", url, e),
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = text("Book Finder").size(28).color(colors::TEXT);

        let form = search_bar::view(
            &self.query,
            self.field,
            Message::QueryChanged,
            Message::FieldSelected,
            Message::Submit,
        );

        let mut content = column![header, form].spacing(16);

        if let Some(error) = self.search.error_message() {
            content = content.push(text(error).size(14).color(colors::ERROR));
        }
        if self.search.is_loading() {
            content = content.push(text("Searching...").size(14).color(colors::TEXT_MUTED));
        }

        content = content.push(scrollable(self.view_results()).height(Length::Fill));

        container(content)
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::background)
            .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        let cards: Vec<Element<'_, Message>> = self
            .search
            .results()
            .iter()
            .map(|book| {
                let cover = book
                    .thumbnail_url
                    .as_ref()
                    .and_then(|url| self.thumbnails.get(url));
                book_card::view(book, cover)
            })
            .collect();

        let mut list = column(cards).spacing(8);

        // Only offered once at least one page is on screen
        if !self.search.results().is_empty() {
            let load_more = button(text("Load More").size(15))
                .on_press_maybe(self.search.can_load_more().then_some(Message::LoadMore));
            list = list
                .push(Space::with_height(8))
                .push(container(load_more).center_x(Length::Fill));
        }

        list.into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    fn dispatch(&mut self, event: Event) -> Task<Message> {
        match self.search.apply(event) {
            Some(request) => self.fetch_page(request),
            None => Task::none(),
        }
    }

    fn fetch_page(&self, request: PageRequest) -> Task<Message> {
        let client = Arc::clone(&self.client);
        let PageRequest { id, query } = request;
        Task::perform(
            async move { client.fetch_page(&query).await },
            move |outcome| Message::PageFetched(id, outcome),
        )
    }

    fn fetch_thumbnail(&self, search_id: u64, url: String) -> Task<Message> {
        let client = Arc::clone(&self.client);
        Task::perform(
            async move {
                let result = client.fetch_thumbnail(&url).await;
                (url, result)
            },
            move |(url, result)| Message::ThumbnailLoaded(search_id, url, result),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::NO_RESULTS_MESSAGE;

    fn app() -> BookFinder {
        BookFinder::new(&Config::default()).unwrap()
    }

    fn book(id: &str, thumbnail: Option<&str>) -> BookSummary {
        BookSummary {
            id: id.to_string(),
            title: format!("Book {}", id),
            authors: vec![],
            thumbnail_url: thumbnail.map(str::to_string),
            description: None,
        }
    }

    fn submit(app: &mut BookFinder, query: &str, field: SearchField) {
        let _ = app.update(Message::QueryChanged(query.to_string()));
        let _ = app.update(Message::FieldSelected(field));
        let _ = app.update(Message::Submit);
    }

    #[test]
    fn test_submit_starts_fetch_with_form_values() {
        let mut app = app();
        submit(&mut app, "Herbert", SearchField::Author);

        assert!(app.search.is_loading());
        assert_eq!(app.search.query_text(), "Herbert");
        assert_eq!(app.search.search_field(), SearchField::Author);
    }

    #[test]
    fn test_page_fetched_fills_results() {
        let mut app = app();
        submit(&mut app, "Dune", SearchField::Title);

        let _ = app.update(Message::PageFetched(1, Ok(vec![book("a", None), book("b", None)])));

        assert_eq!(app.search.results().len(), 2);
        assert_eq!(app.search.next_offset(), 10);
        assert!(app.search.can_load_more());
    }

    #[test]
    fn test_load_more_then_empty_page() {
        let mut app = app();
        submit(&mut app, "Dune", SearchField::Title);
        let _ = app.update(Message::PageFetched(1, Ok(vec![book("a", None)])));

        let _ = app.update(Message::LoadMore);
        assert!(app.search.is_loading());
        let _ = app.update(Message::PageFetched(2, Ok(vec![])));

        assert!(app.search.results().is_empty());
        assert_eq!(app.search.error_message(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_stale_page_after_resubmit_is_ignored() {
        let mut app = app();
        submit(&mut app, "Dune", SearchField::Title);
        submit(&mut app, "Emma", SearchField::Title);

        let _ = app.update(Message::PageFetched(1, Ok(vec![book("dune", None)])));
        assert!(app.search.results().is_empty());

        let _ = app.update(Message::PageFetched(2, Ok(vec![book("emma", None)])));
        assert_eq!(app.search.results()[0].id, "emma");
    }

    #[test]
    fn test_thumbnail_cache_cleared_on_submit() {
        let mut app = app();
        submit(&mut app, "Dune", SearchField::Title);
        let search_id = app.search.search_id();

        let _ = app.update(Message::ThumbnailLoaded(search_id, "http://img/a".to_string(), Ok(vec![1, 2, 3])));
        assert!(app.thumbnails.contains_key("http://img/a"));

        let _ = app.update(Message::ThumbnailLoaded(
            search_id,
            "http://img/b".to_string(),
            Err(FetchError::Transport("timed out".to_string())),
        ));
        assert!(!app.thumbnails.contains_key("http://img/b"));

        submit(&mut app, "Emma", SearchField::Title);
        assert!(app.thumbnails.is_empty());
    }

    #[test]
    fn test_cover_from_previous_search_is_dropped() {
        let mut app = app();
        submit(&mut app, "Dune", SearchField::Title);
        let old_search = app.search.search_id();
        submit(&mut app, "Emma", SearchField::Title);

        let _ = app.update(Message::ThumbnailLoaded(
            old_search,
            "http://img/old-search".to_string(),
            Ok(vec![1, 2, 3]),
        ));
        assert!(app.thumbnails.is_empty());

        let current = app.search.search_id();
        let _ = app.update(Message::ThumbnailLoaded(current, "http://img/emma".to_string(), Ok(vec![4])));
        assert!(app.thumbnails.contains_key("http://img/emma"));
    }
}
