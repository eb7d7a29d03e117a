//! Search-and-paginate controller

pub mod controller;
pub mod state;

pub use controller::SearchController;
pub use state::{EmptyPagePolicy, Event, PageRequest, SearchState, NO_RESULTS_MESSAGE};
