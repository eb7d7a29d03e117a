//! bookfinder: search a public book catalog by title, author or genre
//!
//! Usage:
//!   bookfinder                   - Open the search window
//!   bookfinder search <text>     - Print matching books
//!   bookfinder help              - Show help

mod app;
mod backend;
mod commands;
mod config;
mod search;
mod ui;

use std::env;

use app::BookFinder;
use backend::{CatalogClient, SearchField};
use commands::Command;
use config::Config;
use iced::{Size, Task};
use search::{SearchController, SearchState, NO_RESULTS_MESSAGE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> iced::Result {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();

    match Command::parse(&args) {
        Command::Gui => start_gui(load_config()),
        Command::Search { field, text, pages } => {
            if let Err(e) = run_search(&load_config(), field, &text, pages) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Help => {
            println!("{}", Command::help_text());
            Ok(())
        }
        Command::Invalid(reason) => {
            eprintln!("{}", reason);
            eprintln!("Run 'bookfinder help' for usage");
            std::process::exit(2);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookfinder=info"));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => {
            if config.api_key.is_none() {
                tracing::warn!("No BOOKFINDER_API_KEY set; using anonymous catalog quota");
            }
            config
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    }
}

fn start_gui(config: Config) -> iced::Result {
    let app = match BookFinder::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to create catalog client: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting bookfinder window (page size {})", config.page_size);

    iced::application("Book Finder", BookFinder::update, BookFinder::view)
        .theme(BookFinder::theme)
        .window_size(Size::new(820.0, 640.0))
        .antialiasing(true)
        .run_with(move || (app, Task::none()))
}

/// Headless search: print up to `pages` pages, stopping early when the
/// catalog runs out
fn run_search(config: &Config, field: SearchField, text: &str, pages: u32) -> Result<(), String> {
    let client = CatalogClient::new(config).map_err(|e| format!("Failed to create catalog client: {}", e))?;
    let state = SearchState::new(config.page_size).with_empty_page_policy(config.empty_page_policy());
    let rt = tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    rt.block_on(async {
        let mut search = SearchController::new(client, state);
        let mut printed = 0;

        for page in 0..pages {
            let state = if page == 0 {
                search.submit_search(text, field).await
            } else {
                search.load_next_page().await
            };

            if page == 0 {
                println!("{} matching \"{}\":", state.search_field(), state.query_text());
            }

            match state.error_message() {
                Some(NO_RESULTS_MESSAGE) => {
                    println!("{}", NO_RESULTS_MESSAGE);
                    break;
                }
                Some(message) => return Err(message.to_string()),
                None => {}
            }

            for (i, book) in state.results().iter().enumerate().skip(printed) {
                println!("{:>3}. {}", i + 1, book.title);
                if !book.authors.is_empty() {
                    println!("     {}", book.authors.join(", "));
                }
            }
            printed = state.results().len();

            if !state.can_load_more() {
                break;
            }
        }
        Ok(())
    })
}
