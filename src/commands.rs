//! Command line parsing
//!
//! Parses invocations like `bookfinder search --author Herbert --pages 2`.

use crate::backend::SearchField;

/// Parsed command from the process arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the search window (no arguments)
    Gui,
    /// Headless search: search [--title|--author|--genre] [--pages N] <text...>
    Search {
        field: SearchField,
        text: String,
        pages: u32,
    },
    /// Show help: help
    Help,
    /// Anything we could not make sense of, with a reason
    Invalid(String),
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Self {
        let Some(cmd) = args.first() else {
            return Command::Gui;
        };

        match cmd.to_lowercase().as_str() {
            "search" | "s" => Self::parse_search(&args[1..]),
            "help" | "--help" | "-h" => Command::Help,
            other => Command::Invalid(format!("Unknown command: {}", other)),
        }
    }

    fn parse_search(args: &[String]) -> Self {
        let mut field = SearchField::Title;
        let mut pages = 1;
        let mut words = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--title" | "-t" => field = SearchField::Title,
                "--author" | "-a" => field = SearchField::Author,
                "--genre" | "-g" => field = SearchField::Genre,
                "--field" | "-f" => match iter.next().map(|v| v.parse::<SearchField>()) {
                    Some(Ok(parsed)) => field = parsed,
                    Some(Err(e)) => return Command::Invalid(e),
                    None => return Command::Invalid("Usage: --field <title|author|genre>".to_string()),
                },
                "--pages" | "-p" => match iter.next().and_then(|v| v.parse::<u32>().ok()) {
                    Some(n) if n > 0 => pages = n,
                    _ => return Command::Invalid("Usage: --pages <N> (N >= 1)".to_string()),
                },
                "--" => {
                    words.extend(iter.by_ref().cloned());
                }
                _ => words.push(arg.clone()),
            }
        }

        // Empty text is allowed and sent to the catalog as-is
        Command::Search {
            field,
            text: words.join(" "),
            pages,
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"bookfinder - search a public book catalog

Usage:
  bookfinder                          Open the search window
  bookfinder search [options] <text>  Search and print results
  bookfinder help                     Show this help

Search options:
  -t, --title         Match titles (default)
  -a, --author        Match authors
  -g, --genre         Match genres
  -f, --field <name>  title, author or genre
  -p, --pages <N>     Number of pages to fetch (default 1)

Environment:
  BOOKFINDER_API_KEY       Catalog API key
  BOOKFINDER_BASE_URL      Catalog endpoint
  BOOKFINDER_PAGE_SIZE     Results per page (1-40, default 10)
  BOOKFINDER_TIMEOUT_SECS  Request timeout
  RUST_LOG                 Log filter, e.g. bookfinder=debug"#
    }
}
