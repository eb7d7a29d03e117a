//! A single result entry

use iced::widget::{column, container, image, row, text};
use iced::{Element, Length};

use super::theme::{self, colors};
use crate::backend::BookSummary;

const COVER_WIDTH: u16 = 64;

pub fn view<'a, Message: 'a>(
    book: &'a BookSummary,
    thumbnail: Option<&image::Handle>,
) -> Element<'a, Message> {
    let cover: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone()).width(COVER_WIDTH).into(),
        None => container(text("▢").size(28).color(colors::PRIMARY))
            .width(COVER_WIDTH)
            .height(96)
            .center_x(COVER_WIDTH)
            .center_y(96)
            .style(theme::cover_placeholder)
            .into(),
    };

    let mut details = column![text(&book.title).size(18).color(colors::TEXT)].spacing(4);
    if !book.authors.is_empty() {
        details = details.push(
            text(book.authors.join(", "))
                .size(14)
                .color(colors::TEXT_MUTED),
        );
    }
    if let Some(description) = &book.description {
        details = details.push(text(description).size(13).color(colors::TEXT));
    }

    container(row![cover, details.width(Length::Fill)].spacing(16))
        .padding(12)
        .width(Length::Fill)
        .style(theme::card)
        .into()
}
