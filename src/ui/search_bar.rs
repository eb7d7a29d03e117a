//! Search form: free text, field selector and submit button

use iced::widget::{button, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length, Padding};

use crate::backend::SearchField;

pub fn view<'a, Message: Clone + 'a>(
    query: &str,
    field: SearchField,
    on_input: impl Fn(String) -> Message + 'a,
    on_select: impl Fn(SearchField) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    let input = text_input("Enter a title, author, or genre", query)
        .on_input(on_input)
        .on_submit(on_submit.clone())
        .padding(Padding::new(10.0))
        .size(16)
        .width(Length::Fill);

    let selector = pick_list(SearchField::ALL, Some(field), on_select)
        .padding(Padding::new(10.0))
        .text_size(16);

    let submit = button(text("Search").size(16))
        .on_press(on_submit)
        .padding(Padding::from([10.0, 18.0]));

    row![input, selector, submit]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
