use iced::widget::{Space, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use super::CANVAS_BG;
use crate::app::{App, GalleryScreen, Message};
use crate::widgets;

pub fn view<'a>(app: &'a App, screen: &'a GalleryScreen) -> Element<'a, Message> {
    let mut toolbar = row![].spacing(10).padding(10).align_y(Alignment::Center);
    if !screen.is_root() {
        toolbar = toolbar.push(button("< Back").on_press(Message::Back));
    }
    let toolbar = toolbar
        .push(text(screen.title.as_str()).size(24))
        .push(Space::new().width(Length::Fill))
        .push(
            text_input("Folder name", &screen.folder_title)
                .on_input(Message::FolderTitleChanged)
                .on_submit(Message::AddFolder)
                .width(200),
        )
        .push(button("Add Folder").on_press(Message::AddFolder))
        .push(button("Add Photo").on_press(Message::AddPhoto))
        .push(button("Log Out").on_press(Message::Logout));

    let grid = container(
        scrollable(widgets::cell_grid::view(app, screen.projection.cells()))
            .height(Length::Fill)
            .width(Length::Fill),
    )
    .style(|_theme| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    })
    .width(Length::Fill)
    .height(Length::Fill);

    column![toolbar, grid]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
