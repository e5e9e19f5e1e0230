use iced::widget::{Space, button, column, container, image, row, text, text_input};
use iced::{Alignment, Element, Length};

use besafe_core::viewer::{PhotoViewer, Swipe};

use super::CANVAS_BG;
use crate::app::Message;

pub fn view<'a>(
    viewer: &'a PhotoViewer,
    current_image: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let photo = viewer.current();
    let favorite = if viewer.is_favorite() {
        "Unfavorite"
    } else {
        "Favorite"
    };

    let toolbar = row![
        button("< Back").on_press(Message::Back),
        Space::new().width(Length::Fill),
        text(format!(
            "{}  ({}/{})",
            photo.display_name,
            viewer.index() + 1,
            viewer.len()
        ))
        .size(20),
        Space::new().width(Length::Fill),
        button(favorite).on_press(Message::ToggleFavorite),
        button("Edit").on_press(Message::EditCurrent),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    let canvas_style = |_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    };

    let image_view = if let Some(handle) = current_image {
        container(
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .style(canvas_style)
        .width(Length::Fill)
        .height(Length::Fill)
    } else {
        container(text("No image").size(16))
            .style(canvas_style)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
    };

    let pager = row![
        button("< Previous").on_press(Message::Swipe(Swipe::Right)),
        text_input("Description", &photo.description)
            .on_input(Message::DescriptionChanged)
            .width(Length::Fill),
        button("Next >").on_press(Message::Swipe(Swipe::Left)),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    column![toolbar, image_view, pager]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
