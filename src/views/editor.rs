use iced::widget::{Space, button, column, container, image, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::CANVAS_BG;
use crate::app::Message;
use crate::editor::PhotoEditor;

pub fn view<'a>(
    editor: &'a PhotoEditor,
    preview: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let title = match editor.existing() {
        Some(record) => format!("Edit {}", record.display_name),
        None => "New Photo".to_string(),
    };
    let can_save = editor.has_new_image() || editor.existing().is_some();

    let toolbar = row![
        button("Cancel").on_press(Message::Back),
        Space::new().width(Length::Fill),
        text(title).size(20),
        Space::new().width(Length::Fill),
        button("Save")
            .on_press_maybe(can_save.then_some(Message::SavePhoto))
            .style(button::primary),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    let canvas_style = |_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    };

    let preview = if let Some(handle) = preview {
        container(
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .style(canvas_style)
        .width(Length::Fill)
        .height(Length::Fill)
    } else {
        container(text("No image chosen").size(16))
            .style(canvas_style)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
    };

    let favorite = if editor.is_favorite {
        "Unfavorite"
    } else {
        "Favorite"
    };
    let form = column![
        button("Choose Image...").on_press(Message::PickImage),
        text_input("Name", &editor.name).on_input(Message::NameChanged),
        text_input("Description", &editor.description)
            .on_input(Message::DescriptionChanged),
        button(favorite).on_press(Message::ToggleFavorite),
    ]
    .spacing(12)
    .padding(10)
    .width(300);

    column![toolbar, row![preview, form].height(Length::Fill)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
