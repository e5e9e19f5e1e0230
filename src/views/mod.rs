use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::app::{App, Message, Screen};

pub mod editor;
pub mod gallery;
pub mod login;
pub mod viewer;

pub const CANVAS_BG: Color = Color::from_rgb(0.08, 0.08, 0.08);
const ALERT_BG: Color = Color::from_rgb(0.45, 0.12, 0.12);

/// The top screen, then any alert, then the status line.
pub fn view(app: &App) -> Element<'_, Message> {
    let body = match app.screen() {
        Screen::Login(form) => login::view(form),
        Screen::Gallery(screen) => gallery::view(app, screen),
        Screen::Viewer(viewer) => viewer::view(viewer, app.current_image()),
        Screen::Editor(editor) => {
            let preview = app.picked_image().or_else(|| {
                editor
                    .existing()
                    .and_then(|record| app.thumbnail(&record.storage_key))
            });
            editor::view(editor, preview)
        }
    };

    let mut content = column![body].width(Length::Fill).height(Length::Fill);
    if let Some(alert) = app.alert() {
        content = content.push(alert_bar(alert));
    }

    let status = container(text(app.status_message()).size(12))
        .padding(5)
        .width(Length::Fill);

    content.push(status).into()
}

fn alert_bar(alert: &str) -> Element<'_, Message> {
    container(
        row![
            text(alert).size(14),
            Space::new().width(Length::Fill),
            button("OK").on_press(Message::DismissAlert),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .style(|_theme: &_| container::Style {
        background: Some(ALERT_BG.into()),
        ..Default::default()
    })
    .padding(10)
    .width(Length::Fill)
    .into()
}
