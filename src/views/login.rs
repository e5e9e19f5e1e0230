use iced::widget::{button, column, container, text, text_input};
use iced::{Element, Length};

use besafe_core::auth::LoginForm;

use crate::app::Message;

const FORM_WIDTH: f32 = 320.0;

pub fn view(form: &LoginForm) -> Element<'_, Message> {
    let fields = column![
        text("BeSafe").size(28),
        text_input("Email", &form.login)
            .on_input(Message::LoginChanged)
            .padding(8),
        text_input("Password", &form.password)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::SignIn)
            .secure(true)
            .padding(8),
        button("Sign in")
            .on_press(Message::SignIn)
            .width(Length::Fill),
    ]
    .spacing(12)
    .width(FORM_WIDTH);

    container(fields)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
