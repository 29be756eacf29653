use iced::widget::{button, column, container, text, text_input};
use iced::{Alignment, Element, Length};

use crate::session::Route;
use crate::state::auth::{LoginForm, RegisterForm};
use crate::Message;

const FORM_WIDTH: f32 = 360.0;

pub fn login(form: &LoginForm) -> Element<'_, Message> {
    let content = column![
        text("Iniciar sesión").size(32),
        text_input("Usuario", &form.username)
            .on_input(Message::LoginUsername)
            .padding(10),
        text_input("Contraseña", &form.password)
            .on_input(Message::LoginPassword)
            .on_submit(Message::LoginSubmit)
            .secure(true)
            .padding(10),
        button(text("Entrar"))
            .on_press(Message::LoginSubmit)
            .padding(10)
            .width(Length::Fill),
        button(text("¿No tienes cuenta? Regístrate").size(14))
            .style(button::text)
            .on_press(Message::Navigate(Route::Register)),
    ]
    .spacing(14)
    .width(Length::Fixed(FORM_WIDTH))
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

pub fn register(form: &RegisterForm) -> Element<'_, Message> {
    let content = column![
        text("Registro").size(32),
        text_input("Nombre", &form.name)
            .on_input(Message::RegisterName)
            .padding(10),
        text_input("Departamento", &form.department)
            .on_input(Message::RegisterDepartment)
            .padding(10),
        text_input("Usuario", &form.username)
            .on_input(Message::RegisterUsername)
            .padding(10),
        text_input("Contraseña", &form.password)
            .on_input(Message::RegisterPassword)
            .on_submit(Message::RegisterSubmit)
            .secure(true)
            .padding(10),
        button(text("Registrarse"))
            .on_press(Message::RegisterSubmit)
            .padding(10)
            .width(Length::Fill),
        button(text("¿Ya tienes cuenta? Inicia sesión").size(14))
            .style(button::text)
            .on_press(Message::Navigate(Route::Login)),
    ]
    .spacing(14)
    .width(Length::Fixed(FORM_WIDTH))
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
