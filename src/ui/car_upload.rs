use iced::widget::image::Handle;
use iced::widget::{button, column, container, text, text_input, Row};
use iced::{Alignment, Element, Length};

use super::thumbnail;
use crate::api::models::Section;
use crate::state::car_upload::CarUploadForm;
use crate::Message;

pub fn view(form: &CarUploadForm) -> Element<'_, Message> {
    let slots = Section::ALL.into_iter().map(|section| {
        let (preview, caption) = match form.slot(section) {
            Some(file) => (
                thumbnail(Some(&Handle::from_path(&file.path)), 180.0, 135.0),
                file.file_name.as_str(),
            ),
            None => (thumbnail(None, 180.0, 135.0), "Sin imagen"),
        };

        container(
            column![
                text(section.label()).size(16),
                preview,
                text(caption).size(12),
                button(text("Seleccionar").size(14)).on_press(Message::PickSection(section)),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
        )
        .padding(10)
        .style(container::rounded_box)
        .into()
    });

    column![
        text("Subir imágenes de vehículo").size(28),
        text_input("Matrícula", form.plate())
            .on_input(Message::CarPlate)
            .padding(10)
            .width(Length::Fixed(260.0)),
        Row::with_children(slots).spacing(12),
        button(text("Subir"))
            .style(button::success)
            .padding(10)
            .on_press(Message::CarUploadSubmit),
    ]
    .spacing(16)
    .padding(20)
    .into()
}
