/// Floor upload: floor picker, pending files and submit
use iced::widget::image::Handle;
use iced::widget::{button, column, container, pick_list, row, scrollable, text};
use iced::{Alignment, Element, Length, Pixels};
use iced_aw::Wrap;

use super::{placeholder_text, thumbnail, THUMB_HEIGHT, THUMB_WIDTH};
use crate::api::models::FloorLabel;
use crate::state::upload::{FloorUploadForm, UploadStatus};
use crate::Message;

pub fn view(form: &FloorUploadForm) -> Element<'_, Message> {
    let uploading = form.status() == UploadStatus::Uploading;

    let controls = row![
        pick_list(FloorLabel::selectable(), form.floor().cloned(), Message::UploadFloorSelected)
            .placeholder("Seleccione un piso")
            .padding(8),
        button(text("Agregar imágenes"))
            .on_press_maybe((!uploading).then_some(Message::AddFiles)),
        button(text("Agregar carpeta"))
            .style(button::secondary)
            .on_press_maybe((!uploading).then_some(Message::AddFolder)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let pending: Element<'_, Message> = if form.pending().is_empty() {
        placeholder_text("No hay imágenes seleccionadas.")
    } else {
        let thumbs: Vec<Element<'_, Message>> = form
            .pending()
            .iter()
            .enumerate()
            .map(|(index, pending)| {
                let handle = Handle::from_path(pending.preview().path());
                button(
                    column![
                        thumbnail(Some(&handle), THUMB_WIDTH, THUMB_HEIGHT),
                        text(pending.file().file_name.as_str()).size(12),
                    ]
                    .spacing(4)
                    .width(Length::Fixed(THUMB_WIDTH)),
                )
                .style(button::text)
                .padding(0)
                .on_press(Message::Enlarge(index))
                .into()
            })
            .collect();
        scrollable(Wrap::with_elements(thumbs).spacing(Pixels(8.0)).line_spacing(Pixels(8.0)))
            .height(Length::Fill)
            .into()
    };

    let mut actions = row![
        button(text("Subir imágenes"))
            .style(button::success)
            .on_press_maybe((!uploading).then_some(Message::UploadSubmit)),
        button(text("Cancelar"))
            .style(button::danger)
            .on_press_maybe((!uploading).then_some(Message::UploadCancel)),
        text(format!("{} imágenes", form.pending().len())).size(14),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    if let Some(label) = form.status().label() {
        actions = actions.push(text(label).size(14));
    }

    let mut page = column![controls].spacing(16).padding(10);
    if let Some(enlarged) = form.enlarged() {
        let handle = Handle::from_path(enlarged.preview().path());
        page = page.push(
            container(
                column![
                    thumbnail(Some(&handle), 480.0, 360.0),
                    text(enlarged.file().file_name.as_str()).size(14),
                ]
                .spacing(6),
            )
            .padding(10)
            .style(container::rounded_box),
        );
    }

    page.push(pending).push(actions).into()
}
