use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Pixels};
use iced_aw::Wrap;

use super::modal::modal;
use super::remote::RemoteImages;
use super::{placeholder_text, thumbnail, THUMB_HEIGHT, THUMB_WIDTH};
use crate::api::models::CarImageRecord;
use crate::state::car_gallery::CarGallery;
use crate::Message;

pub fn view<'a>(gallery: &'a CarGallery, remote: &'a RemoteImages) -> Element<'a, Message> {
    let filters = row![
        text_input("Matrícula", gallery.plate_filter())
            .on_input(Message::CarPlateFilter)
            .padding(8)
            .width(Length::Fixed(200.0)),
        text_input("Fecha (AAAA-MM-DD)", gallery.date_text())
            .on_input(Message::CarDate)
            .padding(8)
            .width(Length::Fixed(200.0)),
        button(text("Limpiar filtros"))
            .style(button::secondary)
            .on_press(Message::CarClearFilters),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let groups = gallery.groups();
    let body: Element<'a, Message> = if gallery.is_loading() {
        placeholder_text("Cargando imágenes...")
    } else if groups.is_empty() {
        placeholder_text("No hay imágenes de vehículos.")
    } else {
        let sections = groups.into_iter().map(|group| {
            let thumbs: Vec<Element<'a, Message>> = group
                .records
                .iter()
                .map(|record| {
                    button(
                        column![
                            thumbnail(remote.get(&record.file_path), THUMB_WIDTH, THUMB_HEIGHT),
                            text(record.section.label()).size(12),
                        ]
                        .spacing(4)
                        .align_x(Alignment::Center),
                    )
                    .style(button::text)
                    .padding(0)
                    .on_press(Message::SelectCar((*record).clone()))
                    .into()
                })
                .collect();

            column![
                text(group.plate).size(20),
                Wrap::with_elements(thumbs).spacing(Pixels(8.0)).line_spacing(Pixels(8.0)),
            ]
            .spacing(8)
            .into()
        });

        scrollable(Column::with_children(sections).spacing(24).padding(10))
            .height(Length::Fill)
            .into()
    };

    let page = column![filters, body].spacing(16).padding(10);

    match gallery.selected() {
        Some(record) => modal(page, detail(record, remote), Message::CloseCarModal),
        None => page.into(),
    }
}

fn detail<'a>(record: &'a CarImageRecord, remote: &'a RemoteImages) -> Element<'a, Message> {
    container(
        column![
            thumbnail(remote.get(&record.file_path), 560.0, 420.0),
            text(format!("Matrícula: {}", record.plate)).size(16),
            text(format!("Fecha de subida: {}", record.uploaded_at.display())).size(14),
            text(format!("Sección: {}", record.section.label())).size(14),
            button(text("Cerrar"))
                .style(button::secondary)
                .on_press(Message::CloseCarModal),
        ]
        .spacing(10),
    )
    .padding(20)
    .style(container::rounded_box)
    .into()
}
