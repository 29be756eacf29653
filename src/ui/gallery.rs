/// Floor gallery: filters, grouped thumbnails and the preview panel
use iced::widget::image::Handle;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Pixels};
use iced_aw::Wrap;

use super::remote::RemoteImages;
use super::{placeholder_text, thumbnail, THUMB_HEIGHT, THUMB_WIDTH};
use crate::api::models::ImageRecord;
use crate::state::gallery::{FloorFilter, FloorGallery};
use crate::Message;

const PREVIEW_WIDTH: f32 = 420.0;
const PREVIEW_HEIGHT: f32 = 315.0;

/// Shown while nothing is selected
const PLACEHOLDER: &[u8] = include_bytes!("../../assets/placeholder.png");

pub fn view<'a>(gallery: &'a FloorGallery, remote: &'a RemoteImages) -> Element<'a, Message> {
    let mut options = vec![FloorFilter::All];
    options.extend(gallery.floor_options().into_iter().map(FloorFilter::Only));

    let mut filters = row![
        pick_list(options, Some(gallery.floor_filter().clone()), Message::FloorFilterSelected)
            .padding(8),
        text_input("Fecha (AAAA-MM-DD)", gallery.date_text())
            .on_input(Message::GalleryDate)
            .padding(8)
            .width(Length::Fixed(200.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    if gallery.has_active_filters() {
        filters = filters.push(
            button(text("Limpiar filtros"))
                .style(button::secondary)
                .on_press(Message::GalleryClearFilters),
        );
    }

    let body: Element<'a, Message> = if gallery.is_loading() {
        placeholder_text("Cargando imágenes...")
    } else {
        let groups = gallery.groups();
        if gallery.records().is_empty() {
            placeholder_text("No hay imágenes para mostrar.")
        } else if groups.is_empty() {
            placeholder_text("Ninguna imagen coincide con los filtros.")
        } else {
            let sections = groups.into_iter().map(|group| {
                let thumbs: Vec<Element<'a, Message>> = group
                    .visible()
                    .iter()
                    .map(|record| {
                        button(thumbnail(remote.get(&record.file_path), THUMB_WIDTH, THUMB_HEIGHT))
                            .style(button::text)
                            .padding(0)
                            .on_press(Message::SelectImage((*record).clone()))
                            .into()
                    })
                    .collect();

                let mut section = column![
                    text(format!("{} ({})", group.label, group.records.len())).size(20),
                    Wrap::with_elements(thumbs).spacing(Pixels(8.0)).line_spacing(Pixels(8.0)),
                ]
                .spacing(8);

                if group.has_more() {
                    section = section.push(
                        button(text("Ver más").size(14))
                            .style(button::text)
                            .on_press(Message::ShowMore(group.label.clone())),
                    );
                }
                section.into()
            });

            scrollable(Column::with_children(sections).spacing(24).padding(10))
                .height(Length::Fill)
                .into()
        }
    };

    column![
        filters,
        row![preview(gallery.preview(), remote), body].spacing(20),
    ]
    .spacing(16)
    .padding(10)
    .into()
}

fn preview<'a>(record: &'a ImageRecord, remote: &'a RemoteImages) -> Element<'a, Message> {
    let handle = if record.is_placeholder() {
        Some(Handle::from_bytes(PLACEHOLDER))
    } else {
        remote.get(&record.file_path).cloned()
    };

    let mut panel = column![thumbnail(handle.as_ref(), PREVIEW_WIDTH, PREVIEW_HEIGHT)].spacing(10);

    if record.has_metadata() {
        panel = panel
            .push(text(format!("Piso: {}", record.floor)).size(14))
            .push(text(format!("Fecha de subida: {}", record.uploaded_at.display())).size(14))
            .push(text(format!("Fecha de modificación: {}", record.source_modified_at.display())).size(14))
            .push(text(format!("Subido por: {}", record.uploader_display())).size(14));
    } else {
        panel = panel.push(text("Selecciona una imagen para ver sus detalles.").size(14));
    }

    container(panel)
        .padding(10)
        .width(Length::Fixed(PREVIEW_WIDTH + 20.0))
        .style(container::rounded_box)
        .into()
}
