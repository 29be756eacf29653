/// Screen views and shared widgets
pub mod auth;
pub mod car_gallery;
pub mod car_upload;
pub mod gallery;
pub mod modal;
pub mod nav;
pub mod remote;
pub mod upload;

use iced::widget::image::Handle;
use iced::widget::{button, center, column, container, image, text, Column};
use iced::{ContentFit, Element, Length};

use crate::state::notice::{NoticeKind, Notices};
use crate::Message;

pub const THUMB_WIDTH: f32 = 160.0;
pub const THUMB_HEIGHT: f32 = 120.0;

/// A fixed-size image, or a grey box while the bytes are still on their way
pub fn thumbnail<'a>(handle: Option<&Handle>, width: f32, height: f32) -> Element<'a, Message> {
    match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(center(text("...").size(12)))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .style(container::bordered_box)
            .into(),
    }
}

/// Stack of notices; pressing one dismisses it
pub fn notice_bar(notices: &Notices) -> Element<'_, Message> {
    let items = notices.iter().enumerate().map(|(index, notice)| {
        let label = text(notice.message.as_str()).size(14);
        let label = match notice.kind {
            NoticeKind::Success => label.style(text::success),
            NoticeKind::Error => label.style(text::danger),
            NoticeKind::Info => label,
        };
        button(container(label).width(Length::Fill).padding(8))
            .style(button::text)
            .on_press(Message::DismissNotice(index))
            .into()
    });

    container(Column::with_children(items).spacing(4))
        .padding([0, 10])
        .width(Length::Fill)
        .into()
}

/// Centered caption used for loading and empty states
pub fn placeholder_text<'a>(caption: &'a str) -> Element<'a, Message> {
    container(column![text(caption).size(16)])
        .padding(40)
        .center_x(Length::Fill)
        .into()
}
