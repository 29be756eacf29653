use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

/// Draw `content` over `base` on a dimmed overlay.
///
/// Presses on the overlay emit `on_blur`; the inner `opaque` keeps presses
/// on the content from reaching the overlay.
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
