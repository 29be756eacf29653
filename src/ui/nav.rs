/// Navigation shell: role-dependent links and logout
use iced::widget::{button, horizontal_space, row, text, Row};
use iced::{Alignment, Element};

use crate::session::{Role, Route};
use crate::Message;

/// Links shown for a role. Unknown or absent roles get none.
pub fn links_for(role: Option<&Role>) -> Vec<Route> {
    match role {
        Some(Role::Admin) => vec![Route::Gallery, Route::Upload, Route::CarUpload, Route::CarGallery],
        Some(Role::Floors) => vec![Route::Upload],
        Some(Role::Cars) => vec![Route::CarUpload],
        Some(Role::Other(_)) | None => Vec::new(),
    }
}

pub fn view<'a>(current: Route, role: Option<&Role>) -> Element<'a, Message> {
    let links = links_for(role).into_iter().map(|route| {
        let link = button(text(route.title()).size(14)).padding([6, 12]);
        let link = if route == current {
            link.style(button::primary)
        } else {
            link.style(button::text).on_press(Message::Navigate(route))
        };
        link.into()
    });

    row![
        button(text("Site Photos").size(18))
            .style(button::text)
            .on_press(Message::Navigate(Route::Home)),
        horizontal_space(),
        Row::with_children(links).spacing(4),
        button(text("Logout").size(14))
            .style(button::secondary)
            .padding([6, 12])
            .on_press(Message::Logout),
    ]
    .spacing(12)
    .padding(10)
    .align_y(Alignment::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::guard::{admits, decide, Decision};
    use crate::session::token::encode_test_token;
    use crate::session::Session;
    use serde_json::json;

    #[test]
    fn test_links_per_role() {
        assert_eq!(links_for(Some(&Role::Admin)).len(), 4);
        assert_eq!(links_for(Some(&Role::Floors)), [Route::Upload]);
        assert_eq!(links_for(Some(&Role::Cars)), [Route::CarUpload]);
        assert!(links_for(Some(&Role::Other("User".into()))).is_empty());
        assert!(links_for(None).is_empty());
    }

    #[test]
    fn test_every_link_passes_the_guard() {
        for role in [Role::Admin, Role::Floors, Role::Cars] {
            let session = Session::new(encode_test_token(&json!({ "role": role.as_str() })));
            for route in links_for(Some(&role)) {
                assert!(admits(route.allowed_roles().unwrap(), &role));
                assert_eq!(decide(route, Some(&session)), Decision::Render);
            }
        }
    }
}
