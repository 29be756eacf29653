/// Route guarding
///
/// `decide` is a pure function of the route and the current session: the
/// same inputs always give the same decision.
use super::store::Session;
use super::token::Role;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    /// Entry point; redirects by role
    Home,
    /// Floor photo gallery
    Gallery,
    /// Floor photo upload
    Upload,
    /// Vehicle photo upload
    CarUpload,
    /// Vehicle photo gallery
    CarGallery,
}

impl Route {
    /// Roles admitted by a guarded route, `None` for public routes.
    ///
    /// An empty slice admits any authenticated session.
    pub fn allowed_roles(self) -> Option<&'static [Role]> {
        const ADMIN: &[Role] = &[Role::Admin];
        const FLOORS: &[Role] = &[Role::Admin, Role::Floors];
        const CARS: &[Role] = &[Role::Admin, Role::Cars];
        const ANY: &[Role] = &[];

        match self {
            Route::Login | Route::Register => None,
            Route::Home => Some(ANY),
            Route::Gallery | Route::CarGallery => Some(ADMIN),
            Route::Upload => Some(FLOORS),
            Route::CarUpload => Some(CARS),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Iniciar Sesión",
            Route::Register => "Registro de Usuario",
            Route::Home => "Inicio",
            Route::Gallery => "Galería",
            Route::Upload => "Subir Imágenes",
            Route::CarUpload => "Subir Imágenes de Coches",
            Route::CarGallery => "Galería de Autos",
        }
    }
}

/// Outcome of guarding a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Show the route
    Render,
    /// Show another route instead
    Redirect(Route),
    /// The stored token cannot be decoded; drop it and go to login
    Reject,
}

impl Decision {
    /// The route that ends up on screen
    pub fn target(&self, requested: Route) -> Route {
        match self {
            Decision::Render => requested,
            Decision::Redirect(route) => *route,
            Decision::Reject => Route::Login,
        }
    }
}

/// Decide whether the session may see the route.
pub fn decide(route: Route, session: Option<&Session>) -> Decision {
    let Some(allowed) = route.allowed_roles() else {
        return Decision::Render;
    };

    let Some(session) = session else {
        return Decision::Redirect(Route::Login);
    };

    let role = match session.role() {
        Ok(role) => role,
        Err(_) => return Decision::Reject,
    };

    if route == Route::Home {
        return Decision::Redirect(home_for(&role));
    }

    if !admits(allowed, &role) {
        return Decision::Redirect(Route::Login);
    }

    Decision::Render
}

/// Whether a role list admits a role. Empty lists admit everyone.
pub fn admits(allowed: &[Role], role: &Role) -> bool {
    allowed.is_empty() || allowed.contains(role)
}

/// Landing route after login
pub fn home_for(role: &Role) -> Route {
    match role {
        Role::Cars => Route::CarUpload,
        _ => Route::Upload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::token::encode_test_token;
    use serde_json::json;

    const GUARDED: [Route; 4] = [Route::Gallery, Route::Upload, Route::CarUpload, Route::CarGallery];

    fn session_for(role: &str) -> Session {
        Session::new(encode_test_token(&json!({ "sub": "u", "role": role })))
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        for route in GUARDED {
            assert_eq!(decide(route, None), Decision::Redirect(Route::Login));
        }
        assert_eq!(decide(Route::Home, None), Decision::Redirect(Route::Login));
    }

    #[test]
    fn test_undecodable_role_never_renders() {
        let sessions = [
            Session::new("garbage"),
            Session::new(encode_test_token(&json!({ "sub": "u" }))),
            Session::new(encode_test_token(&json!({ "role": ["Admin"] }))),
        ];
        for session in &sessions {
            for route in GUARDED {
                let decision = decide(route, Some(session));
                assert_eq!(decision, Decision::Reject);
                assert_eq!(decision.target(route), Route::Login);
            }
        }
    }

    #[test]
    fn test_role_matrix() {
        let roles = [Role::Admin, Role::Floors, Role::Cars];
        for role in &roles {
            let session = session_for(role.as_str());
            for route in GUARDED {
                let allowed = route.allowed_roles().unwrap();
                let expected = if admits(allowed, role) {
                    Decision::Render
                } else {
                    Decision::Redirect(Route::Login)
                };
                assert_eq!(decide(route, Some(&session)), expected, "{role} on {route:?}");
            }
        }
    }

    #[test]
    fn test_empty_role_list_admits_everyone() {
        for role in [Role::Admin, Role::Floors, Role::Cars, Role::Other("User".into())] {
            assert!(admits(&[], &role));
        }
        assert!(!admits(&[Role::Admin], &Role::Other("User".into())));
    }

    #[test]
    fn test_public_routes_always_render() {
        assert_eq!(decide(Route::Login, None), Decision::Render);
        assert_eq!(decide(Route::Register, Some(&Session::new("garbage"))), Decision::Render);
    }

    #[test]
    fn test_home_redirects_by_role() {
        assert_eq!(decide(Route::Home, Some(&session_for("coches"))), Decision::Redirect(Route::CarUpload));
        assert_eq!(decide(Route::Home, Some(&session_for("pisos"))), Decision::Redirect(Route::Upload));
        assert_eq!(decide(Route::Home, Some(&session_for("Admin"))), Decision::Redirect(Route::Upload));
    }

    #[test]
    fn test_decision_is_idempotent() {
        let session = session_for("pisos");
        for route in GUARDED {
            assert_eq!(decide(route, Some(&session)), decide(route, Some(&session)));
        }
    }

    #[test]
    fn test_floor_uploader_scenario() {
        let session = session_for("pisos");
        assert_eq!(decide(Route::Upload, Some(&session)), Decision::Render);
        assert_eq!(decide(Route::Gallery, Some(&session)), Decision::Redirect(Route::Login));
        assert_eq!(decide(Route::CarGallery, Some(&session)), Decision::Redirect(Route::Login));
        assert_eq!(decide(Route::CarUpload, Some(&session)), Decision::Redirect(Route::Login));
    }
}
