/// Login and registration forms
use tracing::{error, info};

use super::notice::Notice;
use crate::api::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::ApiError;

const LOGIN_FIELDS: &str = "Introduce usuario y contraseña.";
const LOGIN_FAILED: &str = "Error al iniciar sesión. Por favor, intenta de nuevo.";
const NO_TOKEN: &str = "No se recibió el token JWT. Intenta nuevamente.";
pub const LOGIN_OK: &str = "Inicio de sesión exitoso!";
pub const NO_ACCESS: &str = "Tu usuario no tiene acceso a ninguna sección.";
const REGISTER_FIELDS: &str = "Completa todos los campos.";
const REGISTER_FAILED: &str =
    "Error al registrar usuario. Por favor, verifica los datos e inténtalo de nuevo.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn begin_submit(&self) -> Result<LoginRequest, Notice> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(Notice::error(LOGIN_FIELDS));
        }
        Ok(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// The token to store on success, or the notice to show.
    ///
    /// The password is cleared either way.
    pub fn finish_submit(&mut self, result: Result<LoginResponse, ApiError>) -> Result<String, Notice> {
        self.password.clear();
        match result {
            Ok(LoginResponse { access_token: Some(token) }) if !token.is_empty() => {
                info!("🔑 Logged in as {}", self.username);
                Ok(token)
            }
            Ok(_) => Err(Notice::error(NO_TOKEN)),
            Err(err) => {
                error!("Login failed: {}", err);
                Err(Notice::from_api(&err, LOGIN_FAILED))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub department: String,
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn begin_submit(&self) -> Result<RegisterRequest, Notice> {
        let fields = [&self.name, &self.department, &self.username, &self.password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(Notice::error(REGISTER_FIELDS));
        }
        Ok(RegisterRequest {
            nombre: self.name.trim().to_string(),
            departamento: self.department.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// Success resets the form; failures always use the generic notice.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> Notice {
        match result {
            Ok(()) => {
                *self = Self::default();
                Notice::success("Usuario registrado exitosamente. Ahora puedes iniciar sesión.")
            }
            Err(err) => {
                error!("Registration failed: {}", err);
                Notice::error(REGISTER_FAILED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::api::ImageApi;

    #[tokio::test]
    async fn test_login_returns_token() {
        let api = FakeApi::with_token("abc");
        let mut form = LoginForm { username: " ana ".into(), password: "secret".into() };

        let request = form.begin_submit().unwrap();
        let result = api.login(request).await;
        assert_eq!(form.finish_submit(result), Ok("abc".to_string()));
        assert_eq!(api.calls(), [Call::Login("ana".into())]);
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_login_without_token_in_response() {
        let mut form = LoginForm::default();
        let result = form.finish_submit(Ok(LoginResponse { access_token: None }));
        assert_eq!(result, Err(Notice::error(NO_TOKEN)));
    }

    #[test]
    fn test_login_error_surfaces_server_message() {
        let mut form = LoginForm::default();
        let err = ApiError::Server { status: 401, message: Some("Credenciales inválidas".into()) };
        assert_eq!(form.finish_submit(Err(err)), Err(Notice::error("Error: Credenciales inválidas")));

        let err = ApiError::Transport("refused".into());
        assert_eq!(form.finish_submit(Err(err)), Err(Notice::error(LOGIN_FAILED)));
    }

    #[test]
    fn test_login_requires_fields() {
        let form = LoginForm { username: "ana".into(), password: String::new() };
        assert_eq!(form.begin_submit(), Err(Notice::error(LOGIN_FIELDS)));
    }

    #[test]
    fn test_register_flow() {
        let mut form = RegisterForm {
            name: "Ana".into(),
            department: "Obras".into(),
            username: "ana".into(),
            password: String::new(),
        };
        assert_eq!(form.begin_submit(), Err(Notice::error(REGISTER_FIELDS)));

        form.password = "secret".into();
        let request = form.begin_submit().unwrap();
        assert_eq!(request.nombre, "Ana");
        assert_eq!(request.departamento, "Obras");

        let err = ApiError::Server { status: 400, message: Some("El usuario ya existe".into()) };
        assert_eq!(form.finish_submit(Err(err)), Notice::error(REGISTER_FAILED));
        assert_eq!(form.username, "ana");

        assert_eq!(form.finish_submit(Ok(())).kind, crate::state::notice::NoticeKind::Success);
        assert_eq!(form, RegisterForm::default());
    }
}
