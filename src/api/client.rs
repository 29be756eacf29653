use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::models::{
    CarImageRecord, CarUpload, FloorUpload, ImageRecord, LocalFile, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest,
};
use super::ImageApi;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Body of backend failures: `{ "error": "..." }`
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// The one HTTP client of the application.
///
/// Every request built here carries `Authorization: Bearer <token>` when a
/// session token is stored. Errors are handed back untouched; there is no
/// retry, backoff or timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("site-photos/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base: Url::parse(base_url)?,
            http,
            session,
        })
    }

    /// Resolve a server-relative path (`/uploads/a.jpg`) against the base origin
    pub fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Start a request with the bearer token attached, if any.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.resolve(path)?;
        debug!("→ {} {}", method, url);

        let builder = self.http.request(method, url);
        Ok(match self.session.current() {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = server_error(status.as_u16(), &body);
        warn!("⚠️  {}", err);
        Err(err)
    }

    async fn floor_form(upload: &FloorUpload) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for file in &upload.files {
            form = form
                .part("file", file_part(file).await?)
                .text("last_modified", file.last_modified_ms.to_string());
        }
        Ok(form.text("piso", upload.floor.raw().to_string()))
    }

    async fn car_form(upload: &CarUpload) -> Result<Form, ApiError> {
        let mut form = Form::new().text("plate", upload.plate.clone());
        for (section, file) in &upload.files {
            form = form
                .part("images", file_part(file).await?)
                .text("section", section.wire());
        }
        Ok(form)
    }
}

/// Turn a failed response into an error, keeping the server's `error` text.
pub fn server_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty());
    ApiError::Server { status, message }
}

async fn file_part(file: &LocalFile) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ApiError::LocalFile {
            path: file.path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(Part::bytes(bytes)
        .file_name(file.file_name.clone())
        .mime_str(crate::files::mime_for(&file.path))?)
}

#[async_trait]
impl ImageApi for ApiClient {
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = self.request(Method::POST, "/login")?.json(&request);
        Ok(self.send(builder).await?.json().await?)
    }

    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/register")?.json(&request);
        self.send(builder).await?;
        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError> {
        let builder = self.request(Method::GET, "/images")?;
        Ok(self.send(builder).await?.json().await?)
    }

    async fn list_car_images(&self, date: Option<NaiveDate>) -> Result<Vec<CarImageRecord>, ApiError> {
        let mut builder = self.request(Method::GET, "/get_car_images")?;
        if let Some(date) = date {
            builder = builder.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        Ok(self.send(builder).await?.json().await?)
    }

    async fn upload_floor_images(&self, upload: FloorUpload) -> Result<MessageResponse, ApiError> {
        let form = Self::floor_form(&upload).await?;
        let builder = self.request(Method::POST, "/upload")?.multipart(form);
        let response = self.send(builder).await?;
        Ok(response.json().await.unwrap_or_default())
    }

    async fn upload_car_images(&self, upload: CarUpload) -> Result<MessageResponse, ApiError> {
        let form = Self::car_form(&upload).await?;
        let builder = self.request(Method::POST, "/upload_car_images")?.multipart(form);
        let response = self.send(builder).await?;
        Ok(response.json().await.unwrap_or_default())
    }

    async fn fetch_image(&self, path: String) -> Result<Vec<u8>, ApiError> {
        let builder = self.request(Method::GET, &path)?;
        Ok(self.send(builder).await?.bytes().await?.to_vec())
    }
}
