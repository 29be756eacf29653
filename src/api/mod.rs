/// Backend REST API
///
/// - Wire records and payloads (models.rs)
/// - The reqwest-backed client that injects the bearer token (client.rs)
///
/// View-model flows talk to the `ImageApi` trait so they can run against a
/// recording fake in tests.

pub mod client;
pub mod models;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ApiError;
use models::{
    CarImageRecord, CarUpload, FloorUpload, ImageRecord, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest,
};

pub use client::ApiClient;

/// Operations the client performs against the backend
#[async_trait]
pub trait ImageApi: Send + Sync {
    /// `POST /login`
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /register`
    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError>;

    /// `GET /images`
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError>;

    /// `GET /get_car_images`, optionally restricted to one upload day
    async fn list_car_images(&self, date: Option<NaiveDate>) -> Result<Vec<CarImageRecord>, ApiError>;

    /// `POST /upload` (multipart)
    async fn upload_floor_images(&self, upload: FloorUpload) -> Result<MessageResponse, ApiError>;

    /// `POST /upload_car_images` (multipart)
    async fn upload_car_images(&self, upload: CarUpload) -> Result<MessageResponse, ApiError>;

    /// Raw bytes of a server-relative file path
    async fn fetch_image(&self, path: String) -> Result<Vec<u8>, ApiError>;
}
