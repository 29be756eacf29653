/// Recording stand-in for the backend used by view-model tests
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use super::models::{
    CarImageRecord, CarUpload, FloorUpload, ImageRecord, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest,
};
use super::ImageApi;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    ListImages,
    ListCarImages(Option<NaiveDate>),
    UploadFloor(FloorUpload),
    UploadCars(CarUpload),
    FetchImage(String),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    pub token: Option<String>,
    pub images: Vec<ImageRecord>,
    pub car_images: Vec<CarImageRecord>,
    /// Returned by every operation when set
    pub failure: Option<ApiError>,
}

impl FakeApi {
    /// Logins succeed and hand back `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ImageApi for FakeApi {
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record(Call::Login(request.username))?;
        Ok(LoginResponse {
            access_token: self.token.clone(),
        })
    }

    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError> {
        self.record(Call::Register(request.username))
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError> {
        self.record(Call::ListImages)?;
        Ok(self.images.clone())
    }

    async fn list_car_images(&self, date: Option<NaiveDate>) -> Result<Vec<CarImageRecord>, ApiError> {
        self.record(Call::ListCarImages(date))?;
        Ok(self.car_images.clone())
    }

    async fn upload_floor_images(&self, upload: FloorUpload) -> Result<MessageResponse, ApiError> {
        let count = upload.files.len();
        self.record(Call::UploadFloor(upload))?;
        Ok(MessageResponse {
            message: Some(format!("Se subieron exitosamente {count} imágenes")),
        })
    }

    async fn upload_car_images(&self, upload: CarUpload) -> Result<MessageResponse, ApiError> {
        self.record(Call::UploadCars(upload))?;
        Ok(MessageResponse::default())
    }

    async fn fetch_image(&self, path: String) -> Result<Vec<u8>, ApiError> {
        self.record(Call::FetchImage(path))?;
        Ok(Vec::new())
    }
}
