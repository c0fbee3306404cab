use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("The notification queue could not be read. Error message: `{0}`")]
    StoreUnavailable(String),
}

impl actix_web::error::ResponseError for HubError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body(self.to_string())
    }
}
