use actix_web::{
    body::BoxBody,
    error::BlockingError,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpResponse, ResponseError,
};
use derive_more::Display;
use diesel::result::Error as DBError;
use serde_json::json;
use std::convert::From;

#[derive(Debug, PartialEq)]
pub enum AuthError {
    ///Token could not be decoded into claims
    InvalidToken,
    NoAuthorizationHeader,
    InvalidAuthorizationHeader,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAuthorizationHeader => {
                write!(f, "Authorization header is not in valid format")
            }
            Self::NoAuthorizationHeader => write!(f, "No Authorization Header"),
            Self::InvalidToken => write!(f, "Invalid JWT Token"),
        }
    }
}

#[derive(Debug, Display, PartialEq)]
pub enum TodoApiError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Database Connection Error")]
    DatabaseConnectionError,

    #[display(fmt = "Authentication Error: {}", _0)]
    AuthError(AuthError),

    #[display(fmt = "{} Not Found", _0)]
    NotFound(String),
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            TodoApiError::InternalServerError | TodoApiError::DatabaseConnectionError => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
            TodoApiError::AuthError(_) => http::StatusCode::UNAUTHORIZED,
            TodoApiError::BadRequest(_) => http::StatusCode::BAD_REQUEST,
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("request failed: {}", self);
        }

        let mut res = HttpResponse::new(status);

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        res.set_body(BoxBody::new(json!({"error": self.to_string()}).to_string()))
    }
}

impl From<AuthError> for TodoApiError {
    fn from(err: AuthError) -> Self {
        TodoApiError::AuthError(err)
    }
}

impl From<serde_json::Error> for TodoApiError {
    fn from(err: serde_json::Error) -> Self {
        TodoApiError::BadRequest(format!("Invalid request body: {}", err))
    }
}

impl From<r2d2::Error> for TodoApiError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("could not check out a database connection: {}", err);
        TodoApiError::DatabaseConnectionError
    }
}

impl From<BlockingError> for TodoApiError {
    fn from(_: BlockingError) -> Self {
        TodoApiError::InternalServerError
    }
}

impl From<DBError> for TodoApiError {
    fn from(error: DBError) -> Self {
        match error {
            DBError::NotFound => TodoApiError::NotFound(String::from("Todo")),
            other => {
                log::error!("database error: {}", other);
                TodoApiError::InternalServerError
            }
        }
    }
}

#[cfg(test)]
mod errors_test {
    use super::{AuthError, TodoApiError};
    use actix_web::{body::MessageBody, http::StatusCode, ResponseError};

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (TodoApiError::InternalServerError, StatusCode::INTERNAL_SERVER_ERROR),
            (TodoApiError::DatabaseConnectionError, StatusCode::INTERNAL_SERVER_ERROR),
            (TodoApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (TodoApiError::NotFound("Todo".into()), StatusCode::NOT_FOUND),
            (
                TodoApiError::AuthError(AuthError::NoAuthorizationHeader),
                StatusCode::UNAUTHORIZED,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{}", error);
        }
    }

    #[test]
    fn test_error_body_is_json() {
        let res = TodoApiError::NotFound("Todo".into()).error_response();

        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = res.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json, serde_json::json!({"error": "Todo Not Found"}));
    }

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err: TodoApiError = diesel::result::Error::NotFound.into();

        assert_eq!(err, TodoApiError::NotFound("Todo".into()));
    }
}
