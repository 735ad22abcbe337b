use futures::future::{ready, Ready};

use actix_web::{http::header, FromRequest, HttpRequest};

use crate::api::{
    auth_utils::bearer_token,
    errors::{AuthError, TodoApiError},
};

/// Raw bearer credential taken from the `Authorization` header.
///
/// Nothing is verified here; the token is handed to the business layer as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct BearerToken(pub String);

/// Implementing `FromRequest` lets handlers take a `BearerToken` argument
/// and have the request rejected with a 401 before the handler body runs
impl FromRequest for BearerToken {
    type Error = TodoApiError;
    // No async work happens while reading a header
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = match req.headers().get(header::AUTHORIZATION) {
            Some(auth_header) => bearer_token(auth_header)
                .map(BearerToken)
                .map_err(TodoApiError::AuthError),
            None => Err(TodoApiError::AuthError(AuthError::NoAuthorizationHeader)),
        };

        ready(result)
    }
}

/// Deref to the token string so handlers can pass `&token` straight through
impl std::ops::Deref for BearerToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod auth_test {
    use super::BearerToken;
    use crate::api::errors::{AuthError, TodoApiError};
    use actix_web::{test::TestRequest, FromRequest};

    #[actix_web::test]
    async fn test_extracts_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();

        let token = BearerToken::extract(&req).await.unwrap();

        assert_eq!(&*token, "abc.def.ghi");
    }

    #[actix_web::test]
    async fn test_missing_header() {
        let req = TestRequest::default().to_http_request();

        let err = BearerToken::extract(&req).await.unwrap_err();

        assert_eq!(err, TodoApiError::AuthError(AuthError::NoAuthorizationHeader));
    }

    #[actix_web::test]
    async fn test_single_part_header() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "abc.def.ghi"))
            .to_http_request();

        let err = BearerToken::extract(&req).await.unwrap_err();

        assert_eq!(
            err,
            TodoApiError::AuthError(AuthError::InvalidAuthorizationHeader)
        );
    }
}
