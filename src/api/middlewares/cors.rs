use std::rc::Rc;

use futures::{
    future::{ok, ready, LocalBoxFuture, Ready},
    FutureExt,
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{self, HeaderMap, HeaderValue, InvalidHeaderValue},
        Method,
    },
    HttpResponse,
};

const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Authorization, Content-Type";

/// Cross-origin policy applied to every response leaving the app.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub allowed_origin: HeaderValue,
    pub credentials: bool,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        CorsPolicy {
            allowed_origin: HeaderValue::from_static("*"),
            credentials: true,
        }
    }
}

impl CorsPolicy {
    pub fn new(allowed_origin: &str, credentials: bool) -> Result<Self, InvalidHeaderValue> {
        Ok(CorsPolicy {
            allowed_origin: HeaderValue::from_str(allowed_origin)?,
            credentials,
        })
    }

    /// Browsers reject `*` together with credentials, so a wildcard policy
    /// echoes the caller's origin. A concrete origin is always sent as is.
    fn origin_for(&self, request_headers: &HeaderMap) -> (HeaderValue, bool) {
        if self.credentials && self.allowed_origin == "*" {
            if let Some(origin) = request_headers.get(header::ORIGIN) {
                return (origin.clone(), true);
            }
        }

        (self.allowed_origin.clone(), false)
    }

    fn decorate(&self, headers: &mut HeaderMap, origin: HeaderValue, echoed: bool) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);

        if echoed {
            headers.append(header::VARY, HeaderValue::from_static("Origin"));
        }

        if self.credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
    }
}

/// Response-decorating wrapper, applied once around the whole app
pub struct Cors {
    policy: Rc<CorsPolicy>,
}

impl Cors {
    pub fn new(policy: CorsPolicy) -> Self {
        Cors {
            policy: Rc::new(policy),
        }
    }
}

pub struct CorsMiddleware<S> {
    service: S,
    policy: Rc<CorsPolicy>,
}

/// Implement `Transform` to convert `Cors` into `CorsMiddleware`
impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;

    type Error = actix_web::Error;

    type InitError = ();

    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CorsMiddleware {
            service,
            policy: self.policy.clone(),
        })
    }
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;

    type Error = actix_web::Error;

    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let policy = self.policy.clone();
        let (origin, echoed) = policy.origin_for(req.headers());

        let is_preflight = req.method() == Method::OPTIONS
            && req
                .headers()
                .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

        if is_preflight {
            let mut res = HttpResponse::NoContent().finish();
            {
                let headers = res.headers_mut();
                policy.decorate(headers, origin, echoed);
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOWED_METHODS),
                );
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                );
            }

            return Box::pin(ready(Ok(req.into_response(res).map_into_right_body())));
        }

        // Handler and extractor errors already arrive here as responses
        self.service
            .call(req)
            .map(move |res| {
                res.map(|mut res| {
                    policy.decorate(res.headers_mut(), origin, echoed);
                    res.map_into_left_body()
                })
            })
            .boxed_local()
    }
}
