//! CORS allow-list middleware.
//!
//! Requests carrying an `Origin` outside the configured list are rejected with
//! 403 before any handler runs. An empty list allows every origin, and
//! requests without an `Origin` header always pass.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{
        Method,
        header::{self, HeaderValue},
    },
};
use folio_shared::ErrorResponse;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use super::admin::ADMIN_SECRET_HEADER;

const ALLOWED_METHODS: &str = "GET, POST, PUT, OPTIONS";

/// CORS middleware factory.
#[derive(Clone)]
pub struct CorsAllowList {
    origins: Arc<Vec<String>>,
}

impl CorsAllowList {
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins: Arc::new(origins),
        }
    }

    fn permits(origins: &[String], origin: &str) -> bool {
        origins.is_empty() || origins.iter().any(|allowed| allowed == origin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsAllowList
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CorsAllowListService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsAllowListService {
            service,
            origins: self.origins.clone(),
        }))
    }
}

pub struct CorsAllowListService<S> {
    service: S,
    origins: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for CorsAllowListService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(origin) = req.headers().get(header::ORIGIN).cloned() else {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        };

        // An origin that is not valid UTF-8 can never match the list.
        let permitted = CorsAllowList::permits(&self.origins, origin.to_str().unwrap_or_default());

        if !permitted {
            tracing::warn!(origin = ?origin, "Rejected request from disallowed origin");

            let response = HttpResponse::Forbidden()
                .json(ErrorResponse::forbidden("Not allowed by CORS"));
            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        if *req.method() == Method::OPTIONS {
            let response = HttpResponse::NoContent()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
                .insert_header((header::VARY, "Origin"))
                .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
                .insert_header((
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    format!("content-type, {}", ADMIN_SECRET_HEADER),
                ))
                .finish();
            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;

            let headers = res.headers_mut();
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.insert(header::VARY, HeaderValue::from_static("Origin"));

            Ok(res.map_into_left_body())
        })
    }
}
