// Guarda de sessão das rotas com escopo de conta: token Bearer verificado
// e sessão server-side viva são pré-condição dura (401), nunca um crash.

use crate::models::SessionUser;
use crate::services::session_service;
use crate::utils::error::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthService { service }))
    }
}

pub struct SessionAuthService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);

        let user = match token {
            Some(token) => session_service::resolve_session(&token),
            None => Err(AppError::Unauthenticated),
        };

        match user {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            Err(e) => {
                log::warn!("🔒 Unauthenticated request to {}", req.path());
                Box::pin(async move { Err(e.into()) })
            }
        }
    }
}

/// Recupera a identidade injetada pelo middleware.
pub fn session_user(req: &HttpRequest) -> Result<SessionUser, AppError> {
    req.extensions()
        .get::<SessionUser>()
        .cloned()
        .ok_or(AppError::Unauthenticated)
}
