use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use uuid::Uuid;

/// User ID extracted from JWT
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

/// Group grants extracted from JWT claims
#[derive(Debug, Clone, Default)]
pub struct Groups(pub Vec<String>);

impl Groups {
    pub fn has(&self, grant: &str) -> bool {
        self.0.iter().any(|g| g == grant)
    }
}

/// JWT Authentication Middleware
///
/// Requests without an Authorization header pass through anonymously, so
/// read endpoints stay public. When a Bearer token is present it must
/// validate; `UserId` and `Groups` are then inserted into the request
/// extensions and write handlers enforce grants via the `Groups` extractor.
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            if let Some(auth_header) = auth_header {
                let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Invalid Authorization header format")
                })?;

                let token_data = crate::jwt::validate_token(token).map_err(|e| {
                    tracing::warn!("JWT validation failed: {}", e);
                    actix_web::error::ErrorUnauthorized(format!("Invalid token: {}", e))
                })?;

                let user_id = Uuid::parse_str(&token_data.claims.sub).map_err(|e| {
                    tracing::error!("Invalid user_id UUID in token: {}", e);
                    actix_web::error::ErrorUnauthorized("Invalid token: malformed user_id")
                })?;

                req.extensions_mut().insert(UserId(user_id));
                req.extensions_mut()
                    .insert(Groups(token_data.claims.groups.clone()));
            }

            service.call(req).await
        })
    }
}

impl actix_web::FromRequest for UserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<UserId>() {
            Some(user_id) => ready(Ok(*user_id)),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}

impl actix_web::FromRequest for Groups {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<Groups>() {
            Some(groups) => ready(Ok(groups.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_has_matches_exact_grant() {
        let groups = Groups(vec!["feed:curate".to_string()]);
        assert!(groups.has("feed:curate"));
        assert!(!groups.has("websites:curate"));
        assert!(!groups.has("feed"));
    }
}
