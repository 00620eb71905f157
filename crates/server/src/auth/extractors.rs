use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use shared_types::{AppError, Role};
use sqlx::{Pool, Postgres};
use std::marker::PhantomData;

use super::jwt::Claims;
use super::roles;

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// A set of portal roles an endpoint accepts.
pub trait RolePolicy: Send + Sync {
    const ALLOWED: &'static [Role];
}

pub struct StaffAccess;

impl RolePolicy for StaffAccess {
    const ALLOWED: &'static [Role] = roles::STAFF_ROLES;
}

pub struct AdminAccess;

impl RolePolicy for AdminAccess {
    const ALLOWED: &'static [Role] = roles::ADMIN_ROLES;
}

/// Extractor that requires authentication AND a stored role accepted by `P`.
/// Returns 401 if unauthenticated, 403 if the role is missing or not allowed.
pub struct RoleRequired<P: RolePolicy> {
    pub claims: Claims,
    pub role: Role,
    _policy: PhantomData<P>,
}

impl<P, S> FromRequestParts<S> for RoleRequired<P>
where
    P: RolePolicy,
    S: Send + Sync,
    Pool<Postgres>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthRequired(claims) = AuthRequired::from_request_parts(parts, state).await?;
        let pool = Pool::<Postgres>::from_ref(state);
        let role = roles::require_role(&pool, claims.sub, P::ALLOWED).await?;

        Ok(RoleRequired {
            claims,
            role,
            _policy: PhantomData,
        })
    }
}
