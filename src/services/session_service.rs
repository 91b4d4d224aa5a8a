// ==================== SESSION MANAGEMENT ====================
// Sessões de navegador: token JWT (HS256) + tabela de sessões em memória
// chaveada pelo jti. O logout remove o jti, então um token válido cuja
// sessão foi destruída volta a ser rejeitado no servidor.

use crate::models::SessionUser;
use crate::services::identity_service::VerifiedIdentity;
use crate::utils::cache;
use crate::utils::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // email da conta
    pub name: Option<String>,
    pub picture: Option<String>,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
    pub aud: String,
    pub iss: String,
}

lazy_static::lazy_static! {
    static ref SESSIONS: RwLock<HashMap<String, SessionUser>> = RwLock::new(HashMap::new());
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "webdata-service".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "webdata-app".to_string())
}

fn generate_token(identity: &VerifiedIdentity, jti: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: identity.email.clone(),
        name: identity.name.clone(),
        picture: identity.picture.clone(),
        iat,
        exp,
        jti: jti.to_string(),
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| AppError::OAuth(format!("Failed to generate session token: {}", e)))
}

pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[get_jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(get_jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthenticated)
}

/// Cria a sessão server-side e devolve o token que a referencia.
pub fn create_session(identity: &VerifiedIdentity) -> Result<String, AppError> {
    let jti = Uuid::new_v4().to_string();
    let token = generate_token(identity, &jti)?;

    let user = SessionUser {
        email: identity.email.clone(),
        name: identity.name.clone(),
        picture: identity.picture.clone(),
        session_id: jti.clone(),
    };

    if let Ok(mut sessions) = SESSIONS.write() {
        sessions.insert(jti, user);
    }

    Ok(token)
}

/// Resolve um token em uma sessão viva. Token válido com jti já destruído
/// (logout) é tratado como não autenticado.
pub fn resolve_session(token: &str) -> Result<SessionUser, AppError> {
    let claims = verify_token(token)?;

    SESSIONS
        .read()
        .ok()
        .and_then(|sessions| sessions.get(&claims.jti).cloned())
        .ok_or(AppError::Unauthenticated)
}

/// Destrói a sessão (logout). Idempotente.
pub fn destroy_session(session_id: &str) {
    if let Ok(mut sessions) = SESSIONS.write() {
        sessions.remove(session_id);
    }
}

/// Logout completo: destrói a sessão e descarta o schema em cache daquele
/// email - nada do que a sessão aqueceu sobrevive a ela.
pub fn end_session(user: &SessionUser) {
    destroy_session(&user.session_id);
    cache::invalidate_columns(&user.email);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str) -> VerifiedIdentity {
        VerifiedIdentity {
            email: email.to_string(),
            name: Some("Ana".to_string()),
            picture: None,
        }
    }

    #[test]
    fn test_create_then_resolve_session() {
        let token = create_session(&identity("session-a@test.com")).unwrap();
        let user = resolve_session(&token).unwrap();
        assert_eq!(user.email, "session-a@test.com");
        assert_eq!(user.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_resolve_after_destroy_is_unauthenticated() {
        let token = create_session(&identity("session-b@test.com")).unwrap();
        let user = resolve_session(&token).unwrap();

        destroy_session(&user.session_id);

        // Token ainda é um JWT válido, mas a sessão não existe mais
        match resolve_session(&token) {
            Err(AppError::Unauthenticated) => {}
            other => panic!("expected Unauthenticated, got {:?}", other.map(|u| u.email)),
        }
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let token = create_session(&identity("session-c@test.com")).unwrap();
        let user = resolve_session(&token).unwrap();
        destroy_session(&user.session_id);
        destroy_session(&user.session_id);
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        match resolve_session("not-a-token") {
            Err(AppError::Unauthenticated) => {}
            other => panic!("expected Unauthenticated, got {:?}", other.map(|u| u.email)),
        }
    }

    #[test]
    fn test_end_session_destroys_session_and_cached_schema() {
        let token = create_session(&identity("session-e@test.com")).unwrap();
        let user = resolve_session(&token).unwrap();
        cache::set_cached_columns("session-e@test.com", vec!["name".into()]);

        end_session(&user);

        assert!(matches!(resolve_session(&token), Err(AppError::Unauthenticated)));
        assert_eq!(cache::get_cached_columns("session-e@test.com"), None);
    }

    #[test]
    fn test_token_claims_round_trip() {
        let token = create_session(&identity("session-d@test.com")).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "session-d@test.com");
        assert_eq!(claims.aud, get_jwt_audience());
        assert_eq!(claims.iss, get_jwt_issuer());
        assert!(claims.exp > claims.iat);
    }
}
