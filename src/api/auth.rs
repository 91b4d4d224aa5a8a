use crate::database::MongoDB;
use crate::middleware::session_user;
use crate::services::identity_service::{self, AuthUrlResponse, VerifiedIdentity};
use crate::services::{directory_service, session_service};
use crate::utils::cache;
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    #[allow(dead_code)]
    pub state: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthCallbackResponse {
    pub success: bool,
    pub token: String,
    /// true quando a conta ainda não definiu colunas (ir para /setup)
    pub needs_setup: bool,
    pub columns: Vec<String>,
    #[schema(value_type = Object)]
    pub user: VerifiedIdentity,
}

/// GET / - landing: aponta para o login e para a documentação
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "webdata-service",
        "version": env!("CARGO_PKG_VERSION"),
        "login": "/login",
        "docs": "/swagger-ui/",
    }))
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Google consent URL to redirect the browser to", body = AuthUrlResponse),
        (status = 401, description = "OAuth not configured")
    )
)]
pub async fn login() -> Result<HttpResponse, AppError> {
    log::info!("🔐 GET /login");
    let response = identity_service::authorize_url()?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /auth - callback do OAuth: troca o code, resolve a conta e abre a
/// sessão. Conta sem schema ainda é sinalizada com needs_setup.
pub async fn authorize(
    db: web::Data<MongoDB>,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔑 GET /auth - exchanging authorization code");

    let identity = identity_service::handle_callback(&query.code).await?;

    let account = directory_service::find_account(&db, &identity.email).await?;
    let (columns, needs_setup) = match account {
        Some(account) if account.has_schema() => (account.columns, false),
        _ => (Vec::new(), true),
    };

    // Aquece o cache de schema para a sessão que está nascendo
    cache::set_cached_columns(&identity.email, columns.clone());

    let token = session_service::create_session(&identity)?;

    log::info!("✅ Login successful: {} (needs_setup: {})", identity.email, needs_setup);

    Ok(HttpResponse::Ok().json(AuthCallbackResponse {
        success: true,
        token,
        needs_setup,
        columns,
        user: identity,
    }))
}

/// GET /logout - destrói a sessão server-side e o schema em cache
pub async fn logout(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;

    session_service::end_session(&user);
    log::info!("👋 Logout: {}", user.email);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Logged out"
    })))
}
