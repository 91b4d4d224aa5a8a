use crate::database::MongoDB;
use crate::middleware::session_user;
use crate::services::directory_service;
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetupRequest {
    /// Lista ordenada de nomes de coluna; entradas em branco são descartadas
    pub columns: Vec<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SetupResponse {
    pub success: bool,
    pub columns: Vec<String>,
}

/// GET /setup - schema corrente da conta (vazio antes do primeiro setup)
pub async fn get_setup(db: web::Data<MongoDB>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;
    let columns = directory_service::cached_columns(&db, &user.email).await?;

    Ok(HttpResponse::Ok().json(SetupResponse {
        success: true,
        columns,
    }))
}

#[utoipa::path(
    post,
    path = "/setup",
    tag = "Setup",
    request_body = SetupRequest,
    responses(
        (status = 200, description = "Schema saved", body = SetupResponse),
        (status = 400, description = "Empty column list"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn post_setup(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    body: web::Json<SetupRequest>,
) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;
    log::info!("⚙️  POST /setup - {} column(s) for {}", body.columns.len(), user.email);

    // Lista vazia é erro e nada é persistido; compartilhamentos já
    // recebidos são preservados em re-setup
    let columns = directory_service::upsert_schema(&db, &user.email, &body.columns).await?;

    Ok(HttpResponse::Ok().json(SetupResponse {
        success: true,
        columns,
    }))
}
