use crate::database::MongoDB;
use crate::middleware::session_user;
use crate::models::RecordValues;
use crate::services::dashboard_service::{self, DashboardOutcome};
use crate::services::{directory_service, record_service};
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DashboardListing {
    pub success: bool,
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<RecordValues>,
}

/// GET /dashboard - listagem completa da coleção da conta
pub async fn get_dashboard(
    db: web::Data<MongoDB>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;

    let columns = directory_service::cached_columns(&db, &user.email).await?;
    let data = record_service::list_all(&db, &user.email).await?;

    Ok(HttpResponse::Ok().json(DashboardListing {
        success: true,
        columns,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/dashboard",
    tag = "Dashboard",
    request_body(content = Object, description = "Map coluna -> valor; formulário completo cadastra, parcial pesquisa"),
    responses(
        (status = 200, description = "Record inserted or search performed", body = DashboardOutcome),
        (status = 400, description = "Setup not completed"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn post_dashboard(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    form: web::Json<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;
    log::info!("📋 POST /dashboard - {}", user.email);

    let columns = directory_service::cached_columns(&db, &user.email).await?;
    let outcome = dashboard_service::submit_or_search(&db, &user.email, &columns, &form).await?;

    Ok(HttpResponse::Ok().json(outcome))
}
