use crate::api::dashboard::DashboardListing;
use crate::database::MongoDB;
use crate::middleware::session_user;
use crate::services::{directory_service, record_service};
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

const DEFAULT_HISTORY_LIMIT: i64 = 10;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "Dashboard",
    params(("limit" = Option<i64>, Query, description = "Máximo de registros (default 10)")),
    responses(
        (status = 200, description = "Most recent records, newest first", body = DashboardListing),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_history(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let columns = directory_service::cached_columns(&db, &user.email).await?;
    let data = record_service::list_recent(&db, &user.email, limit).await?;

    Ok(HttpResponse::Ok().json(DashboardListing {
        success: true,
        columns,
        data,
    }))
}
