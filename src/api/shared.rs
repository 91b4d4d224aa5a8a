use crate::database::MongoDB;
use crate::middleware::session_user;
use crate::services::sharing_service::{self, SharedCollectionsResponse};
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};

#[utoipa::path(
    get,
    path = "/shared",
    tag = "Sharing",
    responses(
        (status = 200, description = "Collections shared with the viewer, keyed by owner email", body = SharedCollectionsResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_shared(
    db: web::Data<MongoDB>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;
    log::info!("👀 GET /shared - {}", user.email);

    let response = sharing_service::shared_collections(&db, &user.email).await?;

    Ok(HttpResponse::Ok().json(response))
}
