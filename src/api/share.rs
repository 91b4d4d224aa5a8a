use crate::database::MongoDB;
use crate::middleware::session_user;
use crate::services::mail_service::Mailer;
use crate::services::sharing_service::{self, ShareResponse};
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ShareRequest {
    pub share_email: String,
}

#[utoipa::path(
    post,
    path = "/share",
    tag = "Sharing",
    request_body = ShareRequest,
    responses(
        (status = 200, description = "Share edge created; notified=false when the invitation email failed", body = ShareResponse),
        (status = 400, description = "Invalid target email"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn post_share(
    db: web::Data<MongoDB>,
    mailer: web::Data<Mailer>,
    req: HttpRequest,
    body: web::Json<ShareRequest>,
) -> Result<HttpResponse, AppError> {
    let user = session_user(&req)?;
    log::info!("🤝 POST /share - {} -> {}", user.email, body.share_email);

    let response = sharing_service::share(&db, &mailer, &user.email, &body.share_email).await?;

    Ok(HttpResponse::Ok().json(response))
}
