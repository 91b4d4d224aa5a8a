use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WebData Service API",
        version = "1.0.0",
        description = "Coleta de dados multi-tenant com schema de colunas por conta.\n\n**Authentication:** login via Google OAuth (`/login` -> `/auth`); as rotas de conta exigem o token Bearer da sessão.\n\n**Features:**\n- Schema de colunas definido pelo usuário\n- Cadastro e pesquisa no mesmo endpoint (formulário completo cadastra, parcial pesquisa)\n- Histórico dos registros mais recentes\n- Compartilhamento somente-leitura por convite de email"
    ),
    paths(
        crate::api::auth::login,
        crate::api::health::health_check,
        crate::api::setup::post_setup,
        crate::api::dashboard::post_dashboard,
        crate::api::history::get_history,
        crate::api::share::post_share,
        crate::api::shared::get_shared,
    ),
    components(
        schemas(
            crate::services::identity_service::AuthUrlResponse,
            crate::api::auth::AuthCallbackResponse,
            crate::api::setup::SetupRequest,
            crate::api::setup::SetupResponse,
            crate::api::dashboard::DashboardListing,
            crate::services::dashboard_service::DashboardOutcome,
            crate::api::share::ShareRequest,
            crate::services::sharing_service::ShareResponse,
            crate::services::sharing_service::SharedCollection,
            crate::services::sharing_service::SharedCollectionsResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login via Google OAuth e logout da sessão."),
        (name = "Setup", description = "Definição do schema de colunas da conta."),
        (name = "Dashboard", description = "Cadastro, pesquisa e histórico de registros."),
        (name = "Sharing", description = "Convites e visualização de coleções compartilhadas."),
        (name = "Health", description = "Health check do serviço.")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token returned by /auth"))
                        .build(),
                ),
            );
        }
    }
}
