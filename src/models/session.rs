use serde::{Deserialize, Serialize};

/// Identidade autenticada de uma sessão de navegador, injetada pelo
/// middleware nas extensions da request.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    /// Chave da sessão server-side (jti do token) - removida no logout
    #[serde(skip_serializing)]
    pub session_id: String,
}
