// ==================== IDENTITY PROVIDER (GOOGLE OAUTH) ====================
// Adaptador do provedor de identidade: monta a URL de consentimento e troca
// o authorization code por um email verificado + claims de perfil. O core
// não re-verifica o email devolvido aqui.

use crate::utils::error::AppError;
use serde::Serialize;
use uuid::Uuid;

/// Identidade verificada devolvida ao fim do fluxo de login.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthUrlResponse {
    pub success: bool,
    pub auth_url: String,
    pub state: String,
}

fn get_redirect_uri() -> String {
    std::env::var("GOOGLE_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:3002/auth".to_string())
}

/// Gera a URL de consentimento do Google com state anti-CSRF.
pub fn authorize_url() -> Result<AuthUrlResponse, AppError> {
    let client_id = std::env::var("GOOGLE_CLIENT_ID")
        .map_err(|_| AppError::OAuth("GOOGLE_CLIENT_ID not configured".to_string()))?;
    let redirect_uri = get_redirect_uri();

    let state = Uuid::new_v4().to_string();

    let params = vec![
        ("client_id", client_id.as_str()),
        ("redirect_uri", redirect_uri.as_str()),
        ("response_type", "code"),
        ("scope", "openid email profile"),
        ("state", state.as_str()),
        ("prompt", "select_account"),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let auth_url = format!("https://accounts.google.com/o/oauth2/v2/auth?{}", query_string);

    Ok(AuthUrlResponse {
        success: true,
        auth_url,
        state,
    })
}

/// Troca o authorization code por tokens e busca o userinfo.
pub async fn handle_callback(code: &str) -> Result<VerifiedIdentity, AppError> {
    let client_id = std::env::var("GOOGLE_CLIENT_ID")
        .map_err(|_| AppError::OAuth("GOOGLE_CLIENT_ID not configured".to_string()))?;
    let client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
        .map_err(|_| AppError::OAuth("GOOGLE_CLIENT_SECRET not configured".to_string()))?;
    let redirect_uri = get_redirect_uri();

    // Exchange code for tokens
    let client = reqwest::Client::new();
    let token_response = client
        .post("https://oauth2.googleapis.com/token")
        .form(&[
            ("code", code),
            ("client_id", &client_id),
            ("client_secret", &client_secret),
            ("redirect_uri", &redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| AppError::OAuth(format!("Failed to exchange code: {}", e)))?;

    if !token_response.status().is_success() {
        return Err(AppError::OAuth(
            "Failed to exchange authorization code".to_string(),
        ));
    }

    let tokens: serde_json::Value = token_response
        .json()
        .await
        .map_err(|e| AppError::OAuth(format!("Failed to parse token response: {}", e)))?;

    let access_token = tokens["access_token"]
        .as_str()
        .ok_or_else(|| AppError::OAuth("No access token in response".to_string()))?;

    // Get user info
    let user_info_response = client
        .get("https://www.googleapis.com/oauth2/v2/userinfo")
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| AppError::OAuth(format!("Failed to get user info: {}", e)))?;

    let user_info: serde_json::Value = user_info_response
        .json()
        .await
        .map_err(|e| AppError::OAuth(format!("Failed to parse user info: {}", e)))?;

    let email = user_info["email"]
        .as_str()
        .ok_or_else(|| AppError::OAuth("No email in user info".to_string()))?;

    Ok(VerifiedIdentity {
        email: email.to_string(),
        name: user_info["name"].as_str().map(String::from),
        picture: user_info["picture"].as_str().map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_missing_client_id() {
        // Sem GOOGLE_CLIENT_ID configurado o fluxo falha cedo
        std::env::remove_var("GOOGLE_CLIENT_ID");
        assert!(matches!(authorize_url(), Err(AppError::OAuth(_))));
    }
}
