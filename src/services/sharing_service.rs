// ==================== SHARING ====================
// Compartilhamento de coleções: aresta dono -> viewer no diretório de
// contas + convite por email. A aresta é confirmada antes do envio e nunca
// é desfeita por falha de entrega.

use crate::database::MongoDB;
use crate::models::RecordValues;
use crate::services::{directory_service, mail_service::Mailer, record_service};
use crate::utils::error::AppError;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ShareResponse {
    pub success: bool,
    pub message: String,
    /// false quando a aresta foi criada mas o convite não pôde ser enviado
    pub notified: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SharedCollection {
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<RecordValues>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SharedCollectionsResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub shared: HashMap<String, SharedCollection>,
}

pub fn invitation_subject() -> &'static str {
    "Convite para compartilhar coleção"
}

pub fn invitation_body(owner_email: &str) -> String {
    format!(
        "Você foi convidado por {} para acessar a coleção de dados dele. \
         Faça login para aceitar o convite.",
        owner_email
    )
}

fn validate_share_target(owner_email: &str, share_email: &str) -> Result<(), AppError> {
    let share_email = share_email.trim();
    if share_email.is_empty() || !share_email.contains('@') {
        return Err(AppError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    if share_email == owner_email {
        return Err(AppError::Validation(
            "Cannot share a collection with yourself".to_string(),
        ));
    }
    Ok(())
}

/// Mensagem da resposta de compartilhamento: convite entregue, envio
/// desabilitado no ambiente ou falha real de entrega.
fn share_message(mailer_enabled: bool, notified: bool) -> String {
    if notified {
        "Convite enviado com sucesso!".to_string()
    } else if !mailer_enabled {
        "Compartilhamento criado; o envio de convites está desabilitado neste ambiente."
            .to_string()
    } else {
        "Compartilhamento criado, mas o email de convite não pôde ser enviado.".to_string()
    }
}

/// Cria a aresta de compartilhamento e tenta notificar o convidado.
/// O envio é best-effort: falha vira aviso na resposta, nunca rollback.
pub async fn share(
    db: &MongoDB,
    mailer: &Mailer,
    owner_email: &str,
    share_email: &str,
) -> Result<ShareResponse, AppError> {
    validate_share_target(owner_email, share_email)?;
    let share_email = share_email.trim();

    directory_service::add_share_edge(db, owner_email, share_email).await?;

    // Aresta já confirmada; daqui em diante nada pode falhar a request
    let notified = match mailer
        .send(share_email, invitation_subject(), &invitation_body(owner_email))
        .await
    {
        Ok(sent) => sent,
        Err(e) => {
            log::warn!("⚠️  Invitation email to {} failed: {}", share_email, e);
            false
        }
    };

    Ok(ShareResponse {
        success: true,
        message: share_message(mailer.is_enabled(), notified),
        notified,
    })
}

/// Visão somente-leitura das coleções compartilhadas com o viewer:
/// dono -> {schema, registros}. Dono ainda sem setup rende schema e
/// registros vazios.
pub async fn shared_collections(
    db: &MongoDB,
    viewer_email: &str,
) -> Result<SharedCollectionsResponse, AppError> {
    let owners = directory_service::list_shared_owners(db, viewer_email).await?;

    let mut shared = HashMap::new();
    for owner_email in owners {
        let columns = directory_service::find_account(db, &owner_email)
            .await?
            .map(|account| account.columns)
            .unwrap_or_default();

        let data = if columns.is_empty() {
            Vec::new()
        } else {
            record_service::list_all(db, &owner_email).await?
        };

        shared.insert(owner_email, SharedCollection { columns, data });
    }

    Ok(SharedCollectionsResponse {
        success: true,
        shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_body_names_the_inviter() {
        let body = invitation_body("ana@example.com");
        assert!(body.contains("ana@example.com"));
        assert!(body.contains("convidado"));
    }

    #[test]
    fn test_share_target_must_look_like_email() {
        assert!(validate_share_target("a@x.com", "not-an-email").is_err());
        assert!(validate_share_target("a@x.com", "   ").is_err());
        assert!(validate_share_target("a@x.com", "b@y.com").is_ok());
    }

    #[test]
    fn test_cannot_share_with_self() {
        assert!(matches!(
            validate_share_target("a@x.com", "a@x.com"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_share_target_is_trimmed_before_validation() {
        assert!(validate_share_target("a@x.com", "  b@y.com  ").is_ok());
    }

    #[test]
    fn test_share_message_distinguishes_disabled_mailer_from_delivery_failure() {
        assert_eq!(share_message(true, true), "Convite enviado com sucesso!");
        assert!(share_message(false, false).contains("desabilitado"));
        assert!(share_message(true, false).contains("não pôde ser enviado"));
    }
}
