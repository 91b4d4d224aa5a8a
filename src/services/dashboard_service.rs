// ==================== DASHBOARD (CADASTRO + PESQUISA) ====================
// Um único endpoint decide entre cadastrar e pesquisar: com todas as
// colunas preenchidas é cadastro; qualquer coluna em branco vira pesquisa
// com os valores presentes. A completude do formulário é o único
// discriminador.

use crate::database::MongoDB;
use crate::models::RecordValues;
use crate::services::record_service::{self, SearchFilter};
use crate::utils::error::AppError;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
pub enum SubmissionIntent {
    Insert(RecordValues),
    Search(SearchFilter),
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DashboardOutcome {
    pub success: bool,
    /// "inserted" ou "searched"
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<RecordValues>,
}

/// Classifica a submissão a partir do schema corrente e do formulário.
/// Puro, sem I/O: a política do fluxo mora aqui.
pub fn classify_submission(
    columns: &[String],
    form: &HashMap<String, String>,
) -> Result<SubmissionIntent, AppError> {
    if columns.is_empty() {
        return Err(AppError::Validation(
            "Setup not completed: no columns defined".to_string(),
        ));
    }

    let mut values = RecordValues::new();
    let mut complete = true;

    for column in columns {
        match form.get(column).map(|v| v.trim()) {
            Some(value) if !value.is_empty() => {
                values.insert(column.clone(), value.to_string());
            }
            _ => complete = false,
        }
    }

    if complete {
        Ok(SubmissionIntent::Insert(values))
    } else {
        // Só os valores não-vazios entram no filtro
        Ok(SubmissionIntent::Search(values))
    }
}

/// Fluxo do POST /dashboard: cadastro completo insere e devolve a listagem
/// atual; formulário parcial pesquisa com os valores presentes.
pub async fn submit_or_search(
    db: &MongoDB,
    email: &str,
    columns: &[String],
    form: &HashMap<String, String>,
) -> Result<DashboardOutcome, AppError> {
    match classify_submission(columns, form)? {
        SubmissionIntent::Insert(values) => {
            record_service::insert(db, email, columns, &values).await?;
            let data = record_service::list_all(db, email).await?;

            Ok(DashboardOutcome {
                success: true,
                action: "inserted".to_string(),
                message: Some("Dados cadastrados com sucesso!".to_string()),
                columns: columns.to_vec(),
                data,
            })
        }
        SubmissionIntent::Search(filter) => {
            log::info!("🔍 Search for {} with {} column filter(s)", email, filter.len());
            let data = record_service::search(db, email, &filter).await?;

            Ok(DashboardOutcome {
                success: true,
                action: "searched".to_string(),
                message: None,
                columns: columns.to_vec(),
                data,
            })
        }
    }
}
