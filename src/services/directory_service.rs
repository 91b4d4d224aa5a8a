// ==================== ACCOUNT DIRECTORY ====================
// Uma entrada por email conhecido: schema de colunas escolhido pelo usuário
// e o conjunto de donos que compartilharam a coleção com essa conta.

use crate::database::{MongoDB, ACCOUNTS_COLLECTION};
use crate::models::Account;
use crate::utils::cache;
use crate::utils::error::AppError;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};

pub async fn find_account(db: &MongoDB, email: &str) -> Result<Option<Account>, AppError> {
    let collection = db.collection::<Account>(ACCOUNTS_COLLECTION);

    collection
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Normaliza a lista de colunas vinda do setup: trim em cada entrada,
/// descarta vazias, preserva a ordem.
pub fn clean_columns(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|col| col.trim().to_string())
        .filter(|col| !col.is_empty())
        .collect()
}

/// Documento de update do setup: `columns` entra no $set, `shared_with_me`
/// apenas no $setOnInsert - refazer o setup preserva os compartilhamentos
/// já recebidos (o caminho de escrita original zerava a lista em toda
/// atualização, comportamento tratado como bug).
fn upsert_schema_update(columns: &[String]) -> Document {
    doc! {
        "$set": {
            "columns": columns.to_vec(),
            "updated_at": BsonDateTime::now(),
        },
        "$setOnInsert": {
            "shared_with_me": [],
            "created_at": BsonDateTime::now(),
        },
    }
}

/// Documento de update da aresta de compartilhamento: $addToSet no conjunto
/// do viewer, $setOnInsert cria a conta implícita com schema vazio.
fn share_edge_update(owner_email: &str) -> Document {
    doc! {
        "$addToSet": { "shared_with_me": owner_email },
        "$setOnInsert": {
            "columns": [],
            "created_at": BsonDateTime::now(),
        },
    }
}

/// Define o schema da conta, criando-a se não existir.
pub async fn upsert_schema(
    db: &MongoDB,
    email: &str,
    columns: &[String],
) -> Result<Vec<String>, AppError> {
    let cleaned = clean_columns(columns);
    if cleaned.is_empty() {
        return Err(AppError::Validation(
            "At least one non-empty column is required".to_string(),
        ));
    }

    let collection = db.collection::<Account>(ACCOUNTS_COLLECTION);

    collection
        .update_one(doc! { "email": email }, upsert_schema_update(&cleaned))
        .upsert(true)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    // Write-through no cache de schema
    cache::set_cached_columns(email, cleaned.clone());

    log::info!("✅ Schema updated for {}: {:?}", email, cleaned);

    Ok(cleaned)
}

/// Adiciona a aresta de compartilhamento owner -> viewer.
///
/// $addToSet dá semântica de conjunto (re-compartilhar é no-op) e é atômico,
/// então escritores concorrentes no mesmo documento não perdem adições.
/// A conta do viewer é criada implicitamente, com schema vazio, se ainda
/// não existir.
pub async fn add_share_edge(
    db: &MongoDB,
    owner_email: &str,
    viewer_email: &str,
) -> Result<(), AppError> {
    let collection = db.collection::<Account>(ACCOUNTS_COLLECTION);

    collection
        .update_one(doc! { "email": viewer_email }, share_edge_update(owner_email))
        .upsert(true)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    log::info!("🔗 Share edge added: {} -> {}", owner_email, viewer_email);

    Ok(())
}

/// Donos que compartilharam com este viewer. Conta inexistente degrada para
/// lista vazia, não erro.
pub async fn list_shared_owners(db: &MongoDB, viewer_email: &str) -> Result<Vec<String>, AppError> {
    Ok(find_account(db, viewer_email)
        .await?
        .map(|account| account.shared_with_me)
        .unwrap_or_default())
}

/// Schema da conta com cache read-through por email.
pub async fn cached_columns(db: &MongoDB, email: &str) -> Result<Vec<String>, AppError> {
    if let Some(columns) = cache::get_cached_columns(email) {
        return Ok(columns);
    }

    let columns = find_account(db, email)
        .await?
        .map(|account| account.columns)
        .unwrap_or_default();

    cache::set_cached_columns(email, columns.clone());

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_columns_trims_and_drops_blanks() {
        let raw = vec![
            "  name ".to_string(),
            "".to_string(),
            "phone".to_string(),
            "   ".to_string(),
        ];
        assert_eq!(clean_columns(&raw), vec!["name", "phone"]);
    }

    #[test]
    fn test_clean_columns_preserves_order() {
        let raw = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        assert_eq!(clean_columns(&raw), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_clean_columns_all_blank_yields_empty() {
        let raw = vec![" ".to_string(), "".to_string()];
        assert!(clean_columns(&raw).is_empty());
    }

    #[test]
    fn test_upsert_schema_update_sets_only_columns() {
        let update = upsert_schema_update(&["name".to_string(), "phone".to_string()]);

        let set = update.get_document("$set").unwrap();
        let columns = set.get_array("columns").unwrap();
        assert_eq!(columns.len(), 2);
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn test_resetup_preserves_received_shares() {
        // shared_with_me só pode aparecer no $setOnInsert: no $set, refazer
        // o setup apagaria os compartilhamentos já recebidos
        let update = upsert_schema_update(&["name".to_string()]);

        let set = update.get_document("$set").unwrap();
        assert!(!set.contains_key("shared_with_me"));

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert!(on_insert.get_array("shared_with_me").unwrap().is_empty());
    }

    #[test]
    fn test_share_edge_update_is_atomic_set_add() {
        let update = share_edge_update("owner@example.com");

        // $addToSet dá idempotência e adição atômica, nunca read-modify-write
        let add = update.get_document("$addToSet").unwrap();
        assert_eq!(add.get_str("shared_with_me").unwrap(), "owner@example.com");
        assert!(!update.contains_key("$set"));
    }

    #[test]
    fn test_share_edge_update_creates_implicit_account_with_empty_schema() {
        let update = share_edge_update("owner@example.com");

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert!(on_insert.get_array("columns").unwrap().is_empty());
        assert!(on_insert.contains_key("created_at"));
        assert!(!on_insert.contains_key("shared_with_me"));
    }
}
