// ==================== PER-ACCOUNT RECORD STORE ====================
// Um dataset de schema dinâmico por conta, em uma collection própria cujo
// nome vem da indireção email -> namespace (utils::namespace). Registros
// nunca são editados nem removidos; a ordem de criação fica no _id.

use crate::database::MongoDB;
use crate::models::{document_to_record, record_to_document, RecordValues};
use crate::utils::error::AppError;
use crate::utils::namespace::record_collection;
use crate::utils::pattern::escape_regex;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use std::collections::BTreeMap;

/// Filtro de busca: coluna -> padrão de substring.
pub type SearchFilter = BTreeMap<String, String>;

/// Valida um registro contra o schema corrente: toda coluna precisa estar
/// presente com valor não-vazio no momento da inserção.
pub fn validate_record(columns: &[String], values: &RecordValues) -> Result<(), AppError> {
    for column in columns {
        match values.get(column) {
            Some(value) if !value.trim().is_empty() => {}
            _ => {
                return Err(AppError::Validation(format!(
                    "Column '{}' must have a non-empty value",
                    column
                )))
            }
        }
    }
    Ok(())
}

/// Monta o documento de busca: substring case-insensitive por coluna.
/// O padrão é escapado - o usuário digita texto, não regex. Filtro vazio
/// vira scan completo ("listar tudo").
pub fn build_search_filter(filter: &SearchFilter) -> Document {
    let mut query = Document::new();
    for (column, pattern) in filter {
        query.insert(
            column.clone(),
            doc! { "$regex": escape_regex(pattern), "$options": "i" },
        );
    }
    query
}

pub async fn insert(
    db: &MongoDB,
    email: &str,
    columns: &[String],
    values: &RecordValues,
) -> Result<(), AppError> {
    validate_record(columns, values)?;

    let collection = db.collection::<Document>(&record_collection(email));

    collection
        .insert_one(record_to_document(values))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    log::info!("📝 Record inserted for {}", email);

    Ok(())
}

pub async fn search(
    db: &MongoDB,
    email: &str,
    filter: &SearchFilter,
) -> Result<Vec<RecordValues>, AppError> {
    let collection = db.collection::<Document>(&record_collection(email));

    let cursor = collection
        .find(build_search_filter(filter))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let documents: Vec<Document> = cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(documents.into_iter().map(document_to_record).collect())
}

pub async fn list_all(db: &MongoDB, email: &str) -> Result<Vec<RecordValues>, AppError> {
    search(db, email, &SearchFilter::new()).await
}

/// Registros em ordem reversa de inserção (_id decrescente), no máximo `limit`.
pub async fn list_recent(
    db: &MongoDB,
    email: &str,
    limit: i64,
) -> Result<Vec<RecordValues>, AppError> {
    let collection = db.collection::<Document>(&record_collection(email));

    let cursor = collection
        .find(doc! {})
        .sort(doc! { "_id": -1 })
        .limit(limit)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let documents: Vec<Document> = cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(documents.into_iter().map(document_to_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<String> {
        vec!["name".to_string(), "phone".to_string()]
    }

    fn record(pairs: &[(&str, &str)]) -> RecordValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        let values = record(&[("name", "Ana"), ("phone", "123")]);
        assert!(validate_record(&schema(), &values).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_column() {
        let values = record(&[("name", "Ana")]);
        assert!(matches!(
            validate_record(&schema(), &values),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_value() {
        let values = record(&[("name", "Ana"), ("phone", "   ")]);
        assert!(matches!(
            validate_record(&schema(), &values),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_empty_schema_accepts_anything() {
        // Sem colunas não há o que validar; o dashboard barra esse caso antes
        let values = record(&[]);
        assert!(validate_record(&[], &values).is_ok());
    }

    #[test]
    fn test_build_search_filter_case_insensitive_substring() {
        let filter: SearchFilter = record(&[("name", "an")]);
        let query = build_search_filter(&filter);

        let clause = query.get_document("name").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), "an");
        assert_eq!(clause.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_search_filter_escapes_user_input() {
        let filter: SearchFilter = record(&[("name", "a.*b")]);
        let query = build_search_filter(&filter);

        let clause = query.get_document("name").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), "a\\.\\*b");
    }

    #[test]
    fn test_build_search_filter_empty_is_full_scan() {
        assert!(build_search_filter(&SearchFilter::new()).is_empty());
    }

    #[test]
    fn test_build_search_filter_one_clause_per_column() {
        let filter: SearchFilter = record(&[("name", "an"), ("phone", "12")]);
        let query = build_search_filter(&filter);
        assert_eq!(query.len(), 2);
    }
}
