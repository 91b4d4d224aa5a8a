use mongodb::bson::{Bson, Document};
use std::collections::BTreeMap;

/// Um registro é um mapa coluna -> valor, validado contra o schema da conta
/// no momento da inserção. O formato nunca é fixado em tipo: cada conta tem
/// suas próprias colunas.
pub type RecordValues = BTreeMap<String, String>;

/// Converte um documento vindo do Record Store em valores de registro,
/// descartando `_id` (identidade de ordem de criação, não é dado do usuário)
/// e quaisquer campos não-string.
pub fn document_to_record(document: Document) -> RecordValues {
    document
        .into_iter()
        .filter(|(key, _)| key != "_id")
        .filter_map(|(key, value)| match value {
            Bson::String(s) => Some((key, s)),
            _ => None,
        })
        .collect()
}

/// Monta o documento a persistir a partir dos valores do registro.
pub fn record_to_document(values: &RecordValues) -> Document {
    let mut document = Document::new();
    for (column, value) in values {
        document.insert(column.clone(), Bson::String(value.clone()));
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn test_document_to_record_skips_id() {
        let document = doc! {
            "_id": ObjectId::new(),
            "name": "Ana",
            "phone": "123",
        };
        let record = document_to_record(document);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("name").map(String::as_str), Some("Ana"));
        assert_eq!(record.get("phone").map(String::as_str), Some("123"));
    }

    #[test]
    fn test_document_to_record_skips_non_string_fields() {
        let document = doc! {
            "name": "Ana",
            "legacy_flag": true,
        };
        let record = document_to_record(document);
        assert_eq!(record.len(), 1);
        assert!(record.contains_key("name"));
    }

    #[test]
    fn test_round_trip() {
        let mut values = RecordValues::new();
        values.insert("name".into(), "Ana".into());
        values.insert("phone".into(), "123".into());
        let document = record_to_document(&values);
        assert_eq!(document_to_record(document), values);
    }
}
