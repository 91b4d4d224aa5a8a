use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Documento da collection global "accounts" - uma entrada por email conhecido.
///
/// Uma conta pode existir antes do setup: quando alguém compartilha com um
/// email ainda não cadastrado, o documento é criado com `columns` vazio.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub columns: Vec<String>,
    // Semântica de conjunto, mantida via $addToSet
    #[serde(default)]
    pub shared_with_me: Vec<String>,
    pub created_at: Option<BsonDateTime>,
    pub updated_at: Option<BsonDateTime>,
}

impl Account {
    pub fn has_schema(&self) -> bool {
        !self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_deserialize_pre_setup_account() {
        // Conta pré-criada como alvo de compartilhamento: sem columns no documento
        let document = doc! {
            "email": "viewer@example.com",
            "shared_with_me": ["owner@example.com"],
        };
        let account: Account = mongodb::bson::from_document(document).unwrap();
        assert!(!account.has_schema());
        assert_eq!(account.shared_with_me, vec!["owner@example.com"]);
    }

    #[test]
    fn test_deserialize_defaults_shared_with_me() {
        let document = doc! {
            "email": "owner@example.com",
            "columns": ["name", "phone"],
        };
        let account: Account = mongodb::bson::from_document(document).unwrap();
        assert!(account.has_schema());
        assert!(account.shared_with_me.is_empty());
    }
}
