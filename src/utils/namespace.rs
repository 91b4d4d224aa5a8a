// Indireção email -> nome de collection do Record Store.
//
// O email nunca é usado cru como nome de collection: a codificação base64
// url-safe é injetiva, usa apenas caracteres válidos para nomes de collection
// e o prefixo "records_" mantém os namespaces de usuário disjuntos das
// collections do sistema ("accounts").
use base64::Engine;

const RECORD_PREFIX: &str = "records_";

pub fn record_collection(email: &str) -> String {
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(email.as_bytes());
    format!("{}{}", RECORD_PREFIX, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_emails_distinct_collections() {
        let a = record_collection("ana@example.com");
        let b = record_collection("ana@example.com.br");
        assert_ne!(a, b);
    }

    #[test]
    fn test_prefix_keeps_user_namespaces_away_from_system_collections() {
        let name = record_collection("accounts");
        assert!(name.starts_with(RECORD_PREFIX));
        assert_ne!(name, "accounts");
    }

    #[test]
    fn test_no_invalid_collection_characters() {
        // '$', '\0' e nomes com '.' têm significado reservado no MongoDB
        let name = record_collection("weird$user.name@ex.com/../accounts");
        assert!(!name.contains('$'));
        assert!(!name.contains('.'));
        assert!(!name.contains('/'));
        assert!(!name.contains('\0'));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            record_collection("ana@example.com"),
            record_collection("ana@example.com")
        );
    }

    #[test]
    fn test_case_sensitive_emails_map_to_different_collections() {
        assert_ne!(record_collection("Ana@example.com"), record_collection("ana@example.com"));
    }
}
