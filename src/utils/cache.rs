// Cache de schemas por email - read-through, invalidado no /setup
use std::collections::HashMap;
use std::sync::RwLock;

lazy_static::lazy_static! {
    static ref SCHEMA_CACHE: RwLock<HashMap<String, Vec<String>>> = RwLock::new(HashMap::new());
}

pub fn get_cached_columns(email: &str) -> Option<Vec<String>> {
    SCHEMA_CACHE.read().ok()?.get(email).cloned()
}

pub fn set_cached_columns(email: &str, columns: Vec<String>) {
    if let Ok(mut cache) = SCHEMA_CACHE.write() {
        cache.insert(email.to_string(), columns);
    }
}

pub fn invalidate_columns(email: &str) {
    if let Ok(mut cache) = SCHEMA_CACHE.write() {
        cache.remove(email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        set_cached_columns("cache-a@test.com", vec!["name".into(), "phone".into()]);
        assert_eq!(
            get_cached_columns("cache-a@test.com"),
            Some(vec!["name".to_string(), "phone".to_string()])
        );
    }

    #[test]
    fn test_miss_returns_none() {
        assert_eq!(get_cached_columns("cache-missing@test.com"), None);
    }

    #[test]
    fn test_invalidate_removes_entry() {
        set_cached_columns("cache-b@test.com", vec!["col".into()]);
        invalidate_columns("cache-b@test.com");
        assert_eq!(get_cached_columns("cache-b@test.com"), None);
    }

    #[test]
    fn test_set_overwrites_previous_schema() {
        set_cached_columns("cache-c@test.com", vec!["old".into()]);
        set_cached_columns("cache-c@test.com", vec!["new1".into(), "new2".into()]);
        assert_eq!(
            get_cached_columns("cache-c@test.com"),
            Some(vec!["new1".to_string(), "new2".to_string()])
        );
    }
}
