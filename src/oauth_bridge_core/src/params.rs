//! Ordered key/value collections backing an [`HttpResponse`](crate::HttpResponse).

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Response parameters, serialized either into the body or a redirect query.
///
/// Keys keep the position of their first insertion; writing an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `application/x-www-form-urlencoded` (spaces become `+`).
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Header mapping with case-insensitive names.
///
/// Setting a header that already exists (under any casing) replaces the value
/// and keeps the original name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_last_write_wins_in_place() {
        let mut params = Parameters::new();
        params.insert("error", "invalid_request");
        params.insert("state", "abc");
        params.insert("error", "access_denied");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("error"), Some("access_denied"));
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["error", "state"]);
    }

    #[test]
    fn test_query_string_is_form_encoded() {
        let params: Parameters = [("state", "a b&c"), ("error", "x")].into_iter().collect();
        assert_eq!(params.to_query_string().unwrap(), "state=a+b%26c&error=x");
    }

    #[test]
    fn test_json_keeps_insertion_order() {
        let params: Parameters = [("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Cache-Control", "no-cache");
        headers.insert("cache-control", "no-store");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("CACHE-CONTROL"), Some("no-store"));
        assert_eq!(headers.iter().next(), Some(("Cache-Control", "no-store")));
    }

    #[test]
    fn test_remove_parameter() {
        let mut params: Parameters = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.remove("a"), Some("1".to_string()));
        assert!(!params.contains_key("a"));
        assert_eq!(params.remove("a"), None);
    }
}
