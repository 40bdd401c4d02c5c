//! Query string access where a repeated key resolves to its first value.

use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::request::Parts,
};

/// Decoded query pairs in the order they appeared.
#[derive(Debug, Default)]
pub struct QueryArgs(Vec<(String, String)>);

impl QueryArgs {
    /// First value supplied for `key`; later repeats are ignored.
    pub fn first(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryArgs
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)?;
        Ok(Self(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn args(uri: &str) -> QueryArgs {
        let uri: Uri = uri.parse().unwrap();
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).unwrap();
        QueryArgs(pairs)
    }

    #[test]
    fn test_repeated_key_takes_first_value() {
        let args = args("/ai/getTaskSuggestion?goal=a&goal=b&end=e");
        assert_eq!(args.first("goal").as_deref(), Some("a"));
        assert_eq!(args.first("end").as_deref(), Some("e"));
    }

    #[test]
    fn test_missing_key_and_empty_query() {
        assert_eq!(args("/task?user_id=x").first("finish"), None);
        assert_eq!(args("/task").first("user_id"), None);
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let args = args("/ai/getTaskSuggestion?goal=Write%20a%20book&end=01%2F06%2F2025");
        assert_eq!(args.first("goal").as_deref(), Some("Write a book"));
        assert_eq!(args.first("end").as_deref(), Some("01/06/2025"));
    }

    #[test]
    fn test_empty_value_is_kept() {
        assert_eq!(args("/task?goal_id=&goal_id=abc").first("goal_id").as_deref(), Some(""));
    }
}
