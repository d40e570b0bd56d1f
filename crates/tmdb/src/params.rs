/// Query string for one request. Empty values are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.0.retain(|(k, _)| *k != key);
            self.0.push((key, value));
        }
        self
    }

    pub fn set_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Parameters for `GET /discover/movie`, already in the API's naming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverParams {
    pub page: i64,
    pub with_genres: Option<i64>,
    pub primary_release_year: Option<i32>,
    pub sort_by: Option<String>,
}

impl DiscoverParams {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .set("page", self.page.max(1))
            .set_opt("with_genres", self.with_genres)
            .set_opt("primary_release_year", self.primary_release_year)
            .set_opt("sort_by", self.sort_by.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_dropped() {
        let q = QueryParams::new()
            .set("query", "")
            .set("page", 2)
            .set_opt::<i64>("with_genres", None);
        assert_eq!(q.pairs(), &[("page", "2".to_string())]);
    }

    #[test]
    fn later_value_replaces_earlier() {
        let q = QueryParams::new().set("page", 1).set("page", 3);
        assert_eq!(q.get("page"), Some("3"));
        assert_eq!(q.pairs().len(), 1);
    }

    #[test]
    fn discover_maps_to_api_names() {
        let params = DiscoverParams {
            page: 2,
            with_genres: Some(28),
            primary_release_year: None,
            sort_by: Some("vote_average.desc".into()),
        };
        let q = params.to_query();
        assert_eq!(q.get("page"), Some("2"));
        assert_eq!(q.get("with_genres"), Some("28"));
        assert_eq!(q.get("primary_release_year"), None);
        assert_eq!(q.get("sort_by"), Some("vote_average.desc"));
    }
}
