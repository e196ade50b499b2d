use url::Url;

use super::{common::QueryCommon, Query};

/// Query builder for the `/classrooms` list endpoint.
#[derive(Default)]
pub struct ClassroomQuery {
    pub common: QueryCommon,
    /// Matches against room name and location.
    pub search: Option<String>,
    /// Minimum seat count.
    pub capacity: Option<i64>,
}

impl Query for ClassroomQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        if let Some(capacity) = self.capacity {
            url.query_pairs_mut()
                .append_pair("capacity", &capacity.to_string());
        };
        url
    }
}

impl ClassroomQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ClassroomQuery, Query};

    #[test]
    fn test_classroom_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            ClassroomQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            ClassroomQuery::default()
                .with_search("A-3")
                .with_capacity(60)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=1&search=A-3&capacity=60"
        );
    }
}
