use url::Url;

use super::{common::QueryCommon, Query};

/// Query builder for the `/teachers` list endpoint.
#[derive(Default)]
pub struct TeacherQuery {
    pub common: QueryCommon,
    /// Matches against staff number, full name and email.
    pub search: Option<String>,
    pub title: Option<String>,
}

impl Query for TeacherQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        if let Some(title) = &self.title {
            url.query_pairs_mut().append_pair("title", title.as_str());
        };
        url
    }
}

impl TeacherQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{Query, TeacherQuery};

    #[test]
    fn test_teacher_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            TeacherQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            TeacherQuery::default()
                .with_search("li")
                .with_title("Professor")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=1&search=li&title=Professor"
        );
    }
}
