use url::Url;

use crate::types::StudentStatus;

use super::{common::QueryCommon, Query};

/// Query builder for the `/students` list endpoint.
#[derive(Default)]
pub struct StudentQuery {
    pub common: QueryCommon,
    /// Matches against username, full name and email.
    pub search: Option<String>,
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

impl Query for StudentQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        if let Some(class_id) = self.class_id {
            url.query_pairs_mut()
                .append_pair("class_id", &class_id.to_string());
        };
        if let Some(status) = self.status {
            url.query_pairs_mut()
                .append_pair("status", status.to_string().as_str());
        };
        url
    }
}

impl StudentQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_class_id(mut self, class_id: i64) -> Self {
        self.class_id = Some(class_id);
        self
    }

    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{
        query::{Query, StudentQuery},
        types::StudentStatus,
    };

    #[test]
    fn test_student_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            StudentQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            StudentQuery::default()
                .with_search("wang")
                .with_class_id(7)
                .with_status(StudentStatus::Locked)
                .with_page(2)
                .with_page_size(10)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=2&pageSize=10&search=wang&class_id=7&status=locked"
        );
    }
}
