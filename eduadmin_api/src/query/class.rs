use url::Url;

use super::{common::QueryCommon, Query};

/// Query builder for the `/classes` list endpoint.
#[derive(Default)]
pub struct ClassQuery {
    pub common: QueryCommon,
    pub class_name: Option<String>,
    pub department: Option<String>,
}

impl Query for ClassQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(class_name) = &self.class_name {
            url.query_pairs_mut()
                .append_pair("class_name", class_name.as_str());
        };
        if let Some(department) = &self.department {
            url.query_pairs_mut()
                .append_pair("department", department.as_str());
        };
        url
    }
}

impl ClassQuery {
    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ClassQuery, Query};

    #[test]
    fn test_class_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            ClassQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            ClassQuery::default()
                .with_page(3)
                .with_page_size(10)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=3&pageSize=10"
        );

        insta::assert_snapshot!(
            ClassQuery::default()
                .with_class_name("CS-2301")
                .with_department("Computer Science")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=1&class_name=CS-2301&department=Computer+Science"
        );
    }
}
