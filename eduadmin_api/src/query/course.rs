use url::Url;

use super::{common::QueryCommon, Query};

/// Query builder for the `/courses` list endpoint.
#[derive(Default)]
pub struct CourseQuery {
    pub common: QueryCommon,
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub credits: Option<i64>,
}

impl Query for CourseQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(course_name) = &self.course_name {
            url.query_pairs_mut()
                .append_pair("course_name", course_name.as_str());
        };
        if let Some(department) = &self.department {
            url.query_pairs_mut()
                .append_pair("department", department.as_str());
        };
        if let Some(credits) = self.credits {
            url.query_pairs_mut()
                .append_pair("credits", &credits.to_string());
        };
        url
    }
}

impl CourseQuery {
    pub fn with_course_name(mut self, course_name: &str) -> Self {
        self.course_name = Some(course_name.to_string());
        self
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }

    pub fn with_credits(mut self, credits: i64) -> Self {
        self.credits = Some(credits);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{CourseQuery, Query};

    #[test]
    fn test_course_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            CourseQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            CourseQuery::default()
                .with_course_name("Algorithms")
                .with_department("Mathematics")
                .with_credits(4)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=1&course_name=Algorithms&department=Mathematics&credits=4"
        );
    }
}
