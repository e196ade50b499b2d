use chrono::NaiveDate;
use url::Url;

use super::{common::QueryCommon, Query};

/// Query builder for the `/logs` list endpoint.
#[derive(Default)]
pub struct LogQuery {
    pub common: QueryCommon,
    /// Action tag filter, e.g. "user.login".
    pub action: Option<String>,
    pub user_id: Option<i64>,
    /// Only logs at or after this date.
    pub start_date: Option<NaiveDate>,
}

impl Query for LogQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(action) = &self.action {
            url.query_pairs_mut().append_pair("action", action.as_str());
        };
        if let Some(user_id) = self.user_id {
            url.query_pairs_mut()
                .append_pair("user_id", &user_id.to_string());
        };
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("start_date", &start_date.to_string());
        };
        url
    }
}

impl LogQuery {
    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use url::Url;

    use crate::query::{LogQuery, Query};

    #[test]
    fn test_log_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            LogQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            LogQuery::default()
                .with_page_size(15)
                .with_action("user.login")
                .with_user_id(42)
                .with_start_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=1&pageSize=15&action=user.login&user_id=42&start_date=2025-06-01"
        );
    }
}
