//! Dropdown option catalog.
//!
//! Editor forms need id/label pairs for classes, teachers, classrooms
//! and courses. Each list is pulled once with a large page size and
//! cached for a few minutes; expired entries are refetched on the next
//! use.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use eduadmin_api::{ClassQuery, ClassroomQuery, Client, CourseQuery, Query, TeacherQuery};

use crate::error::AdminError;

/// Page size used when pulling a whole list for a dropdown.
const OPTION_PAGE_SIZE: i64 = 100;

const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// One selectable entry of a dropdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionItem {
    pub id: i64,
    pub label: String,
}

struct CatalogEntry {
    options: Arc<Vec<OptionItem>>,
    expires_at: Instant,
}

/// Caching source of dropdown options, shared by all editors.
pub struct OptionCatalog {
    client: Arc<Client>,
    store: DashMap<&'static str, CatalogEntry>,
    ttl: Duration,
}

impl OptionCatalog {
    pub fn new(client: Arc<Client>) -> Self {
        Self::with_ttl(client, DEFAULT_TTL)
    }

    pub fn with_ttl(client: Arc<Client>, ttl: Duration) -> Self {
        Self {
            client,
            store: DashMap::new(),
            ttl,
        }
    }

    fn cached(&self, key: &'static str) -> Option<Arc<Vec<OptionItem>>> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.options.clone())
    }

    fn insert(&self, key: &'static str, options: Vec<OptionItem>) -> Arc<Vec<OptionItem>> {
        let options = Arc::new(options);
        self.store.insert(
            key,
            CatalogEntry {
                options: options.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        options
    }

    /// Drops every cached list. Called after a record is added or
    /// removed so the next editor sees it.
    pub fn invalidate(&self) {
        self.store.clear();
    }

    /// Class choices, labeled by class name.
    pub async fn class_options(&self) -> Result<Arc<Vec<OptionItem>>, AdminError> {
        if let Some(options) = self.cached("classes") {
            return Ok(options);
        }
        let query = ClassQuery::default().with_page_size(OPTION_PAGE_SIZE);
        let resp = self.client.get_classes(&query).await?;
        let options = resp
            .items
            .into_iter()
            .map(|class| OptionItem {
                id: class.id,
                label: class.class_name,
            })
            .collect();
        Ok(self.insert("classes", options))
    }

    /// Teacher choices, labeled by name with the title in parentheses.
    pub async fn teacher_options(&self) -> Result<Arc<Vec<OptionItem>>, AdminError> {
        if let Some(options) = self.cached("teachers") {
            return Ok(options);
        }
        let query = TeacherQuery::default().with_page_size(OPTION_PAGE_SIZE);
        let resp = self.client.get_teachers(&query).await?;
        let options = resp
            .items
            .into_iter()
            .map(|teacher| {
                let label = match teacher.title {
                    Some(title) => format!("{} ({})", teacher.full_name, title),
                    None => teacher.full_name,
                };
                OptionItem {
                    id: teacher.id,
                    label,
                }
            })
            .collect();
        Ok(self.insert("teachers", options))
    }

    /// Classroom choices, labeled by room name with the location in
    /// parentheses.
    pub async fn classroom_options(&self) -> Result<Arc<Vec<OptionItem>>, AdminError> {
        if let Some(options) = self.cached("classrooms") {
            return Ok(options);
        }
        let query = ClassroomQuery::default().with_page_size(OPTION_PAGE_SIZE);
        let resp = self.client.get_classrooms(&query).await?;
        let options = resp
            .items
            .into_iter()
            .map(|room| {
                let label = match room.location {
                    Some(location) => format!("{} ({})", room.name, location),
                    None => room.name,
                };
                OptionItem {
                    id: room.id,
                    label,
                }
            })
            .collect();
        Ok(self.insert("classrooms", options))
    }

    /// Course choices, labeled by catalog code and name.
    pub async fn course_options(&self) -> Result<Arc<Vec<OptionItem>>, AdminError> {
        if let Some(options) = self.cached("courses") {
            return Ok(options);
        }
        let query = CourseQuery::default().with_page_size(OPTION_PAGE_SIZE);
        let resp = self.client.get_courses(&query).await?;
        let options = resp
            .courses
            .into_iter()
            .map(|course| {
                let label = match course.course_code {
                    Some(code) => format!("{} {}", code, course.course_name),
                    None => course.course_name,
                };
                OptionItem {
                    id: course.id,
                    label,
                }
            })
            .collect();
        Ok(self.insert("courses", options))
    }
}
