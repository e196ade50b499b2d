use url::Url;

/// Query for the unpaginated `/course-schedules` endpoint: one semester,
/// optionally narrowed to a single teacher, class or classroom.
pub struct ScheduleQuery {
    pub semester: String,
    pub target: Option<ScheduleTarget>,
}

/// The single narrowing filter the timetable screens apply.
#[derive(Clone, Copy)]
pub enum ScheduleTarget {
    Teacher(i64),
    ClassGroup(i64),
    Classroom(i64),
}

impl ScheduleQuery {
    pub fn for_semester(semester: &str) -> Self {
        ScheduleQuery {
            semester: semester.to_string(),
            target: None,
        }
    }

    pub fn with_teacher(mut self, teacher_id: i64) -> Self {
        self.target = Some(ScheduleTarget::Teacher(teacher_id));
        self
    }

    pub fn with_class(mut self, class_id: i64) -> Self {
        self.target = Some(ScheduleTarget::ClassGroup(class_id));
        self
    }

    pub fn with_classroom(mut self, classroom_id: i64) -> Self {
        self.target = Some(ScheduleTarget::Classroom(classroom_id));
        self
    }

    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("semester", self.semester.as_str());
        match self.target {
            Some(ScheduleTarget::Teacher(id)) => {
                url.query_pairs_mut()
                    .append_pair("teacher_id", &id.to_string());
            }
            Some(ScheduleTarget::ClassGroup(id)) => {
                url.query_pairs_mut()
                    .append_pair("class_id", &id.to_string());
            }
            Some(ScheduleTarget::Classroom(id)) => {
                url.query_pairs_mut()
                    .append_pair("classroom_id", &id.to_string());
            }
            None => {}
        }
        url
    }
}
