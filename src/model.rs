use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One authenticated student's full academic history, as returned by
/// `GET /dashboard?json=1`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AcademicRecord {
    pub username: String,
    pub sgpa: f64,
    pub semesters: Vec<SemesterRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_semester: Option<u32>,
    /// SGPA of every semester, oldest first. The server sends it but the
    /// renderer derives its own series from `semesters`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub growth: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SemesterRecord {
    pub sgpa: f64,
    /// Pre-computed by the server; never checked against `marks`.
    pub total: f64,
    pub subjects: Vec<String>,
    pub marks: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl SemesterRecord {
    /// Subject names paired index-for-index with their marks. A missing mark
    /// comes back as `None` instead of shifting the pairs.
    pub fn subject_marks(&self) -> Vec<SubjectMark> {
        self.subjects
            .iter()
            .enumerate()
            .map(|(idx, subject)| SubjectMark {
                subject: subject.clone(),
                mark: self.marks.get(idx).copied(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubjectMark {
    pub subject: String,
    pub mark: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
}

impl Testimonial {
    pub fn new(text: &str, author: &str) -> Self {
        Testimonial {
            text: text.to_string(),
            author: author.to_string(),
        }
    }
}

/// What the login form posts. `current_semester` tells the server how many
/// semesters of history the student has.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub current_semester: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_payload_deserializes() {
        let payload = r#"{
            "username": "priya",
            "current_semester": 2,
            "semesters": [
                {"subjects": ["CS101", "CS102"], "marks": [80, 90], "sgpa": 8.5, "total": 170,
                 "timestamp": "2025-01-10T09:30:00.123456"},
                {"subjects": ["CS103", "CS104"], "marks": [70, 60], "sgpa": 6.5, "total": 130,
                 "timestamp": "2025-07-10T09:30:00"}
            ],
            "marks": [70, 60],
            "sgpa": 6.5,
            "growth": [8.5, 6.5]
        }"#;

        let record: AcademicRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.username, "priya");
        assert_eq!(record.semesters.len(), 2);
        assert_eq!(record.semesters[1].marks, vec![70.0, 60.0]);
        assert_eq!(record.current_semester, Some(2));
        assert!(record.semesters[0].timestamp.is_some());
    }

    #[test]
    fn test_minimal_payload_deserializes() {
        let payload = r#"{"username": "a", "sgpa": 7.0,
            "semesters": [{"subjects": [], "marks": [], "sgpa": 7.0, "total": 0}]}"#;
        let record: AcademicRecord = serde_json::from_str(payload).unwrap();
        assert!(record.growth.is_empty());
        assert_eq!(record.semesters[0].timestamp, None);
    }

    #[test]
    fn test_subject_marks_pairs_by_index() {
        let semester = SemesterRecord {
            sgpa: 7.5,
            total: 150.0,
            subjects: vec!["CS101".into(), "CS102".into(), "CS103".into()],
            marks: vec![75.0, 75.0],
            timestamp: None,
        };

        let pairs = semester.subject_marks();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].mark, Some(75.0));
        assert_eq!(pairs[2].subject, "CS103");
        assert_eq!(pairs[2].mark, None);
    }
}
