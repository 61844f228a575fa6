use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every generated student ID starts with this.
pub const ID_PREFIX: &str = "STD";

/// Marks are whole numbers in this closed range.
pub const MARK_MIN: i32 = 0;
pub const MARK_MAX: i32 = 100;

/// One row of `marks.json`.
///
/// Keys the application does not know about are kept in `extra` so a
/// hand-edited file survives a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub grade: String,
    pub subject: String,
    pub mark: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StudentRecord {
    pub fn new(id: String, fields: StudentFields) -> Self {
        StudentRecord {
            id,
            name: fields.name,
            grade: fields.grade,
            subject: fields.subject,
            mark: fields.mark,
            extra: Map::new(),
        }
    }

    /// Overwrites every editable field. The ID and unknown keys stay.
    pub fn apply(&mut self, fields: StudentFields) {
        self.name = fields.name;
        self.grade = fields.grade;
        self.subject = fields.subject;
        self.mark = fields.mark;
    }

    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            grade: self.grade.clone(),
            subject: self.subject.clone(),
            mark: self.mark,
        }
    }
}

/// Raw text captured from the add/update form, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub grade: String,
    pub subject: String,
    pub mark: String,
}

impl StudentForm {
    pub fn new(
        name: impl Into<String>,
        grade: impl Into<String>,
        subject: impl Into<String>,
        mark: impl Into<String>,
    ) -> Self {
        StudentForm {
            name: name.into(),
            grade: grade.into(),
            subject: subject.into(),
            mark: mark.into(),
        }
    }
}

impl From<&StudentRecord> for StudentForm {
    fn from(record: &StudentRecord) -> Self {
        StudentForm {
            name: record.name.clone(),
            grade: record.grade.clone(),
            subject: record.subject.clone(),
            mark: record.mark.to_string(),
        }
    }
}

/// The editable part of a record after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub grade: String,
    pub subject: String,
    pub mark: i32,
}

/// Aggregates over the current marks. All zero when there are no records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub average: f64,
    pub max: i32,
    pub min: i32,
}

impl Summary {
    /// The average as shown in the summary bar: `0` with no records,
    /// otherwise always with a fractional part (`70.0`, `66.67`).
    pub fn average_label(&self) -> String {
        if self.count == 0 {
            return "0".to_string();
        }
        format!("{:?}", self.average)
    }
}
