use crate::error::ValidationError;
use crate::models::{StudentFields, StudentForm, ID_PREFIX, MARK_MAX, MARK_MIN};

/// Trims a required text field, rejecting it when nothing is left.
pub fn required(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Parses a mark typed into the form. Surrounding whitespace is fine,
/// anything that is not an integer in range is not.
pub fn parse_mark(raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i32>() {
        Ok(mark) if (MARK_MIN..=MARK_MAX).contains(&mark) => Ok(mark),
        _ => Err(ValidationError::InvalidMark(trimmed.to_string())),
    }
}

/// Text fields are checked before the mark, so an empty name wins over a
/// bad mark when both are wrong.
pub fn validate_form(form: &StudentForm) -> Result<StudentFields, ValidationError> {
    let name = required("name", &form.name)?;
    let grade = required("grade", &form.grade)?;
    let subject = required("subject", &form.subject)?;
    let mark = parse_mark(&form.mark)?;
    Ok(StudentFields { name, grade, subject, mark })
}

pub fn format_student_id(number: u64) -> String {
    format!("{ID_PREFIX}{number:03}")
}

/// Numeric part of a generated ID, or `None` for IDs in any other shape.
pub fn student_id_number(id: &str) -> Option<u64> {
    id.strip_prefix(ID_PREFIX)?.trim().parse().ok()
}

pub fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Two decimal places, exact halves going to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
