use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{FieldViolation, ServiceError};

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Score fields in the order they appear on the wire.
pub const SUBJECTS: [&str; 4] = ["korean", "english", "math", "science"];

/// One stored student: a unique name plus four subject scores in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub korean: u8,
    pub english: u8,
    pub math: u8,
    pub science: u8,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, korean: u8, english: u8, math: u8, science: u8) -> Self {
        Self { name: name.into(), korean, english, math, science }
    }

    pub fn scores(&self) -> [u8; 4] {
        [self.korean, self.english, self.math, self.science]
    }

    pub fn total(&self) -> u32 {
        self.scores().iter().map(|&s| u32::from(s)).sum()
    }
}

/// Create/update payload. Scores are kept wide until validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub korean: i64,
    pub english: i64,
    pub math: i64,
    pub science: i64,
}

impl StudentInput {
    /// Extract an input from an arbitrary JSON body, reporting every
    /// missing or mistyped field at once.
    ///
    /// Scores are coerced leniently: booleans, integral floats and numeric
    /// strings such as `" 85 "` or `"85.0"` are accepted. `null` counts as
    /// a wrong type, not a missing field.
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        let Some(obj) = body.as_object() else {
            return Err(ServiceError::Validation(vec![FieldViolation::new(
                "",
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            )]));
        };

        let mut violations = Vec::new();

        let name = match obj.get("name") {
            None => {
                violations.push(FieldViolation::missing("name"));
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                violations.push(FieldViolation::not_a_string("name"));
                None
            }
        };

        let mut scores = [0i64; 4];
        for (slot, field) in scores.iter_mut().zip(SUBJECTS) {
            match obj.get(field) {
                None => violations.push(FieldViolation::missing(field)),
                Some(v) => match coerce_int(field, v) {
                    Ok(n) => *slot = n,
                    Err(violation) => violations.push(violation),
                },
            }
        }

        match name {
            Some(name) if violations.is_empty() => Ok(Self {
                name,
                korean: scores[0],
                english: scores[1],
                math: scores[2],
                science: scores[3],
            }),
            _ => Err(ServiceError::Validation(violations)),
        }
    }

    /// Range and emptiness checks.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut violations = Vec::new();
        if self.name.is_empty() {
            violations.push(FieldViolation::new(
                "name",
                "String should have at least 1 character",
                "string_too_short",
            ));
        }
        for (field, value) in SUBJECTS.iter().zip(self.raw_scores()) {
            if value < MIN_SCORE {
                violations.push(FieldViolation::new(
                    *field,
                    format!("Input should be greater than or equal to {MIN_SCORE}"),
                    "greater_than_equal",
                ));
            } else if value > MAX_SCORE {
                violations.push(FieldViolation::new(
                    *field,
                    format!("Input should be less than or equal to {MAX_SCORE}"),
                    "less_than_equal",
                ));
            }
        }
        if violations.is_empty() { Ok(()) } else { Err(ServiceError::Validation(violations)) }
    }

    /// Validate and narrow into a storable record.
    pub fn into_record(self) -> Result<StudentRecord, ServiceError> {
        self.validate()?;
        let narrow = |v: i64| u8::try_from(v).unwrap_or(u8::MAX);
        Ok(StudentRecord {
            korean: narrow(self.korean),
            english: narrow(self.english),
            math: narrow(self.math),
            science: narrow(self.science),
            name: self.name,
        })
    }

    fn raw_scores(&self) -> [i64; 4] {
        [self.korean, self.english, self.math, self.science]
    }
}

fn coerce_int(field: &str, v: &Value) -> Result<i64, FieldViolation> {
    match v {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() != 0.0 => Err(FieldViolation::int_from_float(field)),
                Some(f) if f.abs() < i64::MAX as f64 => Ok(f as i64),
                Some(_) => Err(FieldViolation::int_too_large(field)),
                None => Err(FieldViolation::not_an_integer(field)),
            }
        }
        Value::String(s) => parse_int_str(s).ok_or_else(|| FieldViolation::int_parsing(field)),
        _ => Err(FieldViolation::not_an_integer(field)),
    }
}

// Surrounding whitespace, a sign, `_` digit separators and an all-zero
// fraction are allowed.
fn parse_int_str(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = match trimmed.split_once('.') {
        Some((int, frac)) if frac.bytes().all(|b| b == b'0') => int,
        Some(_) => return None,
        None => trimmed,
    };
    let unsigned = digits.trim_start_matches(['+', '-']);
    if unsigned.starts_with('_') || unsigned.ends_with('_') || unsigned.contains("__") {
        return None;
    }
    digits.replace('_', "").parse().ok()
}

/// A record plus its derived total and two-decimal average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedScore {
    pub name: String,
    pub korean: u8,
    pub english: u8,
    pub math: u8,
    pub science: u8,
    pub total: u32,
    pub average: f64,
}

/// Aggregate view across the whole roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStatistics {
    pub total_students: usize,
    pub average_korean: f64,
    pub average_english: f64,
    pub average_math: f64,
    pub average_science: f64,
    pub overall_average: f64,
    pub top_student: String,
}
