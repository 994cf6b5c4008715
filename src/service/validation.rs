//! Request validation from record field rules.

use crate::error::AppError;
use crate::schema::{FieldKind, FieldRule, Record, WebUrl};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-field rules. All required fields must be present and non-null.
    /// Fields the rules do not mention are ignored.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            let val = body.get(rule.name);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", rule.name)));
            }
            if let Some(v) = val {
                validate_field(rule, v)?;
            }
        }
        Ok(())
    }

    /// Validate a JSON body and decode it into `R`, filling defaults for absent optionals.
    pub fn parse<R: Record>(body: Value) -> Result<R, AppError> {
        let mut map = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        Self::validate(&map, R::rules())?;
        normalize_integers(&mut map, R::rules());
        serde_json::from_value(Value::Object(map)).map_err(|e| AppError::Validation(e.to_string()))
    }
}

/// Integer value of `v`, accepting whole floats such as `2024.0` that fit in `i64`.
fn whole_i64(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Rewrite validated integer fields as JSON integers so they decode and store as such.
fn normalize_integers(map: &mut Map<String, Value>, rules: &[FieldRule]) {
    for rule in rules.iter().filter(|r| r.kind == FieldKind::Integer) {
        if let Some(v) = map.get_mut(rule.name) {
            if let Some(n) = whole_i64(v) {
                *v = Value::from(n);
            }
        }
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    let name = rule.name;
    // Optional text and URL fields accept null; list and integer defaults do not.
    if v.is_null() {
        return match rule.kind {
            FieldKind::Text | FieldKind::Url => Ok(()),
            FieldKind::Integer => Err(AppError::Validation(format!("{} must be an integer", name))),
            FieldKind::TextList => Err(AppError::Validation(format!("{} must be a list of strings", name))),
        };
    }
    match rule.kind {
        FieldKind::Text => {
            if !v.is_string() {
                return Err(AppError::Validation(format!("{} must be a string", name)));
            }
        }
        FieldKind::Integer => {
            let n = whole_i64(v).ok_or_else(|| AppError::Validation(format!("{} must be an integer", name)))?;
            if let Some(min) = rule.minimum {
                if n < min {
                    return Err(AppError::Validation(format!("{} must be at least {}", name, min)));
                }
            }
        }
        FieldKind::TextList => {
            let ok = v
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false);
            if !ok {
                return Err(AppError::Validation(format!("{} must be a list of strings", name)));
            }
        }
        FieldKind::Url => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::Validation(format!("{} must be a URL string", name)))?;
            WebUrl::parse(s).map_err(|e| AppError::Validation(format!("{}: {}", name, e)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Company, PlacedStudent, TeamMember};
    use serde_json::json;

    fn student() -> Value {
        json!({"name":"A","branch":"CSE","company":"X","role":"SDE","ctc":"10 LPA","year":2024})
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(m) | AppError::BadRequest(m) => m,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_student_parses() {
        let s: PlacedStudent = RequestValidator::parse(student()).unwrap();
        assert_eq!(s.year, 2024);
        assert_eq!(s.ctc, "10 LPA");
        assert_eq!(s.avatar_url, None);
    }

    #[test]
    fn missing_required_field_is_named() {
        let mut body = student();
        body.as_object_mut().unwrap().remove("year");
        let err = RequestValidator::parse::<PlacedStudent>(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(message(err), "year is required");
    }

    #[test]
    fn null_required_field_is_missing() {
        let mut body = student();
        body["name"] = Value::Null;
        let err = RequestValidator::parse::<PlacedStudent>(body).unwrap_err();
        assert_eq!(message(err), "name is required");
    }

    #[test]
    fn wrong_types_rejected() {
        let mut body = student();
        body["year"] = json!("2024");
        assert!(matches!(RequestValidator::parse::<PlacedStudent>(body), Err(AppError::Validation(_))));

        let mut body = student();
        body["ctc"] = json!(1000000);
        assert!(matches!(RequestValidator::parse::<PlacedStudent>(body), Err(AppError::Validation(_))));

        let body = json!({"name": "X", "roles": ["SDE", 3]});
        assert!(matches!(RequestValidator::parse::<Company>(body), Err(AppError::Validation(_))));
    }

    #[test]
    fn fractional_year_rejected() {
        let mut body = student();
        body["year"] = json!(2024.5);
        assert!(matches!(RequestValidator::parse::<PlacedStudent>(body), Err(AppError::Validation(_))));
    }

    #[test]
    fn whole_float_year_accepted_as_integer() {
        let mut body = student();
        body["year"] = json!(2024.0);
        let s: PlacedStudent = RequestValidator::parse(body).unwrap();
        assert_eq!(s.year, 2024);

        let c: Company = RequestValidator::parse(json!({"name": "X", "visits": 3.0})).unwrap();
        assert_eq!(c.visits, 3);
    }

    #[test]
    fn out_of_range_float_rejected() {
        let mut body = student();
        body["year"] = json!(1e20);
        assert!(matches!(RequestValidator::parse::<PlacedStudent>(body), Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_url_rejected() {
        let body = json!({"name": "A", "designation": "Head", "linkedin": "not-a-url"});
        let err = RequestValidator::parse::<TeamMember>(body).unwrap_err();
        assert!(message(err).starts_with("linkedin: invalid URL"));
    }

    #[test]
    fn null_optional_url_accepted() {
        let body = json!({"name": "A", "designation": "Head", "linkedin": null});
        let m: TeamMember = RequestValidator::parse(body).unwrap();
        assert_eq!(m.linkedin, None);
    }

    #[test]
    fn negative_visits_rejected() {
        let err = RequestValidator::parse::<Company>(json!({"name": "X", "visits": -1})).unwrap_err();
        assert_eq!(message(err), "visits must be at least 0");
    }

    #[test]
    fn null_visits_rejected() {
        let err = RequestValidator::parse::<Company>(json!({"name": "X", "visits": null})).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn company_defaults_applied() {
        let c: Company = RequestValidator::parse(json!({"name": "X"})).unwrap();
        assert_eq!(c.visits, 1);
        assert!(c.roles.is_empty());
    }

    #[test]
    fn unknown_fields_ignored() {
        let c: Company = RequestValidator::parse(json!({"name": "X", "tier": "A"})).unwrap();
        assert_eq!(c.name, "X");
    }

    #[test]
    fn non_object_body_is_bad_request() {
        let err = RequestValidator::parse::<Company>(json!(["X"])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
