use super::{FieldKind, FieldRule, Record, WebUrl};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student placed with a company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlacedStudent {
    /// Student full name
    pub name: String,
    /// Department/branch, e.g. CSE, ECE
    pub branch: String,
    /// Company name
    pub company: String,
    /// Offered role
    pub role: String,
    /// CTC or stipend offered, display string
    pub ctc: String,
    /// Placement year
    pub year: i64,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub avatar_url: Option<WebUrl>,
}

impl Record for PlacedStudent {
    const COLLECTION: &'static str = "studentplaced";

    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("name", FieldKind::Text),
            FieldRule::required("branch", FieldKind::Text),
            FieldRule::required("company", FieldKind::Text),
            FieldRule::required("role", FieldKind::Text),
            FieldRule::required("ctc", FieldKind::Text),
            FieldRule::required("year", FieldKind::Integer),
            FieldRule::optional("avatar_url", FieldKind::Url),
        ];
        RULES
    }
}

fn default_visits() -> i64 {
    1
}

/// A recruiting company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    pub name: String,
    /// Number of campus visits/drives
    #[serde(default = "default_visits")]
    #[schema(minimum = 0, default = 1)]
    pub visits: i64,
    /// Roles offered
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub logo_url: Option<WebUrl>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub website: Option<WebUrl>,
}

impl Record for Company {
    const COLLECTION: &'static str = "company";

    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("name", FieldKind::Text),
            FieldRule::optional("visits", FieldKind::Integer).at_least(0),
            FieldRule::optional("roles", FieldKind::TextList),
            FieldRule::optional("logo_url", FieldKind::Url),
            FieldRule::optional("website", FieldKind::Url),
        ];
        RULES
    }
}

/// A member of the placement office team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    pub name: String,
    /// Role/designation in the office
    pub designation: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub linkedin: Option<WebUrl>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub avatar_url: Option<WebUrl>,
}

impl Record for TeamMember {
    const COLLECTION: &'static str = "teammember";

    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("name", FieldKind::Text),
            FieldRule::required("designation", FieldKind::Text),
            FieldRule::optional("email", FieldKind::Text),
            FieldRule::optional("phone", FieldKind::Text),
            FieldRule::optional("linkedin", FieldKind::Url),
            FieldRule::optional("avatar_url", FieldKind::Url),
        ];
        RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn company_defaults() {
        let c: Company = serde_json::from_value(json!({"name": "X"})).unwrap();
        assert_eq!(c.visits, 1);
        assert!(c.roles.is_empty());
        assert_eq!(c.logo_url, None);
    }

    #[test]
    fn absent_optionals_serialize_as_null() {
        let m: TeamMember = serde_json::from_value(json!({"name": "A", "designation": "Head"})).unwrap();
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["email"], serde_json::Value::Null);
        assert_eq!(v["linkedin"], serde_json::Value::Null);
    }

    #[test]
    fn url_fields_serialize_as_text() {
        let s: PlacedStudent = serde_json::from_value(json!({
            "name": "A", "branch": "CSE", "company": "X", "role": "SDE",
            "ctc": "10 LPA", "year": 2024, "avatar_url": "https://img.example.com/a.png"
        }))
        .unwrap();
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["avatar_url"], "https://img.example.com/a.png");
    }

    #[test]
    fn collections_are_lowercased_type_names() {
        assert_eq!(PlacedStudent::COLLECTION, "studentplaced");
        assert_eq!(Company::COLLECTION, "company");
        assert_eq!(TeamMember::COLLECTION, "teammember");
    }
}
