// Response schema contract shared with the model.
//
// The same description is sent to Gemini as `responseSchema` and used
// locally to validate the payload before it becomes a `SeoReport`.

use crate::model::{Effort, Intent, LinkType, Priority};
use serde_json::{Map, Value, json};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Every listed property is required unless absent from `required`
    Object {
        properties: Vec<(&'static str, SchemaNode)>,
        required: Vec<&'static str>,
    },
    Array(Box<SchemaNode>),
    String {
        choices: Option<&'static [&'static str]>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Boolean,
}

/// First place where a payload disagreed with the schema
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

impl SchemaViolation {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl SchemaNode {
    /// Object whose properties are all required
    pub fn object(properties: Vec<(&'static str, SchemaNode)>) -> Self {
        let required = properties.iter().map(|(name, _)| *name).collect();
        SchemaNode::Object {
            properties,
            required,
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(items))
    }

    pub fn string() -> Self {
        SchemaNode::String { choices: None }
    }

    pub fn one_of(choices: &'static [&'static str]) -> Self {
        SchemaNode::String {
            choices: Some(choices),
        }
    }

    pub fn number() -> Self {
        SchemaNode::Number {
            min: None,
            max: None,
        }
    }

    /// Number constrained to 0..=100
    pub fn percentage() -> Self {
        SchemaNode::Number {
            min: Some(0.0),
            max: Some(100.0),
        }
    }

    pub fn integer_between(min: i64, max: i64) -> Self {
        SchemaNode::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn boolean() -> Self {
        SchemaNode::Boolean
    }

    fn string_list() -> Self {
        Self::array(Self::string())
    }

    /// The Gemini `responseSchema` representation of this node.
    pub fn to_wire(&self) -> Value {
        match self {
            SchemaNode::Object {
                properties,
                required,
            } => {
                let mut props = Map::new();
                for (name, node) in properties {
                    props.insert(name.to_string(), node.to_wire());
                }
                let ordering: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
                json!({
                    "type": "OBJECT",
                    "properties": props,
                    "propertyOrdering": ordering,
                    "required": required,
                })
            }
            SchemaNode::Array(items) => json!({
                "type": "ARRAY",
                "items": items.to_wire(),
            }),
            SchemaNode::String { choices } => {
                let mut wire = json!({ "type": "STRING" });
                if let Some(choices) = choices {
                    wire["format"] = json!("enum");
                    wire["enum"] = json!(choices);
                }
                wire
            }
            SchemaNode::Number { min, max } => with_bounds(json!({ "type": "NUMBER" }), *min, *max),
            SchemaNode::Integer { min, max } => {
                with_bounds(json!({ "type": "INTEGER" }), *min, *max)
            }
            SchemaNode::Boolean => json!({ "type": "BOOLEAN" }),
        }
    }

    /// Check `value` against this node. Nothing is coerced: a string where a
    /// number is expected is a violation, as is a float for an integer.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.check(value, "$")
    }

    fn check(&self, value: &Value, path: &str) -> Result<(), SchemaViolation> {
        match self {
            SchemaNode::Object {
                properties,
                required,
            } => {
                let Value::Object(map) = value else {
                    return Err(type_mismatch(path, "object", value));
                };
                for name in required {
                    if !map.contains_key(*name) {
                        return Err(SchemaViolation::new(
                            path,
                            format!("missing required property '{}'", name),
                        ));
                    }
                }
                for (name, node) in properties {
                    if let Some(child) = map.get(*name) {
                        node.check(child, &format!("{}.{}", path, name))?;
                    }
                }
                Ok(())
            }
            SchemaNode::Array(items) => {
                let Value::Array(elements) = value else {
                    return Err(type_mismatch(path, "array", value));
                };
                for (idx, element) in elements.iter().enumerate() {
                    items.check(element, &format!("{}[{}]", path, idx))?;
                }
                Ok(())
            }
            SchemaNode::String { choices } => {
                let Value::String(text) = value else {
                    return Err(type_mismatch(path, "string", value));
                };
                match choices {
                    Some(choices) if !choices.contains(&text.as_str()) => {
                        Err(SchemaViolation::new(
                            path,
                            format!("'{}' is not one of [{}]", text, choices.join(", ")),
                        ))
                    }
                    _ => Ok(()),
                }
            }
            SchemaNode::Number { min, max } => {
                let Some(number) = value.as_f64() else {
                    return Err(type_mismatch(path, "number", value));
                };
                check_range(path, number, *min, *max)
            }
            SchemaNode::Integer { min, max } => {
                let number = match (value.as_i64(), value.as_u64()) {
                    (Some(n), _) => n as f64,
                    (None, Some(n)) => n as f64,
                    _ => return Err(type_mismatch(path, "integer", value)),
                };
                check_range(path, number, min.map(|m| m as f64), max.map(|m| m as f64))
            }
            SchemaNode::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(type_mismatch(path, "boolean", value))
                }
            }
        }
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = serde_json::to_string_pretty(&self.to_wire()).map_err(|_| fmt::Error)?;
        f.write_str(&pretty)
    }
}

fn with_bounds<T: Into<Value>>(mut wire: Value, min: Option<T>, max: Option<T>) -> Value {
    if let Some(min) = min {
        wire["minimum"] = min.into();
    }
    if let Some(max) = max {
        wire["maximum"] = max.into();
    }
    wire
}

fn check_range(
    path: &str,
    number: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), SchemaViolation> {
    if min.is_some_and(|min| number < min) || max.is_some_and(|max| number > max) {
        return Err(SchemaViolation::new(
            path,
            format!(
                "{} is outside [{}, {}]",
                number,
                min.map_or("-inf".to_string(), |m| m.to_string()),
                max.map_or("inf".to_string(), |m| m.to_string()),
            ),
        ));
    }
    Ok(())
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> SchemaViolation {
    SchemaViolation::new(
        path,
        format!("expected {}, found {}", expected, json_type_name(actual)),
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn tag_audit() -> SchemaNode {
    SchemaNode::object(vec![
        ("status", SchemaNode::string()),
        ("count", SchemaNode::number()),
        ("issues", SchemaNode::string_list()),
    ])
}

/// Schema of the report the model must return. `sources` is not part of it;
/// those are attached from grounding metadata after the call.
pub fn report_schema() -> SchemaNode {
    use SchemaNode as S;

    S::object(vec![
        ("healthScore", S::integer_between(0, 100)),
        (
            "domainInfo",
            S::object(vec![
                ("age", S::string()),
                ("authority", S::number()),
                ("indexedPages", S::number()),
                ("httpsStatus", S::string()),
                ("securityInfo", S::string()),
            ]),
        ),
        (
            "technical",
            S::object(vec![
                (
                    "coreWebVitals",
                    S::object(vec![
                        ("lcp", S::string()),
                        ("cls", S::string()),
                        ("inp", S::string()),
                    ]),
                ),
                ("mobileFriendly", S::boolean()),
                ("speedScore", S::number()),
                ("sitemapStatus", S::string()),
                ("robotsTxt", S::string()),
            ]),
        ),
        (
            "onPage",
            S::object(vec![
                ("titles", tag_audit()),
                ("metaDescriptions", tag_audit()),
                (
                    "headings",
                    S::object(vec![
                        ("h1", S::number()),
                        ("h2", S::number()),
                        ("h3", S::number()),
                        ("issues", S::string_list()),
                    ]),
                ),
                ("internalLinking", S::string()),
                ("imageAltTags", S::string()),
                ("schemaTypes", S::string_list()),
            ]),
        ),
        (
            "content",
            S::object(vec![
                ("originalityScore", S::percentage()),
                ("topicalAuthority", S::string()),
                ("aiIndicator", S::string()),
                ("gaps", S::string_list()),
                ("improvements", S::string_list()),
            ]),
        ),
        (
            "backlinks",
            S::object(vec![
                ("total", S::number()),
                ("referringDomains", S::number()),
                ("doFollowRatio", S::number()),
                ("toxicPercentage", S::number()),
                (
                    "detailedSources",
                    S::array(S::object(vec![
                        ("url", S::string()),
                        ("anchor", S::string()),
                        ("authority", S::number()),
                        ("type", S::one_of(LinkType::ALL)),
                    ])),
                ),
            ]),
        ),
        (
            "competitors",
            S::array(S::object(vec![
                ("name", S::string()),
                ("authority", S::number()),
                ("strength", S::string()),
                ("gap", S::string()),
            ])),
        ),
        (
            "keywords",
            S::array(S::object(vec![
                ("term", S::string()),
                ("volume", S::string()),
                ("difficulty", S::percentage()),
                ("competition", S::percentage()),
                ("cpc", S::string()),
                ("intent", S::one_of(Intent::ALL)),
            ])),
        ),
        (
            "recommendations",
            S::array(S::object(vec![
                ("priority", S::one_of(Priority::ALL)),
                ("issue", S::string()),
                ("action", S::string()),
                ("impact", S::string()),
                ("effort", S::one_of(Effort::ALL)),
            ])),
        ),
        (
            "roadmap",
            S::array(S::object(vec![
                ("phase", S::string()),
                ("duration", S::string()),
                ("tasks", S::string_list()),
            ])),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/report.json");

    fn fixture() -> Value {
        serde_json::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn test_fixture_is_valid() {
        assert_eq!(report_schema().validate(&fixture()), Ok(()));
    }

    #[test]
    fn test_missing_required_property() {
        let mut payload = fixture();
        payload["technical"].as_object_mut().unwrap().remove("robotsTxt");

        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.technical");
        assert!(err.reason.contains("robotsTxt"));
    }

    #[test]
    fn test_enum_mismatch_reports_path() {
        let mut payload = fixture();
        payload["keywords"][1]["intent"] = json!("Commercial");

        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.keywords[1].intent");
        assert!(err.reason.contains("Commercial"));
    }

    #[test]
    fn test_no_coercion_of_numeric_strings() {
        let mut payload = fixture();
        payload["domainInfo"]["authority"] = json!("42");

        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.domainInfo.authority");
        assert_eq!(err.reason, "expected number, found string");
    }

    #[test]
    fn test_health_score_must_be_integer_in_range() {
        let mut payload = fixture();
        payload["healthScore"] = json!(72.5);
        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.reason, "expected integer, found float");

        payload["healthScore"] = json!(101);
        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.healthScore");
        assert!(err.reason.contains("outside"));

        payload["healthScore"] = json!(-1);
        assert!(report_schema().validate(&payload).is_err());
    }

    #[test]
    fn test_percentage_bounds_inclusive() {
        let mut payload = fixture();
        payload["keywords"][0]["difficulty"] = json!(100);
        payload["keywords"][0]["competition"] = json!(0);
        assert!(report_schema().validate(&payload).is_ok());

        payload["keywords"][0]["difficulty"] = json!(100.5);
        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.keywords[0].difficulty");
    }

    #[test]
    fn test_extra_properties_are_ignored() {
        let mut payload = fixture();
        payload["unexpected"] = json!({ "anything": true });
        assert!(report_schema().validate(&payload).is_ok());
    }

    #[test]
    fn test_null_is_rejected() {
        let mut payload = fixture();
        payload["content"]["gaps"] = Value::Null;
        let err = report_schema().validate(&payload).unwrap_err();
        assert_eq!(err.reason, "expected array, found null");
    }

    #[test]
    fn test_wire_format() {
        let wire = report_schema().to_wire();
        assert_eq!(wire["type"], "OBJECT");
        assert_eq!(wire["properties"]["healthScore"]["type"], "INTEGER");
        assert_eq!(wire["properties"]["healthScore"]["maximum"], 100);
        assert_eq!(
            wire["properties"]["backlinks"]["properties"]["detailedSources"]["items"]["properties"]
                ["type"]["enum"],
            json!(["dofollow", "nofollow"])
        );
        assert_eq!(wire["properties"]["roadmap"]["type"], "ARRAY");
        assert!(wire["properties"].get("sources").is_none());

        let required = wire["required"].as_array().unwrap();
        assert_eq!(required.len(), 10);
        assert_eq!(wire["propertyOrdering"][0], "healthScore");
    }
}
