use serde::Serialize;
use serde_json::Value;

/// One discovered value for a field. Meta tags always give text; structured
/// data can hand back whole objects, kept as-is until display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Candidate {
    Text(String),
    Structured(Value),
}

impl Candidate {
    /// `None` for JSON null, which counts as an absent property.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Candidate::Text(s.clone())),
            other => Some(Candidate::Structured(other.clone())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Candidate::Text(s) => Some(s),
            Candidate::Structured(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Candidate::Text(s) => s.trim().is_empty(),
            Candidate::Structured(Value::Object(map)) => map.is_empty(),
            Candidate::Structured(Value::Array(items)) => items.is_empty(),
            Candidate::Structured(_) => false,
        }
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Candidate::Text(value.to_string())
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Candidate::Text(value)
    }
}
