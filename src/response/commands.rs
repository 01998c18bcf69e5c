use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One UI-update directive for the form that asked for the autofill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Remove {
        selector: String,
    },
    /// Call a jQuery-style method on the matched elements.
    Invoke {
        selector: String,
        method: String,
        args: Vec<Value>,
    },
    Insert {
        method: InsertMethod,
        selector: String,
        data: String,
    },
    /// Rich-text editors ignore `val`, so the body gets its own directive.
    UpdateCkeditorText {
        selector: String,
        method: String,
        args: Vec<Value>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsertMethod {
    After,
    Prepend,
    Html,
}

impl Command {
    pub fn remove(selector: impl Into<String>) -> Self {
        Command::Remove {
            selector: selector.into(),
        }
    }

    pub fn invoke(selector: impl Into<String>, method: &str, args: Vec<Value>) -> Self {
        Command::Invoke {
            selector: selector.into(),
            method: method.to_string(),
            args,
        }
    }

    /// Shorthand for `invoke(selector, "val", [value])`.
    pub fn set_value(selector: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::invoke(selector, "val", vec![value.into()])
    }

    pub fn after(selector: impl Into<String>, data: impl Into<String>) -> Self {
        Self::insert(InsertMethod::After, selector, data)
    }

    pub fn prepend(selector: impl Into<String>, data: impl Into<String>) -> Self {
        Self::insert(InsertMethod::Prepend, selector, data)
    }

    pub fn html(selector: impl Into<String>, data: impl Into<String>) -> Self {
        Self::insert(InsertMethod::Html, selector, data)
    }

    pub fn update_ckeditor_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Command::UpdateCkeditorText {
            selector: selector.into(),
            method: "val".to_string(),
            args: vec![Value::String(text.into())],
        }
    }

    fn insert(method: InsertMethod, selector: impl Into<String>, data: impl Into<String>) -> Self {
        Command::Insert {
            method,
            selector: selector.into(),
            data: data.into(),
        }
    }

    pub fn selector(&self) -> &str {
        match self {
            Command::Remove { selector }
            | Command::Invoke { selector, .. }
            | Command::Insert { selector, .. }
            | Command::UpdateCkeditorText { selector, .. } => selector,
        }
    }
}
