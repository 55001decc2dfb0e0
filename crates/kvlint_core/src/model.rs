//! Validation results as produced by the external validation engine.
//!
//! The shapes mirror the Kubernetes `metav1.Status` object so results can be
//! deserialized straight from its JSON form.

use serde::{Deserialize, Deserializer};

/// The textual field value validation engines emit for causes which have no field.
pub const NIL_FIELD: &str = "<nil>";

/// Whether a single validation attempt of a document succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum StatusKind {
    Success,
    /// Anything which is not explicitly a success.
    #[serde(other)]
    Failure,
}

impl Default for StatusKind {
    fn default() -> Self {
        StatusKind::Failure
    }
}

/// The result of validating a document once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    pub status: StatusKind,
    pub message: Option<String>,
    pub reason: Option<String>,
    pub code: Option<i32>,
    pub details: Option<StatusDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusDetails {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub causes: Vec<Cause>,
}

/// A single reason a document failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Cause {
    /// The field the cause is about, `None` if it cannot be pointed at.
    #[serde(deserialize_with = "field_or_nil")]
    pub field: Option<String>,
    /// The machine readable kind of the cause, e.g. `FieldValueInvalid`.
    #[serde(rename = "reason")]
    pub kind: String,
    pub message: String,
}

fn field_or_nil<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<String>::deserialize(deserializer)?;
    Ok(field.filter(|f| f != NIL_FIELD))
}

impl Status {
    pub fn success() -> Self {
        Self {
            status: StatusKind::Success,
            ..Default::default()
        }
    }

    pub fn failure(causes: Vec<Cause>) -> Self {
        Self {
            status: StatusKind::Failure,
            details: Some(StatusDetails {
                causes,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StatusKind::Success
    }

    /// The causes of this result, empty for results without details.
    pub fn causes(&self) -> &[Cause] {
        match &self.details {
            Some(details) => &details.causes,
            None => &[],
        }
    }
}

impl Cause {
    pub fn new(field: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// A cause which does not point at any field.
    pub fn unaddressed(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: None,
            kind: kind.into(),
            message: message.into(),
        }
    }
}
