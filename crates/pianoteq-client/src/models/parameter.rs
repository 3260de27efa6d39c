//! Engine parameters.

use serde::{Deserialize, Serialize};

/// One adjustable engine parameter as reported by `getParameters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterInfo {
    /// Parameter id (e.g. "Volume").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Parameter group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Position within the parameter list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,

    /// Setting in `[0.0, 1.0]`.
    pub normalized_value: f64,

    /// Display text of the setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Setting in the parameter's natural unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Lower bound of `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_min: Option<f64>,

    /// Upper bound of `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_max: Option<f64>,

    /// Labels of a discrete parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discrete_values: Option<Vec<String>>,
}

impl ParameterInfo {
    /// Display text if the server sent one, otherwise the normalized value.
    #[must_use]
    pub fn display_value(&self) -> String {
        self.text
            .clone()
            .unwrap_or_else(|| format!("{:.2}", self.normalized_value))
    }
}

/// A sparse parameter change for `setParameters`.
///
/// Only `id` and the fields that are set go on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    /// Parameter id.
    pub id: String,

    /// New setting in `[0.0, 1.0]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<f64>,

    /// New setting as display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ParameterUpdate {
    /// Set by normalized value.
    #[must_use]
    pub fn normalized(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            normalized_value: Some(value),
            text: None,
        }
    }

    /// Set by display text.
    #[must_use]
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            normalized_value: None,
            text: Some(text.into()),
        }
    }
}

impl From<&ParameterInfo> for ParameterUpdate {
    fn from(info: &ParameterInfo) -> Self {
        Self {
            id: info.id.clone(),
            normalized_value: Some(info.normalized_value),
            text: None,
        }
    }
}
