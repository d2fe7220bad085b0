use serde::{Deserialize, Serialize};

/// One named website to probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Target {
    pub name: String,
    pub url: String,
}

impl Target {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Normalized result of probing one [`Target`].
///
/// `status_code` is `0` whenever no HTTP response was obtained, in which case
/// `error` describes why. A response with any other status than 200 is a
/// failure without an `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub name: String,
    pub url: String,
    pub success: bool,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckOutcome {
    /// The target answered with `status_code`.
    #[must_use]
    pub fn responded(target: &Target, status_code: u16) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            success: status_code == 200,
            status_code,
            error: None,
        }
    }

    /// No response was obtained from the target.
    pub fn unreachable(target: &Target, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Unknown error".to_string();
        }

        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            success: false,
            status_code: 0,
            error: Some(error),
        }
    }
}
