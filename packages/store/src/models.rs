//! # Domain models shared by the client crates
//!
//! Everything here is `Serialize + Deserialize` so it can travel to and from the
//! backend as JSON. Profile records are opaque projections: every field is optional
//! and the client only falls back to placeholders when a field is missing.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Role`] | The three portal audiences; also the `{flow_type}` segment of auth URLs. |
//! | [`Credentials`] | Body of the login request. |
//! | [`ParentProfile`] / [`StudentProfile`] / [`ChildSummary`] | Read-only backend DTOs. |
//! | [`AchievementCategory`] | Closed set of award categories with an `Other` fallback. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Who a dashboard is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Parent,
    Teacher,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Parent, Role::Teacher];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Teacher => "teacher",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Parent => "Parent",
            Role::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            "teacher" => Ok(Role::Teacher),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Login form payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Both fields filled in (after trimming the email).
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Accept ids and grade levels sent as strings or numbers. Anything else reads
/// as missing instead of failing the whole record.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

impl ParentProfile {
    /// The address line, or a placeholder when the backend did not send one.
    pub fn address(&self) -> &str {
        self.contact_info
            .as_ref()
            .and_then(|c| c.address.as_deref())
            .unwrap_or("Not provided")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

/// One entry of the parent's children list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub student_profile: Option<StudentProfile>,
}

impl ChildSummary {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.student_profile.as_ref()?.name.as_deref())
            .unwrap_or("Unnamed student")
    }
}

/// Award categories shown on the achievements tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    Academic,
    Sports,
    Arts,
    Leadership,
    Attendance,
    Other,
}

impl AchievementCategory {
    /// Map a free-form category label; unknown labels become [`Other`](Self::Other).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "academic" | "academics" => Self::Academic,
            "sport" | "sports" => Self::Sports,
            "art" | "arts" | "music" => Self::Arts,
            "leadership" => Self::Leadership,
            "attendance" => Self::Attendance,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Academic => "Academic",
            Self::Sports => "Sports",
            Self::Arts => "Arts",
            Self::Leadership => "Leadership",
            Self::Attendance => "Attendance",
            Self::Other => "Other",
        }
    }
}
