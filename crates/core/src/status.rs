//! Lookup enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding lookup table (`job_statuses`, `job_priorities`),
//! and each variant's label is its wire and filter spelling.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Lookup ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($entity:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant = $val ),+
        }

        impl $name {
            /// Every variant, in lookup-table order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database lookup ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a database lookup ID back into a variant.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Wire label (JSON value and query-filter spelling).
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        Err(CoreError::Validation(format!(
                            "Invalid {} '{other}'. Must be one of: {}",
                            $entity,
                            allowed.join(", ")
                        )))
                    }
                }
            }
        }
    };
}

define_lookup_enum! {
    /// Job lifecycle status.
    JobStatus ("status") {
        Pending = 1 => "pending",
        Running = 2 => "running",
        Completed = 3 => "completed",
        Failed = 4 => "failed",
    }
}

define_lookup_enum! {
    /// Job priority. Stored and reported, never used to order execution.
    Priority ("priority") {
        Low = 1 => "Low",
        Medium = 2 => "Medium",
        High = 3 => "High",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_match_seed_order() {
        assert_eq!(JobStatus::Pending.id(), 1);
        assert_eq!(JobStatus::Running.id(), 2);
        assert_eq!(JobStatus::Completed.id(), 3);
        assert_eq!(JobStatus::Failed.id(), 4);
    }

    #[test]
    fn from_id_rejects_unknown() {
        assert_eq!(JobStatus::from_id(3), Some(JobStatus::Completed));
        assert_eq!(JobStatus::from_id(0), None);
        assert_eq!(Priority::from_id(9), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(JobStatus::Running).unwrap();
        assert_eq!(json, "running");
    }

    #[test]
    fn priority_serializes_capitalised() {
        let json = serde_json::to_value(Priority::High).unwrap();
        assert_eq!(json, "High");
        let parsed: Priority = serde_json::from_value(serde_json::json!("Low")).unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn default_priority_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn from_str_accepts_labels() {
        assert_eq!("failed".parse::<JobStatus>().unwrap(), JobStatus::Failed);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
    }

    #[test]
    fn from_str_is_case_sensitive_and_lists_choices() {
        let err = "high".parse::<Priority>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Invalid priority 'high'. Must be one of: Low, Medium, High"
        );
        assert!("done".parse::<JobStatus>().is_err());
    }
}
