//! String-valued enums shared with the remote API.
//!
//! Each enum maps a fixed set of wire strings to variants. Values the client
//! does not know are kept verbatim in an `Other` variant so that a newer
//! server never makes a whole collection fail to decode.

use std::fmt;

macro_rules! define_wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A wire value this client does not recognize.
            Other(String),
        }

        impl $name {
            /// Return the wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

define_wire_enum! {
    /// Account role.
    Role {
        Admin => "admin",
        Member => "member",
    }
}

define_wire_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

define_wire_enum! {
    /// Task workflow status.
    TaskStatus {
        Todo => "todo",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

define_wire_enum! {
    /// Task priority.
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

define_wire_enum! {
    /// Notification severity, serialized as the `type` field.
    NotificationKind {
        Info => "info",
        Success => "success",
        Warning => "warning",
        Error => "error",
    }
}

impl Role {
    /// The role an admin toggle switches to: admins become members, anyone
    /// else becomes an admin.
    pub fn toggled(&self) -> Role {
        match self {
            Role::Admin => Role::Member,
            _ => Role::Admin,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Admin => "Administrator",
            Role::Member => "Member",
            Role::Other(raw) => raw.as_str(),
        }
    }
}

impl TaskStatus {
    /// Human-readable label used in status-change messages.
    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Todo => "to do",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Other(raw) => raw.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_wire_values() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in-progress");
        assert_eq!(TaskStatus::from("completed"), TaskStatus::Completed);
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in-progress")
        );
    }

    #[test]
    fn unknown_wire_value_is_preserved() {
        let status: TaskStatus = serde_json::from_str("\"blocked\"").unwrap();
        assert_eq!(status, TaskStatus::Other("blocked".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"blocked\"");
    }

    #[test]
    fn role_toggle() {
        assert_eq!(Role::Admin.toggled(), Role::Member);
        assert_eq!(Role::Member.toggled(), Role::Admin);
        assert_eq!(Role::from("guest").toggled(), Role::Admin);
    }

    #[test]
    fn display_uses_wire_value() {
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
        assert_eq!(Priority::from("urgent").to_string(), "urgent");
    }
}
