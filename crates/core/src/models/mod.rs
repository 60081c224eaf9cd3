//! Entity models and create/update payloads.
//!
//! Field names follow the API's camelCase JSON. Create payloads never carry
//! an id or timestamps; update payloads only serialize the fields that are
//! set, giving partial-patch semantics.

pub mod comment;
pub mod notification;
pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use comment::{Comment, CreateComment, UpdateComment};
pub use notification::{CreateNotification, Notification, UpdateNotification};
pub use project::{CreateProject, Project, UpdateProject};
pub use status::{NotificationKind, Priority, ProjectStatus, Role, TaskStatus};
pub use task::{CreateTask, Task, UpdateTask};
pub use user::{CreateUser, UpdateUser, User};

/// An entity addressable by its server-assigned id.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_identified!(User, Project, Task, Comment, Notification);
