pub mod project;
pub mod user;

pub use project::{NewProject, Project, ProjectDetail, ProjectDto};
pub use user::{NewUser, User, UserDto};
