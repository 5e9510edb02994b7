pub mod project_users;
pub mod projects;
pub mod users;
