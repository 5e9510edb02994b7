//! Command flow for users and projects: validate, look up, mutate, persist,
//! project to a response shape. Storage-agnostic; everything goes through the
//! store traits.

pub mod projects;
pub mod users;
