//! Entity definitions for Synapse
//!
//! This crate contains Sea-ORM entity definitions for the database models.
//! Entities mirror the schema provisioned by the migration crate.

pub mod sea_orm_active_enums;

pub mod join_requests;
pub use join_requests::Entity as JoinRequests;
pub mod project_members;
pub use project_members::Entity as ProjectMembers;
pub mod projects;
pub use projects::Entity as Projects;
pub mod users;
pub use users::Entity as Users;
