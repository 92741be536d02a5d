//! Users Entity
//!
//! Represents registered users. Credential issuance and verification live in
//! the external identity provider; this table only mirrors the provisioned
//! columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Uuid")]
    pub id:            uuid::Uuid,
    pub name:          String,
    #[sea_orm(unique)]
    pub email:         String,
    pub password_hash: String,
    pub avatar_url:    Option<String>,
    pub is_active:     bool,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    CreatedProjects,
    #[sea_orm(has_many = "super::project_members::Entity")]
    ProjectMembers,
    #[sea_orm(has_many = "super::join_requests::Entity")]
    JoinRequests,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef { Relation::CreatedProjects.def() }
}

impl Related<super::project_members::Entity> for Entity {
    fn to() -> RelationDef { Relation::ProjectMembers.def() }
}

impl Related<super::join_requests::Entity> for Entity {
    fn to() -> RelationDef { Relation::JoinRequests.def() }
}

impl ActiveModelBehavior for ActiveModel {}
