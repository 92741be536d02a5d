//! Projects Entity
//!
//! Represents student projects with capacity tracking.
//!
//! `current_members` is a cached counter: it always equals one (the creator)
//! plus the number of accepted `member` rows in `project_members`. It is
//! maintained inside the same transaction as any membership mutation and is
//! never recomputed from the ledger on the request path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ProjectStatus, ProjectVisibility};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Uuid")]
    pub id:              uuid::Uuid,
    pub title:           String,
    #[sea_orm(column_type = "Text")]
    pub description:     String,
    pub creator_id:      uuid::Uuid,
    /// JSON array of skill names
    pub required_skills: Json,
    pub status:          ProjectStatus,
    pub visibility:      ProjectVisibility,
    pub max_members:     i32,
    pub current_members: i32,
    pub created_at:      chrono::DateTime<chrono::Utc>,
    pub updated_at:      chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::project_members::Entity")]
    ProjectMembers,
    #[sea_orm(has_many = "super::join_requests::Entity")]
    JoinRequests,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Creator.def() }
}

impl Related<super::project_members::Entity> for Entity {
    fn to() -> RelationDef { Relation::ProjectMembers.def() }
}

impl Related<super::join_requests::Entity> for Entity {
    fn to() -> RelationDef { Relation::JoinRequests.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Required skills as a plain string list.
    pub fn skills(&self) -> Vec<String> {
        self.required_skills
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the project has a free member slot.
    pub fn has_capacity(&self) -> bool { self.current_members < self.max_members }
}
