use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create member_role enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(MemberRole::Table)
                    .values(vec![MemberRole::Creator, MemberRole::Member])
                    .to_owned(),
            )
            .await?;

        // Create member_status enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(MemberStatus::Table)
                    .values(vec![
                        MemberStatus::Pending,
                        MemberStatus::Accepted,
                        MemberStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectMembers::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProjectMembers::Id))
                    .col(uuid(ProjectMembers::ProjectId).not_null())
                    .col(uuid(ProjectMembers::UserId).not_null())
                    .col(
                        enumeration(
                            ProjectMembers::Role,
                            MemberRole::Table,
                            vec![MemberRole::Creator, MemberRole::Member],
                        )
                        .default("member"),
                    )
                    .col(
                        enumeration(
                            ProjectMembers::Status,
                            MemberStatus::Table,
                            vec![
                                MemberStatus::Pending,
                                MemberStatus::Accepted,
                                MemberStatus::Rejected,
                            ],
                        )
                        .default("accepted"),
                    )
                    .col(
                        timestamp_with_time_zone(ProjectMembers::JoinedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Add foreign key for project
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_project_members_project_id")
                    .from(ProjectMembers::Table, ProjectMembers::ProjectId)
                    .to(Projects::Table, Projects::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Add foreign key for user
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_project_members_user_id")
                    .from(ProjectMembers::Table, ProjectMembers::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Unique constraint: one membership row per (project, user) pair
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_members_project_user_unique")
                    .table(ProjectMembers::Table)
                    .col(ProjectMembers::ProjectId)
                    .col(ProjectMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_members_user_id")
                    .table(ProjectMembers::Table)
                    .col(ProjectMembers::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectMembers::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MemberStatus::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MemberRole::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ProjectMembers {
    Table,
    Id,
    ProjectId,
    UserId,
    Role,
    Status,
    JoinedAt,
}

#[derive(DeriveIden)]
pub enum MemberRole {
    Table,
    Creator,
    Member,
}

#[derive(DeriveIden)]
pub enum MemberStatus {
    Table,
    Pending,
    Accepted,
    Rejected,
}

// Reference to projects table
#[derive(DeriveIden)]
pub enum Projects {
    Table,
    Id,
}

// Reference to users table
#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
}
