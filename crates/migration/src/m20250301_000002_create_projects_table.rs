use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create project_status enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(ProjectStatus::Table)
                    .values(vec![
                        ProjectStatus::Open,
                        ProjectStatus::InProgress,
                        ProjectStatus::Completed,
                        ProjectStatus::Archived,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create project_visibility enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(ProjectVisibility::Table)
                    .values(vec![
                        ProjectVisibility::Public,
                        ProjectVisibility::Private,
                        ProjectVisibility::Teaser,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_uuid(Projects::Id))
                    .col(string(Projects::Title).not_null())
                    .col(text(Projects::Description).not_null())
                    .col(uuid(Projects::CreatorId).not_null())
                    .col(json_binary(Projects::RequiredSkills).not_null())
                    .col(
                        enumeration(
                            Projects::Status,
                            ProjectStatus::Table,
                            vec![
                                ProjectStatus::Open,
                                ProjectStatus::InProgress,
                                ProjectStatus::Completed,
                                ProjectStatus::Archived,
                            ],
                        )
                        .default("open"),
                    )
                    .col(
                        enumeration(
                            Projects::Visibility,
                            ProjectVisibility::Table,
                            vec![
                                ProjectVisibility::Public,
                                ProjectVisibility::Private,
                                ProjectVisibility::Teaser,
                            ],
                        )
                        .default("public"),
                    )
                    .col(integer(Projects::MaxMembers).not_null().default(5))
                    .col(integer(Projects::CurrentMembers).not_null().default(1))
                    .col(
                        timestamp_with_time_zone(Projects::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Projects::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Add foreign key for creator
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_projects_creator_id")
                    .from(Projects::Table, Projects::CreatorId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Index for discovery listing (newest first per creator)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_creator_id")
                    .table(Projects::Table)
                    .col(Projects::CreatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProjectVisibility::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProjectStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Projects {
    Table,
    Id,
    Title,
    Description,
    CreatorId,
    RequiredSkills,
    Status,
    Visibility,
    MaxMembers,
    CurrentMembers,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ProjectStatus {
    Table,
    Open,
    InProgress,
    Completed,
    Archived,
}

#[derive(DeriveIden)]
pub enum ProjectVisibility {
    Table,
    Public,
    Private,
    Teaser,
}

// Reference to users table
#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
}
