use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create request_status enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(RequestStatus::Table)
                    .values(vec![
                        RequestStatus::Pending,
                        RequestStatus::Accepted,
                        RequestStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JoinRequests::Table)
                    .if_not_exists()
                    .col(pk_uuid(JoinRequests::Id))
                    .col(uuid(JoinRequests::ProjectId).not_null())
                    .col(uuid(JoinRequests::UserId).not_null())
                    .col(text_null(JoinRequests::Message))
                    .col(
                        enumeration(
                            JoinRequests::Status,
                            RequestStatus::Table,
                            vec![
                                RequestStatus::Pending,
                                RequestStatus::Accepted,
                                RequestStatus::Rejected,
                            ],
                        )
                        .default("pending"),
                    )
                    .col(
                        timestamp_with_time_zone(JoinRequests::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(JoinRequests::UpdatedAt)
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
                    .name("fk_join_requests_project_id")
                    .from(JoinRequests::Table, JoinRequests::ProjectId)
                    .to(Projects::Table, Projects::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Add foreign key for user
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_join_requests_user_id")
                    .from(JoinRequests::Table, JoinRequests::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // At most one pending request per (project, user) pair
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_join_requests_pending_unique")
                    .table(JoinRequests::Table)
                    .col(JoinRequests::ProjectId)
                    .col(JoinRequests::UserId)
                    .unique()
                    .and_where(Expr::cust("status = 'pending'"))
                    .to_owned(),
            )
            .await?;

        // Inbox lookups: requests sent by a user, requests per project
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_join_requests_user_id")
                    .table(JoinRequests::Table)
                    .col(JoinRequests::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_join_requests_project_id")
                    .table(JoinRequests::Table)
                    .col(JoinRequests::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JoinRequests::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RequestStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum JoinRequests {
    Table,
    Id,
    ProjectId,
    UserId,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum RequestStatus {
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
