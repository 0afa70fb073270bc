//! Migration: Create users table.

use sea_orm_migration::prelude::*;

const EMAIL_UNIQUE_INDEX: &str = "idx_users_email_unique";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Firstname).string().not_null())
                    .col(ColumnDef::new(Users::Lastname).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Bio).text().not_null().default(""))
                    .col(ColumnDef::new(Users::Image).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Storage-level guard for email uniqueness
        manager.create_index(email_unique_index()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(EMAIL_UNIQUE_INDEX)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Firstname,
    Lastname,
    Email,
    PasswordHash,
    Bio,
    Image,
    CreatedAt,
}

fn email_unique_index() -> IndexCreateStatement {
    Index::create()
        .name(EMAIL_UNIQUE_INDEX)
        .table(Users::Table)
        .col(Users::Email)
        .unique()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_index_is_unique() {
        let sql = email_unique_index().to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"CREATE UNIQUE INDEX "idx_users_email_unique" ON "users" ("email")"#
        );
    }
}
