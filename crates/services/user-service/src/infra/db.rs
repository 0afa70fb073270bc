//! Database connection and schema management.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::migrations::Migrator;
use crate::MigrateAction;

/// Owns the SeaORM connection backing the users store.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection without touching the schema.
    pub async fn open(database_url: &str) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(database_url).await?;
        Ok(Self { connection })
    }

    /// Open a connection and apply pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::open(database_url).await?;
        db.migrate(MigrateAction::Up).await?;
        Ok(db)
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply a schema action to the users database.
    pub async fn migrate(&self, action: MigrateAction) -> Result<(), DbErr> {
        match action {
            MigrateAction::Up => {
                Migrator::up(&self.connection, None).await?;
                info!("Users schema up to date");
            }
            MigrateAction::Down => {
                Migrator::down(&self.connection, Some(1)).await?;
                info!("Rolled back last migration");
            }
            // Lists each migration with its applied state
            MigrateAction::Status => Migrator::status(&self.connection).await?,
            MigrateAction::Fresh => {
                Migrator::fresh(&self.connection).await?;
                info!("Database reset and migrations applied");
            }
        }
        Ok(())
    }
}
