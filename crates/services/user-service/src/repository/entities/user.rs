//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{PendingUser, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub bio: String,
    /// NULL when no image was supplied
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Build an insertable model, assigning a fresh id
impl From<PendingUser> for ActiveModel {
    fn from(pending: PendingUser) -> Self {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            firstname: Set(pending.firstname),
            lastname: Set(pending.lastname),
            email: Set(pending.email),
            password_hash: Set(pending.password_hash),
            bio: Set(pending.bio),
            image: Set(pending.image),
            created_at: Set(pending.created_at),
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            firstname: model.firstname,
            lastname: model.lastname,
            email: model.email,
            password_hash: model.password_hash,
            bio: model.bio,
            image: model.image,
            created_at: model.created_at,
        }
    }
}
