use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name shown in the catalog header (max 20 chars, enforced
    /// at the form boundary).
    pub name: String,

    /// Login name. Absent until the admin account is provisioned.
    #[sea_orm(unique)]
    pub username: Option<String>,

    /// Argon2id password hash (PHC string)
    pub password_hash: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
