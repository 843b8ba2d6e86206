//! Advertisement database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Advertisement;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "advertisements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price_kopecks: i64,
    pub author_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Advertisement {
    fn from(model: Model) -> Self {
        Advertisement {
            id: model.id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            price_kopecks: model.price_kopecks,
            author_id: model.author_id,
            created_at: model.created_at,
        }
    }
}
