//! Department entity (master data, cloned per lab)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::OwnerType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub owner_type: OwnerType,

    /// Owning lab id; `None` for master rows
    pub owner_id: Option<Uuid>,

    /// Master department this row was cloned from
    pub parent_id: Option<Uuid>,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,

    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
