//! Column enums shared by several tables

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which kind of principal owns a row
///
/// Paired with a nullable `owner_id` column: `super_admin` rows have no owner id,
/// `lab` rows carry the owning lab's id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    /// Master data maintained by the platform operator
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,

    /// Data owned by a single lab
    #[sea_orm(string_value = "lab")]
    Lab,
}

/// Size of a revision bump
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Bumps the major number and resets minor to 0
    #[sea_orm(string_value = "major")]
    Major,

    /// Bumps the minor number
    #[sea_orm(string_value = "minor")]
    Minor,
}
