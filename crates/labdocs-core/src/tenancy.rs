//! Tenant context and ownership
//!
//! Rows are owned either by the platform (`super_admin`, no owner id) or by a
//! single lab. The engine works with [`Owner`]; the two-column
//! `(owner_type, owner_id)` form only exists at the persistence boundary.

use std::fmt;
use std::str::FromStr;

use http::HeaderMap;
use labdocs_db::entities::common::OwnerType;
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Default request header carrying the tenant
pub const DEFAULT_TENANT_HEADER: &str = "x-tenant";

/// Owner of a master-data or document row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Owner {
    SuperAdmin,
    Lab(Uuid),
}

impl Owner {
    /// Split into the stored `(owner_type, owner_id)` pair
    pub fn to_columns(self) -> (OwnerType, Option<Uuid>) {
        match self {
            Owner::SuperAdmin => (OwnerType::SuperAdmin, None),
            Owner::Lab(id) => (OwnerType::Lab, Some(id)),
        }
    }

    /// Rebuild from the stored pair
    ///
    /// A lab row without an owner id is corrupt and reported as an invalid tenant.
    /// An owner id on a `super_admin` row is ignored.
    pub fn from_columns(owner_type: OwnerType, owner_id: Option<Uuid>) -> EngineResult<Self> {
        match (owner_type, owner_id) {
            (OwnerType::SuperAdmin, _) => Ok(Owner::SuperAdmin),
            (OwnerType::Lab, Some(id)) => Ok(Owner::Lab(id)),
            (OwnerType::Lab, None) => Err(EngineError::InvalidTenant(
                "lab-owned row without owner id".to_string(),
            )),
        }
    }

    /// Condition matching rows owned by `self`
    pub fn scope<T, I>(self, owner_type: T, owner_id: I) -> Condition
    where
        T: ColumnTrait,
        I: ColumnTrait,
    {
        match self {
            Owner::SuperAdmin => Condition::all()
                .add(owner_type.eq(OwnerType::SuperAdmin))
                .add(owner_id.is_null()),
            Owner::Lab(id) => Condition::all()
                .add(owner_type.eq(OwnerType::Lab))
                .add(owner_id.eq(id)),
        }
    }

    pub fn lab_id(self) -> Option<Uuid> {
        match self {
            Owner::SuperAdmin => None,
            Owner::Lab(id) => Some(id),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::SuperAdmin => write!(f, "super_admin"),
            Owner::Lab(id) => write!(f, "lab:{}", id),
        }
    }
}

impl FromStr for Owner {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("super_admin") {
            return Ok(Owner::SuperAdmin);
        }

        let raw_id = s.strip_prefix("lab:").unwrap_or(s);
        Uuid::parse_str(raw_id.trim())
            .map(Owner::Lab)
            .map_err(|_| EngineError::InvalidTenant(s.to_string()))
    }
}

/// Weak lineage pointer from a lab copy back to the master row it came from
///
/// Never followed for cascading deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClonedFrom(pub Uuid);

impl ClonedFrom {
    pub fn as_column(self) -> Option<Uuid> {
        Some(self.0)
    }
}

/// Resolves the tenant of an incoming request from its headers
#[derive(Debug, Clone)]
pub struct TenantResolver {
    header: String,
}

impl Default for TenantResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TENANT_HEADER)
    }
}

impl TenantResolver {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into().to_ascii_lowercase(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Map the tenant header to an owner
    ///
    /// Missing, empty or `super_admin` resolves to [`Owner::SuperAdmin`];
    /// `lab:<uuid>` or a bare UUID resolves to [`Owner::Lab`].
    pub fn resolve(&self, headers: &HeaderMap) -> EngineResult<Owner> {
        match headers.get(self.header.as_str()) {
            None => Ok(Owner::SuperAdmin),
            Some(value) => {
                let value = value
                    .to_str()
                    .map_err(|_| EngineError::InvalidTenant("non-ASCII header".to_string()))?;
                value.parse()
            }
        }
    }
}
