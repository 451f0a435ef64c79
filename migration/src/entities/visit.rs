//! Visit entity for per-load analytics records

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub page_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer: Option<String>,
    /// Traffic source (utm_source param, ref param, ref:{domain}, or direct)
    pub source: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
    pub device_class: String,
    /// Client-side fingerprint hash (base-36, heuristic only)
    pub visitor_hash: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
