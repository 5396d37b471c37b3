use sea_orm::entity::prelude::*;

/// One search event. `params` holds the JSON document of the request parameters and is
/// the grouping key for statistics.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub search_type: String,
    #[sea_orm(column_type = "Text")]
    pub params: String,
    pub results_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
