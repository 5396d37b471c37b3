use sea_orm_migration::prelude::*;

mod m20240301_create_catalog;
mod m20240301_create_search_log;

/// Film catalog tables. Only applied when `catalog.bootstrap_schema` is set, an existing
/// catalog database is used as-is.
pub struct CatalogMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CatalogMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240301_create_catalog::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("cinesearch_catalog_migrations").into_iden()
    }
}

/// Search log collection. Applied on every log-store connection.
pub struct SearchLogMigrator;

#[async_trait::async_trait]
impl MigratorTrait for SearchLogMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240301_create_search_log::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("cinesearch_search_log_migrations").into_iden()
    }
}
