use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchLog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchLog::Timestamp).string().not_null())
                    .col(ColumnDef::new(SearchLog::SearchType).string().not_null())
                    .col(ColumnDef::new(SearchLog::Params).text().not_null())
                    .col(
                        ColumnDef::new(SearchLog::ResultsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Recent-searches ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_search_log_timestamp")
                    .table(SearchLog::Table)
                    .col(SearchLog::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchLog {
    Table,
    Id,
    Timestamp,
    SearchType,
    Params,
    ResultsCount,
}
