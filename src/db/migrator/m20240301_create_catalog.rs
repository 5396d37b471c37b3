use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(schema.create_table_from_entity(Film).if_not_exists().to_owned())
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Category)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(schema.create_table_from_entity(Actor).if_not_exists().to_owned())
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmCategory)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(FilmActor)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FilmActor).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FilmCategory).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Actor).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(Category).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Film).to_owned()).await
    }
}
