use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum FeaturedProperties {
    Table,
    Id,
    Title,
    Slug,
    Location,
    Price,
    Image,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeaturedProperties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeaturedProperties::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeaturedProperties::Title).string().not_null())
                    .col(
                        ColumnDef::new(FeaturedProperties::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeaturedProperties::Location).string().not_null())
                    .col(ColumnDef::new(FeaturedProperties::Price).double().not_null())
                    .col(ColumnDef::new(FeaturedProperties::Image).text().not_null())
                    .col(
                        ColumnDef::new(FeaturedProperties::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FeaturedProperties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(FeaturedProperties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeaturedProperties::Table).to_owned())
            .await?;
        Ok(())
    }
}
