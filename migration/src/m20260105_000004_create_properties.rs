use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Title,
    Slug,
    Description,
    Type,
    Purpose,
    Location,
    Brochure,
    Builder,
    Images,
    Price,
    Bedrooms,
    Bathrooms,
    AreaSqft,
    Highlights,
    FeaturesAmenities,
    Nearby,
    GoogleMapUrl,
    VideoLink,
    MetaTitle,
    MetaDescription,
    CreatedAt,
    LastUpdated,
}

fn text_default(col: Properties) -> ColumnDef {
    ColumnDef::new(col)
        .text()
        .not_null()
        .default("")
        .to_owned()
}

fn list_default(col: Properties) -> ColumnDef {
    ColumnDef::new(col)
        .json_binary()
        .not_null()
        .default(Expr::cust("'[]'::jsonb"))
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::Title).string().not_null())
                    .col(
                        ColumnDef::new(Properties::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(&mut text_default(Properties::Description))
                    .col(&mut text_default(Properties::Type))
                    .col(ColumnDef::new(Properties::Purpose).string_len(16).not_null())
                    .col(ColumnDef::new(Properties::Location).string().not_null())
                    .col(&mut text_default(Properties::Brochure))
                    .col(&mut text_default(Properties::Builder))
                    .col(&mut list_default(Properties::Images))
                    .col(ColumnDef::new(Properties::Price).double().null())
                    .col(&mut text_default(Properties::Bedrooms))
                    .col(&mut text_default(Properties::Bathrooms))
                    .col(&mut text_default(Properties::AreaSqft))
                    .col(&mut list_default(Properties::Highlights))
                    .col(&mut list_default(Properties::FeaturesAmenities))
                    .col(&mut list_default(Properties::Nearby))
                    .col(&mut text_default(Properties::GoogleMapUrl))
                    .col(&mut text_default(Properties::VideoLink))
                    .col(&mut text_default(Properties::MetaTitle))
                    .col(&mut text_default(Properties::MetaDescription))
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Properties::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_properties_created_at")
                    .table(Properties::Table)
                    .col(Properties::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;
        Ok(())
    }
}
