use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Testimonials {
    Table,
    Id,
    Name,
    Message,
    Image,
    Designation,
    Rating,
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
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Testimonials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Testimonials::Name).string().not_null())
                    .col(ColumnDef::new(Testimonials::Message).text().not_null())
                    .col(ColumnDef::new(Testimonials::Image).text().null())
                    .col(
                        ColumnDef::new(Testimonials::Designation)
                            .string()
                            .not_null()
                            .default("Verified Client"),
                    )
                    .col(
                        ColumnDef::new(Testimonials::Rating)
                            .small_integer()
                            .not_null()
                            .default(5)
                            .check(Expr::col(Testimonials::Rating).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(Testimonials::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Testimonials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Testimonials::UpdatedAt)
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
            .drop_table(Table::drop().table(Testimonials::Table).to_owned())
            .await?;
        Ok(())
    }
}
