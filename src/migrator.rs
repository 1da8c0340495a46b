use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_brands_table::Migration),
            Box::new(m20240101_000002_create_customers_table::Migration),
            Box::new(m20240101_000003_create_products_table::Migration),
            Box::new(m20240101_000004_create_sales_table::Migration),
            Box::new(m20240101_000005_create_sale_items_table::Migration),
            Box::new(m20240101_000006_create_users_table::Migration),
            Box::new(m20240101_000007_create_support_tickets_table::Migration),
            Box::new(m20240101_000008_create_warranty_cards_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_brands_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_brands_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Brands::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Brands::BrandId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Brands::BrandName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Brands::CreatedAt).timestamp_with_time_zone().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Brands::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Brands {
        Table,
        BrandId,
        BrandName,
        CreatedAt,
    }
}

mod m20240101_000002_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::CustomerId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::PhoneNo).string().null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::CreatedAt).timestamp_with_time_zone().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        CustomerId,
        Name,
        PhoneNo,
        Address,
        Email,
        CreatedAt,
    }
}

mod m20240101_000003_create_products_table {
    use super::m20240101_000001_create_brands_table::Brands;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::ProductId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::ProductName).string().not_null())
                        .col(ColumnDef::new(Products::ModelNo).string().null())
                        .col(ColumnDef::new(Products::SerialNo).string().null())
                        .col(ColumnDef::new(Products::BrandId).integer().not_null())
                        .col(ColumnDef::new(Products::CreatedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_brand_id")
                                .from(Products::Table, Products::BrandId)
                                .to(Brands::Table, Brands::BrandId)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_brand_id")
                        .table(Products::Table)
                        .col(Products::BrandId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        ProductId,
        ProductName,
        ModelNo,
        SerialNo,
        BrandId,
        CreatedAt,
    }
}

mod m20240101_000004_create_sales_table {
    use super::m20240101_000002_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_sales_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sales::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sales::SaleId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Sales::BillNo)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Sales::SaleDate).date().not_null())
                        .col(ColumnDef::new(Sales::TotalAmount).decimal().not_null())
                        .col(ColumnDef::new(Sales::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Sales::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Sales::UpdatedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_customer_id")
                                .from(Sales::Table, Sales::CustomerId)
                                .to(Customers::Table, Customers::CustomerId)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_customer_id")
                        .table(Sales::Table)
                        .col(Sales::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_created_at")
                        .table(Sales::Table)
                        .col(Sales::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sales::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Sales {
        Table,
        SaleId,
        BillNo,
        SaleDate,
        TotalAmount,
        CustomerId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_sale_items_table {
    use super::m20240101_000003_create_products_table::Products;
    use super::m20240101_000004_create_sales_table::Sales;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_sale_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SaleItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SaleItems::SaleItemId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SaleItems::SaleId).integer().not_null())
                        .col(ColumnDef::new(SaleItems::ProductId).integer().not_null())
                        .col(ColumnDef::new(SaleItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(SaleItems::UnitPrice).decimal().not_null())
                        .col(ColumnDef::new(SaleItems::CreatedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_items_sale_id")
                                .from(SaleItems::Table, SaleItems::SaleId)
                                .to(Sales::Table, Sales::SaleId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_items_product_id")
                                .from(SaleItems::Table, SaleItems::ProductId)
                                .to(Products::Table, Products::ProductId)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sale_items_sale_id")
                        .table(SaleItems::Table)
                        .col(SaleItems::SaleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SaleItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SaleItems {
        Table,
        SaleItemId,
        SaleId,
        ProductId,
        Quantity,
        UnitPrice,
        CreatedAt,
    }
}

mod m20240101_000006_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::UserId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::FullName).string().null())
                        .col(
                            ColumnDef::new(Users::Role)
                                .string()
                                .not_null()
                                .default("sales"),
                        )
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        UserId,
        Username,
        PasswordHash,
        FullName,
        Role,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_support_tickets_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_support_tickets_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SupportTickets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SupportTickets::TicketId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SupportTickets::TicketNo).string().not_null())
                        .col(ColumnDef::new(SupportTickets::CustomerId).integer().null())
                        .col(ColumnDef::new(SupportTickets::ProductId).integer().null())
                        .col(ColumnDef::new(SupportTickets::SaleId).integer().null())
                        .col(ColumnDef::new(SupportTickets::AssignedTo).integer().null())
                        .col(
                            ColumnDef::new(SupportTickets::IssueTitle)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupportTickets::IssueDescription)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SupportTickets::Status)
                                .string()
                                .not_null()
                                .default("open"),
                        )
                        .col(
                            ColumnDef::new(SupportTickets::Priority)
                                .string()
                                .not_null()
                                .default("medium"),
                        )
                        .col(
                            ColumnDef::new(SupportTickets::ResponseText)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SupportTickets::ResolvedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(SupportTickets::ResolvedBy).integer().null())
                        .col(
                            ColumnDef::new(SupportTickets::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupportTickets::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_support_tickets_created_at")
                        .table(SupportTickets::Table)
                        .col(SupportTickets::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SupportTickets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SupportTickets {
        Table,
        TicketId,
        TicketNo,
        CustomerId,
        ProductId,
        SaleId,
        AssignedTo,
        IssueTitle,
        IssueDescription,
        Status,
        Priority,
        ResponseText,
        ResolvedAt,
        ResolvedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000008_create_warranty_cards_table {
    use super::m20240101_000002_create_customers_table::Customers;
    use super::m20240101_000003_create_products_table::Products;
    use super::m20240101_000005_create_sale_items_table::SaleItems;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_warranty_cards_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WarrantyCards::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WarrantyCards::WarrantyId)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::SaleItemId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::CustomerId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::WarrantyStartDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::WarrantyEndDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::WarrantyCardNo)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::WarrantyCardImage)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarrantyCards::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_warranty_cards_sale_item_id")
                                .from(WarrantyCards::Table, WarrantyCards::SaleItemId)
                                .to(SaleItems::Table, SaleItems::SaleItemId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_warranty_cards_customer_id")
                                .from(WarrantyCards::Table, WarrantyCards::CustomerId)
                                .to(Customers::Table, Customers::CustomerId)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_warranty_cards_product_id")
                                .from(WarrantyCards::Table, WarrantyCards::ProductId)
                                .to(Products::Table, Products::ProductId)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WarrantyCards::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WarrantyCards {
        Table,
        WarrantyId,
        SaleItemId,
        CustomerId,
        ProductId,
        WarrantyStartDate,
        WarrantyEndDate,
        WarrantyCardNo,
        WarrantyCardImage,
        CreatedAt,
    }
}
