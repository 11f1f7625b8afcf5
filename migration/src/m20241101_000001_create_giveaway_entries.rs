use sea_orm_migration::prelude::*;

/// Giveaway Entries (one row per qualifying customer)
#[derive(DeriveIden)]
enum GiveawayEntries {
    Table,
    Id,
    Name,
    Email,
    OrderNumber,
    EntryDate,
    Status,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// email 与 order_number 各自唯一:
/// validate 与 submit 之间没有事务, 并发提交时由唯一索引兜底,
/// 失败方收到 unique violation 而不是重复行。
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GiveawayEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GiveawayEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GiveawayEntries::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GiveawayEntries::Email)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GiveawayEntries::OrderNumber)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GiveawayEntries::EntryDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GiveawayEntries::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_giveaway_entries_email_unique")
                    .table(GiveawayEntries::Table)
                    .col(GiveawayEntries::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_giveaway_entries_order_number_unique")
                    .table(GiveawayEntries::Table)
                    .col(GiveawayEntries::OrderNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 后台列表按 entry_date 倒序分页
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_giveaway_entries_entry_date")
                    .table(GiveawayEntries::Table)
                    .col(GiveawayEntries::EntryDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(GiveawayEntries::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
