//! 访问记录表迁移
//!
//! 创建 visits 表用于存储页面访问明细，包括：
//! - 来源 (referrer, utm source)
//! - 用户代理与设备分类
//! - 客户端指纹哈希
//!
//! 该表只追加不修改，供外部分析/报表消费。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 visits 表
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::PageId).string_len(36).not_null())
                    .col(ColumnDef::new(Visits::Referrer).text().null())
                    .col(ColumnDef::new(Visits::Source).string_len(255).null())
                    .col(ColumnDef::new(Visits::UserAgent).text().null())
                    .col(
                        ColumnDef::new(Visits::DeviceClass)
                            .string_len(16)
                            .not_null()
                            .default("desktop"),
                    )
                    .col(ColumnDef::new(Visits::VisitorHash).string_len(32).null())
                    .col(
                        ColumnDef::new(Visits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 page_id 索引（单页面访问查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visits_page_id")
                    .table(Visits::Table)
                    .col(Visits::PageId)
                    .to_owned(),
            )
            .await?;

        // 创建复合索引（单页面时间序列查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visits_page_time")
                    .table(Visits::Table)
                    .col(Visits::PageId)
                    .col(Visits::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_visits_page_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_visits_page_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Visits {
    #[sea_orm(iden = "visits")]
    Table,
    Id,
    PageId,
    Referrer,
    Source,
    UserAgent,
    DeviceClass,
    VisitorHash,
    CreatedAt,
}
