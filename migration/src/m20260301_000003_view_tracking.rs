//! 浏览计数追踪表迁移
//!
//! 创建 view_tracking 表，每条记录对应一次被计入的浏览，
//! 仅用于限流窗口和去重窗口的判定。只追加不修改。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ViewTracking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ViewTracking::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ViewTracking::PageId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ViewTracking::VisitorHash)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ViewTracking::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 限流查询：按访客哈希 + 时间窗口 COUNT
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_view_tracking_visitor_time")
                    .table(ViewTracking::Table)
                    .col(ViewTracking::VisitorHash)
                    .col(ViewTracking::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 去重查询：按 (page, 访客哈希) + 时间窗口 EXISTS
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_view_tracking_page_visitor_time")
                    .table(ViewTracking::Table)
                    .col(ViewTracking::PageId)
                    .col(ViewTracking::VisitorHash)
                    .col(ViewTracking::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_view_tracking_page_visitor_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_view_tracking_visitor_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ViewTracking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ViewTracking {
    #[sea_orm(iden = "view_tracking")]
    Table,
    Id,
    PageId,
    VisitorHash,
    CreatedAt,
}
