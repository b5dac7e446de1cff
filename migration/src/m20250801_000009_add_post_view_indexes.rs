use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 記事別の集計用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(PostViews::Table)
                    .name("idx_post_views_post_id")
                    .col(PostViews::PostId)
                    .to_owned(),
            )
            .await?;

        // 期間集計用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(PostViews::Table)
                    .name("idx_post_views_created_at")
                    .col(PostViews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 記事別・日別の時系列集計用複合インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(PostViews::Table)
                    .name("idx_post_views_post_created_at")
                    .col(PostViews::PostId)
                    .col(PostViews::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(PostViews::Table)
                    .name("idx_post_views_post_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(PostViews::Table)
                    .name("idx_post_views_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(PostViews::Table)
                    .name("idx_post_views_post_created_at")
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum PostViews {
    Table,
    PostId,
    CreatedAt,
}
