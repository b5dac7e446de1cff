use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 閲覧イベントログ。アプリケーションからは追記のみで、更新・削除は行わない。
        manager
            .create_table(
                Table::create()
                    .table(PostViews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostViews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostViews::PostId).uuid().not_null())
                    .col(ColumnDef::new(PostViews::UserAgent).text())
                    .col(ColumnDef::new(PostViews::IpAddress).string())
                    .col(ColumnDef::new(PostViews::Referer).text())
                    .col(
                        ColumnDef::new(PostViews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_views_post_id")
                            .from(PostViews::Table, PostViews::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostViews::Table).to_owned())
            .await
    }
}

/// Iden Enum for the 'post_views' table and its columns
#[derive(DeriveIden)]
enum PostViews {
    Table,
    Id,
    PostId,
    UserAgent,
    IpAddress,
    Referer,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
}
