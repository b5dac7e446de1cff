use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Title).text().not_null())
                    .col(
                        ColumnDef::new(Posts::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::Excerpt).text())
                    .col(ColumnDef::new(Posts::FeaturedImage).string())
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string()
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(
                        ColumnDef::new(Posts::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Posts::PublishedAt).timestamp_with_time_zone())
                    // SEO用カラム
                    .col(ColumnDef::new(Posts::MetaTitle).string())
                    .col(ColumnDef::new(Posts::MetaDescription).text())
                    .col(ColumnDef::new(Posts::FocusKeyword).string())
                    .col(ColumnDef::new(Posts::OgImage).string())
                    .col(ColumnDef::new(Posts::CanonicalUrl).string())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 外部キー制約を追加
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_posts_author_id")
                    .from(Posts::Table, Posts::AuthorId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // ステータス・作成日検索用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Posts::Table)
                    .name("idx_posts_status")
                    .col(Posts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Posts::Table)
                    .name("idx_posts_created_at")
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 人気記事ランキング用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Posts::Table)
                    .name("idx_posts_view_count")
                    .col(Posts::ViewCount)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

/// Iden Enum for the 'posts' table and its columns
#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Excerpt,
    FeaturedImage,
    Status,
    ViewCount,
    AuthorId,
    PublishedAt,
    MetaTitle,
    MetaDescription,
    FocusKeyword,
    OgImage,
    CanonicalUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
