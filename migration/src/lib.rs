// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 基本テーブルのマイグレーション
mod m20250801_000001_create_users_table;
mod m20250801_000002_create_posts_table;
mod m20250801_000003_create_categories_table;
mod m20250801_000004_create_tags_table;

// 分類関連（posts/categories/tagsに依存）
mod m20250801_000005_create_post_taxonomy_tables;

// コメント・閲覧ログ関連
mod m20250801_000006_create_comments_table;
mod m20250801_000007_create_post_views_table;

// サイト設定
mod m20250801_000008_create_site_settings_table;

// 分析クエリ用インデックス
mod m20250801_000009_add_post_view_indexes;

// 初期管理者ユーザー作成
mod m20250801_000010_create_initial_admin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250801_000001_create_users_table::Migration),
            Box::new(m20250801_000003_create_categories_table::Migration),
            Box::new(m20250801_000004_create_tags_table::Migration),
            // 2. usersテーブルに依存するテーブル
            Box::new(m20250801_000002_create_posts_table::Migration),
            // 3. postsテーブルに依存するテーブル
            Box::new(m20250801_000005_create_post_taxonomy_tables::Migration),
            Box::new(m20250801_000006_create_comments_table::Migration),
            Box::new(m20250801_000007_create_post_views_table::Migration),
            // 4. 独立テーブル
            Box::new(m20250801_000008_create_site_settings_table::Migration),
            // 5. インデックス追加
            Box::new(m20250801_000009_add_post_view_indexes::Migration),
            // 6. 初期管理者ユーザー作成
            Box::new(m20250801_000010_create_initial_admin::Migration),
        ]
    }
}
