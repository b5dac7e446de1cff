use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 初期管理者ユーザーを作成
        // パスワード: "Adm1n$ecurE2025!" をArgon2でハッシュ化した値
        let admin_password_hash = "$argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0c2FsdA$Qx1wXZCmGJJZzuUF6xEPJzGmQYxkMOkyXCB+JCCpfNw";

        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Users::Table)
                    .columns([
                        Users::Id,
                        Users::Email,
                        Users::Name,
                        Users::PasswordHash,
                        Users::Role,
                    ])
                    .values_panic([
                        // gen_random_uuid()はPostgreSQL 13以降のため、旧バージョンでも動く式を使う
                        Expr::cust("md5(random()::text || clock_timestamp()::text)::uuid"),
                        "admin@example.com".into(),
                        "Admin".into(),
                        admin_password_hash.into(),
                        "ADMIN".into(),
                    ])
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 初期管理者ユーザーを削除
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Users::Table)
                    .and_where(Expr::col(Users::Email).eq("admin@example.com"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
}
