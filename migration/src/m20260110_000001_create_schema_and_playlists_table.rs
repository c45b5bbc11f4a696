use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS mixtape_platform")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER SCHEMA mixtape_platform OWNER TO mixtape")
            .await?;

        // Create playlists table for links shared by logged-in users.
        // Links are validated at the application layer to point at the
        // Spotify web player before a row is created.
        let create_table_sql = r#"
            CREATE TABLE IF NOT EXISTS mixtape_platform.playlists (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id VARCHAR(255) NOT NULL,
                link TEXT NOT NULL,

                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_table_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE mixtape_platform.playlists OWNER TO mixtape")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_playlists_user_id
                 ON mixtape_platform.playlists(user_id)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS mixtape_platform.playlists")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS mixtape_platform")
            .await?;

        Ok(())
    }
}
