use sqlx::SqliteConnection;

use crate::db_types::Consumer;

/// Insert or refresh a consumer display snapshot.
pub async fn upsert_consumer(consumer: &Consumer, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
            INSERT INTO consumers (id, name, email) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name, email = excluded.email;
        "#,
    )
    .bind(consumer.id)
    .bind(&consumer.name)
    .bind(&consumer.email)
    .execute(conn)
    .await?;
    Ok(())
}
