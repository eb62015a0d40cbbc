//! Repository for the `sticky_notes` table.

use dailywins_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::sticky_note::StickyNote;

const COLUMNS: &str = "id, user_id, content, position, created_at";

/// Provides CRUD operations for sticky notes, scoped to their owner.
pub struct StickyNoteRepo;

impl StickyNoteRepo {
    /// List a user's sticky notes in display order.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<StickyNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sticky_notes
             WHERE user_id = $1
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, StickyNote>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's sticky notes by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<StickyNote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sticky_notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, StickyNote>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a note at the next ordinal position for the user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        content: &str,
    ) -> Result<StickyNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO sticky_notes (user_id, content, position)
             VALUES ($1, $2,
                 (SELECT COALESCE(MAX(position) + 1, 0) FROM sticky_notes WHERE user_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StickyNote>(&query)
            .bind(user_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Replace a note's content. Returns `None` if the user owns no such
    /// note.
    pub async fn update_content(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        content: &str,
    ) -> Result<Option<StickyNote>, sqlx::Error> {
        let query = format!(
            "UPDATE sticky_notes SET content = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StickyNote>(&query)
            .bind(id)
            .bind(user_id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's sticky notes. Returns `true` if a row was
    /// deleted.
    ///
    /// Takes any executor so the delete can join a caller's transaction.
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sticky_notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
