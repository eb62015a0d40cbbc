//! Repository for the `entries` table and its category attachments.
//!
//! All queries are scoped to the owning user. The "one entry per user per
//! day" rule is enforced by the `uq_entries_user_entry_date` constraint;
//! concurrent creates for the same day lose with a 23505 the API layer
//! turns into a conflict message.

use chrono::NaiveDate;
use dailywins_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::Category;
use crate::models::entry::{Entry, EntryChanges, EntryFilter, NewEntry};
use crate::repositories::CategoryRepo;

/// Column list for entries queries.
const COLUMNS: &str = "id, user_id, entry_date, title, content, gratitude_text, \
                       mood_rating, is_private, created_at, updated_at";

/// Shared WHERE fragment applying the optional list filters.
///
/// Bind order: $1 user_id, $2 category, $3 search text, $4 content filter.
const FILTER_WHERE: &str = "user_id = $1
    AND ($2::bigint IS NULL OR id IN
        (SELECT entry_id FROM entry_categories WHERE category_id = $2))
    AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%' OR content ILIKE '%' || $3 || '%')
    AND ($4::text IS NULL
        OR ($4 = 'wins' AND content <> '')
        OR ($4 = 'gratitude' AND gratitude_text <> ''))";

/// Provides CRUD, filtering, and calendar lookups for daily entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new entry for the user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NewEntry,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (user_id, entry_date, title, content, gratitude_text, mood_rating)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .bind(input.entry_date)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.gratitude_text)
            .bind(input.mood_rating)
            .fetch_one(pool)
            .await
    }

    /// Find one of the user's entries by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user's entry for a specific date.
    pub async fn find_by_date(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE user_id = $1 AND entry_date = $2");
        sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Get the user's entry for `date`, creating a blank one if none
    /// exists yet.
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` followed by a re-select so
    /// a concurrent create of the same day is absorbed instead of failing.
    pub async fn get_or_create_for_date(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Entry, sqlx::Error> {
        if let Some(entry) = Self::find_by_date(pool, user_id, date).await? {
            return Ok(entry);
        }

        sqlx::query(
            "INSERT INTO entries (user_id, entry_date)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_entries_user_entry_date DO NOTHING",
        )
        .bind(user_id)
        .bind(date)
        .execute(pool)
        .await?;

        // Either our insert or the concurrent winner's row.
        match Self::find_by_date(pool, user_id, date).await? {
            Some(entry) => Ok(entry),
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    /// List the user's entries, filtered and paginated, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &EntryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE {FILTER_WHERE}
             ORDER BY entry_date DESC NULLS LAST, created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .bind(filter.category)
            .bind(&filter.q)
            .bind(&filter.has_content)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the user's entries matching the same filters as [`Self::list`].
    pub async fn count(
        pool: &PgPool,
        user_id: DbId,
        filter: &EntryFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM entries WHERE {FILTER_WHERE}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(user_id)
            .bind(filter.category)
            .bind(&filter.q)
            .bind(&filter.has_content)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Apply field changes to one of the user's entries.
    ///
    /// Returns `None` if the user owns no such entry. Takes any executor
    /// so the update can join a caller's transaction.
    pub async fn update(
        executor: impl sqlx::PgExecutor<'_>,
        user_id: DbId,
        id: DbId,
        changes: &EntryChanges,
    ) -> Result<Option<Entry>, sqlx::Error> {
        // $5/$7 are "should this column change" flags so a nullable column
        // can be explicitly cleared, unlike the plain COALESCE pattern.
        let query = format!(
            "UPDATE entries SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                entry_date = CASE WHEN $5 THEN $6 ELSE entry_date END,
                mood_rating = CASE WHEN $7 THEN $8 ELSE mood_rating END,
                gratitude_text = COALESCE($9, gratitude_text),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(changes.entry_date.is_some())
            .bind(changes.entry_date.flatten())
            .bind(changes.mood_rating.is_some())
            .bind(changes.mood_rating.flatten())
            .bind(&changes.gratitude_text)
            .fetch_optional(executor)
            .await
    }

    /// Delete one of the user's entries. Returns `true` if a row was
    /// deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace an entry's category attachments.
    ///
    /// Returns `false` without writing anything when any of the given
    /// categories is not owned by `user_id` -- users can only assign
    /// their own categories to their entries.
    pub async fn set_categories(
        pool: &PgPool,
        user_id: DbId,
        entry_id: DbId,
        category_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        if !category_ids.is_empty() {
            let owned = CategoryRepo::count_owned(pool, user_id, category_ids).await?;
            if owned != category_ids.len() as i64 {
                tracing::warn!(
                    user_id,
                    entry_id,
                    "Refused category assignment including categories the user does not own"
                );
                return Ok(false);
            }
        }

        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM entry_categories WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;
        for &category_id in category_ids {
            sqlx::query(
                "INSERT INTO entry_categories (entry_id, category_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(entry_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(true)
    }

    /// List the categories attached to an entry, ordered by name.
    pub async fn categories_for_entry(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT c.id, c.user_id, c.name, c.color, c.description, c.created_at
             FROM categories c
             JOIN entry_categories ec ON ec.category_id = c.id
             WHERE ec.entry_id = $1
             ORDER BY c.name ASC",
        )
        .bind(entry_id)
        .fetch_all(pool)
        .await
    }

    /// Dates in `[start, end]` (inclusive) on which the user has an entry.
    pub async fn dates_between(
        pool: &PgPool,
        user_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT entry_date FROM entries
             WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
             ORDER BY entry_date ASC",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(d,)| d).collect())
    }

    /// The user's entries with dates in `[start, end]`, oldest first.
    pub async fn list_between(
        pool: &PgPool,
        user_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
             ORDER BY entry_date ASC"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
