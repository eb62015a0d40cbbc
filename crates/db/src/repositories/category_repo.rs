//! Repository for the `categories` table.
//!
//! Every query is scoped to the owning user: records belonging to another
//! user behave exactly as if they did not exist.

use dailywins_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, user_id, name, color, description, created_at";

/// Provides CRUD operations for categories, scoped to their owner.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List a user's categories with entry counts, ordered by name.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT c.{}, COUNT(ec.entry_id) AS entry_count
             FROM categories c
             LEFT JOIN entry_categories ec ON ec.category_id = c.id
             WHERE c.user_id = $1
             GROUP BY c.id
             ORDER BY c.name ASC",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's categories by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the user already has a category with this name,
    /// case-insensitively, excluding `exclude_id` (the record being edited).
    pub async fn name_exists(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM categories
                WHERE user_id = $1
                  AND LOWER(name) = LOWER($2)
                  AND ($3::bigint IS NULL OR id <> $3)
             )",
        )
        .bind(user_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Create a new category for the user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color, description)
             VALUES ($1, $2, COALESCE($3, '#007bff'), COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update one of the user's categories. Only non-`None` fields are
    /// applied. Returns `None` if the user owns no such category.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($3, name),
                color = COALESCE($4, color),
                description = COALESCE($5, description)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's categories. The m2m rows go with it via
    /// cascade, detaching the category from all entries. Returns `true`
    /// if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// How many of the given category IDs belong to the user.
    ///
    /// Used by the entry write path to reject cross-user category
    /// assignment before any m2m row is written.
    pub async fn count_owned(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM categories WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(ids)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
