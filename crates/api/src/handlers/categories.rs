//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dailywins_core::error::CoreError;
use dailywins_core::types::DbId;
use dailywins_core::validation::{validate_category_name, validate_hex_color};
use dailywins_db::models::category::{
    Category, CategoryWithCount, CreateCategory, UpdateCategory,
};
use dailywins_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// List the user's categories with per-category entry counts, ordered by
/// name.
pub async fn list_categories(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CategoryWithCount>>>> {
    let categories = CategoryRepo::list_with_counts(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Create a category. Names are unique per user, case-insensitively.
pub async fn create_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.name = validate_category_name(&input.name)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(color) = &input.color {
        validate_hex_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    // Checked up front for a friendly message; the unique index still
    // backstops concurrent creates.
    if CategoryRepo::name_exists(&state.pool, auth_user.user_id, &input.name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You already have a category with this name.".into(),
        )));
    }

    let category = CategoryRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
///
/// Update a category's name, color, or description. Fields omitted from
/// the body are left unchanged.
pub async fn update_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    if let Some(name) = &input.name {
        let trimmed =
            validate_category_name(name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
        if CategoryRepo::name_exists(&state.pool, auth_user.user_id, &trimmed, Some(id)).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "You already have a category with this name.".into(),
            )));
        }
        input.name = Some(trimmed);
    }
    if let Some(color) = &input.color {
        validate_hex_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let category = CategoryRepo::update(&state.pool, auth_user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Delete a category. Entries keep existing; they are simply detached.
/// Returns 204 No Content.
pub async fn delete_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
