use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{extractors::CurrentUser, guard::ensure_owner, password::hash_password},
    error::AppError,
    response::ApiResponse,
    state::AppState,
    users::dto::{UpdateUserRequest, UserData, UserList},
    users::repo::User,
};

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserList>>, AppError> {
    let users: Vec<_> = User::list_all(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::data(UserList {
        count: users.len(),
        users,
    })))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserData>>, AppError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok(Json(ApiResponse::data(UserData { user: user.into() })))
}

#[instrument(skip(state, current, payload), fields(user_id = %current.0.id))]
pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserData>>, AppError> {
    payload.email = payload.email.map(|e| e.trim().to_lowercase());
    payload.name = payload.name.map(|n| n.trim().to_string());

    let errors = payload.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let target = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_owner(&current.0, target.id, "You can only update your own profile")?;

    if let Some(email) = &payload.email {
        if *email != target.email && User::find_by_email(&state.db, email).await?.is_some() {
            warn!(email = %email, "email already taken");
            return Err(AppError::Conflict(
                "User with this email already exists".into(),
            ));
        }
    }

    // Hashing runs only when the update actually carries a new password;
    // name- or email-only updates leave the stored hash untouched.
    let password_hash = match &payload.password {
        Some(plain) => Some(hash_password(plain)?),
        None => None,
    };

    let user = User::update_profile(
        &state.db,
        target.id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        password_hash.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(ApiResponse::with_message(
        "User updated successfully",
        UserData { user: user.into() },
    )))
}

#[instrument(skip(state, current), fields(user_id = %current.0.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let target = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_owner(&current.0, target.id, "You can only delete your own account")?;

    User::delete(&state.db, target.id).await?;

    info!(user_id = %target.id, "user deleted");
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
