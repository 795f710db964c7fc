use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        extractors::CurrentUser,
        guard::{ensure_owner, ensure_owner_or_admin},
    },
    comments::dto::{
        validate_comment_body, CommentData, CommentItem, CommentList, CreateCommentRequest,
        UpdateCommentRequest,
    },
    comments::repo,
    error::AppError,
    news,
    response::ApiResponse,
    state::AppState,
};

async fn ensure_news_exists(state: &AppState, news_id: Uuid) -> Result<(), AppError> {
    news::repo::find_by_id(&state.db, news_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound("News"))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(news_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CommentList>>, AppError> {
    ensure_news_exists(&state, news_id).await?;

    let comments: Vec<CommentItem> = repo::list_by_news(&state.db, news_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::data(CommentList {
        count: comments.len(),
        comments,
    })))
}

#[instrument(skip(state, current, payload), fields(user_id = %current.0.id))]
pub async fn create_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(news_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentData>>), AppError> {
    ensure_news_exists(&state, news_id).await?;

    let errors = validate_comment_body(&payload.body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let comment = repo::create(&state.db, payload.body.trim(), current.0.id, news_id).await?;
    let comment = repo::find_with_user(&state.db, comment.id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("created comment vanished")))?;

    info!(comment_id = %comment.id, news_id = %news_id, "comment created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Comment created successfully",
            CommentData {
                comment: comment.into(),
            },
        )),
    ))
}

#[instrument(skip(state, current, payload), fields(user_id = %current.0.id))]
pub async fn update_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<CommentData>>, AppError> {
    let comment = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Comment"))?;

    ensure_owner(
        &current.0,
        comment.user_id,
        "You can only update your own comments",
    )?;

    let errors = validate_comment_body(&payload.body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    repo::update(&state.db, comment.id, payload.body.trim()).await?;
    let comment = repo::find_with_user(&state.db, comment.id)
        .await?
        .ok_or(AppError::NotFound("Comment"))?;

    info!(comment_id = %comment.id, "comment updated");
    Ok(Json(ApiResponse::with_message(
        "Comment updated successfully",
        CommentData {
            comment: comment.into(),
        },
    )))
}

#[instrument(skip(state, current), fields(user_id = %current.0.id))]
pub async fn delete_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let comment = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Comment"))?;

    ensure_owner_or_admin(
        &current.0,
        comment.user_id,
        "You can only delete your own comments",
    )?;

    repo::delete(&state.db, comment.id).await?;

    info!(comment_id = %comment.id, "comment deleted");
    Ok(Json(ApiResponse::message("Comment deleted successfully")))
}
