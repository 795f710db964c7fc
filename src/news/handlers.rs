use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
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
    comments,
    comments::dto::CommentItem,
    error::AppError,
    news::dto::{
        CreateNewsRequest, NewsData, NewsItem, NewsListQuery, NewsPage, UpdateNewsRequest,
    },
    news::repo,
    response::ApiResponse,
    state::AppState,
};

const MAX_PAGE_SIZE: i64 = 100;

#[instrument(skip(state))]
pub async fn list_news(
    State(state): State<AppState>,
    Query(q): Query<NewsListQuery>,
) -> Result<Json<ApiResponse<NewsPage>>, AppError> {
    let page = q.page.max(1);
    let limit = q.limit.clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;

    let rows = repo::list(&state.db, q.sort, q.order, limit, offset).await?;
    let total = repo::count_all(&state.db).await?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut comments_by_news: HashMap<Uuid, Vec<CommentItem>> = HashMap::new();
    for comment in comments::repo::list_for_news_ids(&state.db, &ids).await? {
        comments_by_news
            .entry(comment.news_id)
            .or_default()
            .push(comment.into());
    }

    let news: Vec<NewsItem> = rows
        .into_iter()
        .map(|row| {
            let comments = comments_by_news.remove(&row.id).unwrap_or_default();
            NewsItem::from_row(row, comments)
        })
        .collect();

    let total_pages = (total + limit - 1) / limit;
    Ok(Json(ApiResponse::data(NewsPage {
        count: news.len(),
        total,
        total_pages,
        current_page: page,
        news,
    })))
}

#[instrument(skip(state))]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NewsData>>, AppError> {
    let row = repo::find_with_author(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("News"))?;

    let comments: Vec<CommentItem> = comments::repo::list_by_news(&state.db, row.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::data(NewsData {
        news: NewsItem::from_row(row, comments),
    })))
}

#[instrument(skip(state, current, payload), fields(user_id = %current.0.id))]
pub async fn create_news(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NewsData>>), AppError> {
    let errors = payload.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let created = repo::create(
        &state.db,
        payload.title.trim(),
        payload.body.trim(),
        current.0.id,
    )
    .await?;

    let row = repo::find_with_author(&state.db, created.id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("created news vanished")))?;

    info!(news_id = %row.id, "news created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "News created successfully",
            NewsData {
                news: NewsItem::from_row(row, Vec::new()),
            },
        )),
    ))
}

#[instrument(skip(state, current, payload), fields(user_id = %current.0.id))]
pub async fn update_news(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNewsRequest>,
) -> Result<Json<ApiResponse<NewsData>>, AppError> {
    // Existence first: a missing article is 404 even for a stranger.
    let news = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("News"))?;

    ensure_owner(
        &current.0,
        news.author_id,
        "You can only update your own news",
    )?;

    let errors = payload.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    repo::update(
        &state.db,
        news.id,
        payload.title.as_deref().map(str::trim),
        payload.body.as_deref().map(str::trim),
    )
    .await?;

    let row = repo::find_with_author(&state.db, news.id)
        .await?
        .ok_or(AppError::NotFound("News"))?;
    let comments: Vec<CommentItem> = comments::repo::list_by_news(&state.db, row.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    info!(news_id = %news.id, "news updated");
    Ok(Json(ApiResponse::with_message(
        "News updated successfully",
        NewsData {
            news: NewsItem::from_row(row, comments),
        },
    )))
}

#[instrument(skip(state, current), fields(user_id = %current.0.id))]
pub async fn delete_news(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let news = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("News"))?;

    ensure_owner_or_admin(
        &current.0,
        news.author_id,
        "You can only delete your own news",
    )?;

    repo::delete(&state.db, news.id).await?;

    info!(news_id = %news.id, "news deleted");
    Ok(Json(ApiResponse::message("News deleted successfully")))
}
