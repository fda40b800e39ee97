//! Route handlers. Each one reads its path/body parameters, calls a single
//! DAO method and serializes the result back as JSON.
use axum::extract::{Extension, Path};
use axum::routing::{get, post};
use axum::{Json, Router};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use crate::models::{Credentials, InDB, Tuit, User};
use crate::server::{ApiError, ApiResult, Context, DeleteOutcome, UpdateOutcome};

/// All routes of the service.
///
/// Note that the delete/update routes declare `:tid`/`:uid` and the handlers
/// read exactly those names.
pub fn router() -> Router {
    Router::new()
        .route("/tuits", get(find_all_tuits))
        .route(
            "/tuits/:tid",
            get(find_tuit_by_id).put(update_tuit).delete(delete_tuit),
        )
        .route(
            "/users/:uid/tuits",
            get(find_tuits_by_user).post(create_tuit),
        )
        .route(
            "/users",
            get(find_all_users).post(create_user).delete(delete_all_users),
        )
        .route(
            "/users/:uid",
            get(find_user_by_id).put(update_user).delete(delete_user),
        )
        // Not nested under /users: the router rejects a static segment
        // overlapping the `:uid` parameter.
        .route(
            "/username/:username",
            get(find_user_by_username).delete(delete_users_by_username),
        )
        .route("/login", post(find_user_by_credentials))
}

/// Parse a hex `ObjectId` path parameter, rejecting malformed ids up front
/// instead of passing garbage to the driver.
fn object_id(param: &str, raw: &str) -> ApiResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::bad_object_id(param, raw))
}

// Tuits

async fn find_all_tuits(Extension(ctx): Extension<Context>) -> ApiResult<Json<Vec<InDB<Tuit>>>> {
    ctx.tuits().find_all().await.map(Json)
}

async fn find_tuit_by_id(
    Path(tid): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<Option<InDB<Tuit>>>> {
    let tid = object_id("tid", &tid)?;
    ctx.tuits().find_by_id(tid).await.map(Json)
}

async fn find_tuits_by_user(
    Path(uid): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<Vec<InDB<Tuit>>>> {
    ctx.tuits().find_by_user(&uid).await.map(Json)
}

async fn create_tuit(
    Path(uid): Path<String>,
    Extension(ctx): Extension<Context>,
    Json(tuit): Json<Tuit>,
) -> ApiResult<Json<InDB<Tuit>>> {
    tracing::debug!(uid = uid.as_str(), tuit = ?tuit, "Create tuit");
    ctx.tuits().create(&uid, tuit).await.map(Json)
}

async fn update_tuit(
    Path(tid): Path<String>,
    Extension(ctx): Extension<Context>,
    Json(changes): Json<Document>,
) -> ApiResult<Json<UpdateOutcome>> {
    let tid = object_id("tid", &tid)?;
    tracing::debug!(%tid, changes = ?changes, "Update tuit");
    ctx.tuits().update(tid, changes).await.map(Json)
}

async fn delete_tuit(
    Path(tid): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<DeleteOutcome>> {
    let tid = object_id("tid", &tid)?;
    ctx.tuits().delete(tid).await.map(Json)
}

// Users

async fn find_all_users(Extension(ctx): Extension<Context>) -> ApiResult<Json<Vec<InDB<User>>>> {
    ctx.users().find_all().await.map(Json)
}

async fn find_user_by_id(
    Path(uid): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<Option<InDB<User>>>> {
    let uid = object_id("uid", &uid)?;
    ctx.users().find_by_id(uid).await.map(Json)
}

async fn find_user_by_username(
    Path(username): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<Option<InDB<User>>>> {
    ctx.users().find_by_username(&username).await.map(Json)
}

async fn find_user_by_credentials(
    Extension(ctx): Extension<Context>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<Option<InDB<User>>>> {
    ctx.users()
        .find_by_credentials(&credentials.username, &credentials.password)
        .await
        .map(Json)
}

async fn create_user(
    Extension(ctx): Extension<Context>,
    Json(user): Json<User>,
) -> ApiResult<Json<InDB<User>>> {
    tracing::debug!(username = user.username.as_str(), "Create user");
    ctx.users().create(user).await.map(Json)
}

async fn update_user(
    Path(uid): Path<String>,
    Extension(ctx): Extension<Context>,
    Json(changes): Json<Document>,
) -> ApiResult<Json<UpdateOutcome>> {
    let uid = object_id("uid", &uid)?;
    ctx.users().update(uid, changes).await.map(Json)
}

async fn delete_user(
    Path(uid): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<DeleteOutcome>> {
    let uid = object_id("uid", &uid)?;
    ctx.users().delete(uid).await.map(Json)
}

async fn delete_all_users(
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<DeleteOutcome>> {
    ctx.users().delete_all().await.map(Json)
}

async fn delete_users_by_username(
    Path(username): Path<String>,
    Extension(ctx): Extension<Context>,
) -> ApiResult<Json<DeleteOutcome>> {
    ctx.users().delete_by_username(&username).await.map(Json)
}
