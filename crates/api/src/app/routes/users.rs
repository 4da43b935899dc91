use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use roster_core::UserId;

use crate::app::dto::{self, CreateUserRequest, FullUpdateUserRequest, PaginationHeader, UserDto};
use crate::app::errors::{self, ApiError};
use crate::app::negotiate::{self, ResponseFormat, JSON_UTF8};
use crate::app::services::AppServices;

pub const USERS_PATH: &str = "/api/users";

pub const X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

const ALLOWED_ON_COLLECTION: &str = "POST, GET, OPTIONS";

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user).get(list_users).options(options_users))
        .route(
            "/:user_id",
            get(get_user)
                .head(head_user)
                .put(full_update_user)
                .delete(delete_user),
        )
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    // An id that does not parse cannot name a stored user.
    let Ok(id) = user_id.parse::<UserId>() else {
        return errors::api_error_to_response(ApiError::NotFound, &headers);
    };

    match services.users.find_by_id(id) {
        Some(user) => negotiate::render_negotiated(&headers, StatusCode::OK, &UserDto::from(&user)),
        None => errors::api_error_to_response(ApiError::NotFound, &headers),
    }
}

pub async fn head_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> Response {
    let found = user_id
        .parse::<UserId>()
        .ok()
        .and_then(|id| services.users.find_by_id(id))
        .is_some();

    if found {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
        )
            .into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Option<Json<CreateUserRequest>>,
) -> Response {
    // Every outcome below carries a body, so refuse before touching the store.
    let Some(format) = ResponseFormat::negotiate(&headers) else {
        return errors::api_error_to_response(ApiError::NotAcceptable, &headers);
    };

    let Some(Json(body)) = body else {
        return errors::api_error_to_response(
            ApiError::BadRequest("missing or malformed user payload"),
            &headers,
        );
    };

    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::api_error_to_response(ApiError::Validation(e), &headers),
    };

    let user = services.users.insert(draft);
    tracing::info!(user_id = %user.id, login = %user.login, "user created");

    created(&services, &headers, format, user.id)
}

pub async fn full_update_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    body: Option<Json<FullUpdateUserRequest>>,
) -> Response {
    let (Ok(id), Some(Json(body))) = (user_id.parse::<UserId>(), body) else {
        return errors::api_error_to_response(
            ApiError::BadRequest("invalid user id or missing payload"),
            &headers,
        );
    };

    let entity = match body.into_entity(id) {
        Ok(e) => e,
        Err(e) => return errors::api_error_to_response(ApiError::Validation(e), &headers),
    };

    let (_, outcome) = services.users.update_or_insert(entity);
    if !outcome.was_inserted() {
        tracing::info!(user_id = %id, "user updated");
        return StatusCode::NO_CONTENT.into_response();
    }

    tracing::info!(user_id = %id, "user created by full update");
    match ResponseFormat::negotiate(&headers) {
        Some(format) => created(&services, &headers, format, id),
        None => errors::api_error_to_response(ApiError::NotAcceptable, &headers),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    // Removal and the existence check are one locked step.
    let Some(id) = user_id
        .parse::<UserId>()
        .ok()
        .filter(|id| services.users.delete(*id))
    else {
        return errors::api_error_to_response(ApiError::NotFound, &headers);
    };

    tracing::info!(user_id = %id, "user deleted");
    StatusCode::NO_CONTENT.into_response()
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    query: Result<Query<dto::ListUsersQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return errors::api_error_to_response(ApiError::BadRequest("malformed paging query"), &headers);
    };

    let (page_number, page_size) = services.clamp_page(query.page_number, query.page_size);
    let page = services.users.get_page(page_number, page_size);

    let pagination = PaginationHeader::for_page(&page, |n| {
        services.links.users_page(&headers, n, page_size)
    });
    let users: Vec<UserDto> = page.items.iter().map(UserDto::from).collect();

    let mut response = negotiate::render_negotiated(&headers, StatusCode::OK, &users);
    if response.status() == StatusCode::OK {
        match serde_json::to_string(&pagination).map(HeaderValue::try_from) {
            Ok(Ok(value)) => {
                response.headers_mut().insert(X_PAGINATION, value);
            }
            _ => tracing::warn!("pagination header could not be encoded"),
        }
    }
    response
}

pub async fn options_users() -> Response {
    (
        StatusCode::OK,
        [(header::ALLOW, HeaderValue::from_static(ALLOWED_ON_COLLECTION))],
    )
        .into_response()
}

/// 201 with `Location` pointing at the new user and the id as body.
fn created(services: &AppServices, headers: &HeaderMap, format: ResponseFormat, id: UserId) -> Response {
    let mut response = negotiate::render(format, StatusCode::CREATED, &id);
    if let Ok(location) = HeaderValue::try_from(services.links.user(headers, id)) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
}
