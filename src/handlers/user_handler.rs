//! User management handlers for CRUD operations and password changes.

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info};
use validator::Validate;

use crate::constants::{
    ERR_CHANGE_OWN_PASSWORD_ONLY, ERR_DELETE_OWN_ACCOUNT_ONLY, ERR_UPDATE_OWN_ACCOUNT_ONLY,
    MSG_PASSWORD_CHANGED, MSG_USER_DELETED,
};
use crate::errors::ApiError;
use crate::middleware::{require_auth, require_self};
use crate::models::{
    ChangePasswordRequest, CreateUserRequest, ListQuery, MessageResponse, UpdateUserRequest,
    UserResponse,
};
use crate::services::user_service::USER_SORT_FIELDS;
use crate::services::UserService;
use crate::validators::validation_errors_to_api_error;

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create_user(
    user_service: web::Data<UserService>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let user = user_service.create_user(body.into_inner()).await?;
    let user_response: UserResponse = user.into();

    Ok(HttpResponse::Created().json(user_response))
}

/// List users with search, sort and pagination
///
/// `search` matches the email case-insensitively. `sort_by` accepts
/// `email` (default) or `name`.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of users", body = crate::models::UserPage),
        (status = 400, description = "Invalid sort parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_users(
    user_service: web::Data<UserService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let options = query.into_inner().into_options(USER_SORT_FIELDS)?;
    debug!("Listing users with {:?}", options);

    let page = user_service.get_filtered_users(&options).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed ID", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let user_response: UserResponse = user_service.get_user(&user_id).await?.into();
    Ok(HttpResponse::Ok().json(user_response))
}

/// Update the caller's own name and email
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the caller's account", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let claims = require_auth(&req)?;
    require_self(&claims, &user_id, ERR_UPDATE_OWN_ACCOUNT_ONLY)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let updated_user = user_service
        .update_user(&user_id, body.into_inner())
        .await?;
    let user_response: UserResponse = updated_user.into();

    Ok(HttpResponse::Ok().json(user_response))
}

/// Delete the caller's own account
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the caller's account", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let claims = require_auth(&req)?;
    require_self(&claims, &user_id, ERR_DELETE_OWN_ACCOUNT_ONLY)?;
    info!("User {} deleting own account", claims.sub);

    user_service.delete_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_USER_DELETED)))
}

/// Change the caller's own password
///
/// The current password goes through the same throttle as login, so wrong
/// guesses here count toward the lockout of the account's email.
#[utoipa::path(
    patch,
    path = "/api/users/{id}/change-password",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed successfully", body = MessageResponse),
        (status = 400, description = "Validation error or confirmation mismatch", body = crate::errors::ErrorResponse),
        (status = 401, description = "Wrong current password", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the caller's account, or too many attempts", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn change_password(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<ChangePasswordRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let claims = require_auth(&req)?;
    require_self(&claims, &user_id, ERR_CHANGE_OWN_PASSWORD_ONLY)?;

    body.validate().map_err(validation_errors_to_api_error)?;

    user_service
        .change_password(&user_id, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_PASSWORD_CHANGED)))
}
