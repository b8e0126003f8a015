use std::future::Future;
use std::sync::Arc;

use tracing::info;

use super::store::SharedStore;
use super::{parse_int, ListQuery, User, UserPatch};
use crate::error::ApiError;
use crate::handler::Handler;
use crate::method::Method;
use crate::middleware::{AuthConfig, Authenticate, Authorize, Chain, Logger, Role};
use crate::request::Request;
use crate::response::{IntoResponse, Json};
use crate::router::Router;
use crate::status::Status;

/// The `/api/users` resource.
///
/// Every request is logged and must authenticate; `/api/users/admin-only`
/// additionally requires the admin role.
pub fn routes(store: SharedStore, auth: AuthConfig) -> Router {
    let admin_only = Chain::new().stage(Authorize::role(Role::Admin));

    Router::new()
        .stage(Logger)
        .stage(Authenticate::new(auth))
        .on(Method::Get,    "/api/users",      with_store(&store, list))
        .on(Method::Get,    "/api/users/{id}", with_store(&store, get))
        .on(Method::Post,   "/api/users",      with_store(&store, create))
        .on(Method::Put,    "/api/users/{id}", with_store(&store, replace))
        .on(Method::Patch,  "/api/users/{id}", with_store(&store, update))
        .on(Method::Delete, "/api/users/{id}", with_store(&store, delete))
        .on_with(Method::Get, "/api/users/admin-only", admin_only, with_store(&store, list_admins))
}

/// Binds a store-taking handler to `store`.
fn with_store<F, Fut, R>(store: &SharedStore, f: F) -> impl Handler + use<F, Fut, R>
where
    F: Fn(SharedStore, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let store = Arc::clone(store);
    move |req: Request| f(Arc::clone(&store), req)
}

fn user_id(req: &Request) -> Result<i64, ApiError> {
    let raw = req.param("id").unwrap_or_default();
    parse_int(raw).ok_or_else(|| ApiError::NotFound(raw.to_owned()))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(id.to_string())
}

// GET /api/users?city=&minAge=&maxAge=&sort=
async fn list(store: SharedStore, req: Request) -> Json<Vec<User>> {
    Json::ok(ListQuery::from_request(&req).apply(store.list()))
}

// GET /api/users/admin-only
async fn list_admins(store: SharedStore, _req: Request) -> Json<Vec<User>> {
    let mut users = store.list();
    users.retain(|u| u.role == Some(Role::Admin));
    Json::ok(users)
}

// GET /api/users/{id}
async fn get(store: SharedStore, req: Request) -> Result<Json<User>, ApiError> {
    let id = user_id(&req)?;
    store.find(id).map(Json::ok).ok_or_else(|| not_found(id))
}

// POST /api/users
//
// No duplicate-id check: a second record with a taken id is appended and
// shadowed by the first one on lookups.
async fn create(store: SharedStore, req: Request) -> Result<Json<User>, ApiError> {
    let user: User = serde_json::from_slice(req.body())?;
    info!(id = user.id, "user created");
    store.append(user.clone());
    Ok(Json::with_status(Status::Created, user))
}

// PUT /api/users/{id}
async fn replace(store: SharedStore, req: Request) -> Result<Json<User>, ApiError> {
    let user: User = serde_json::from_slice(req.body())?;
    let id = user_id(&req)?;
    store.replace(id, user).map(Json::ok).ok_or_else(|| not_found(id))
}

// PATCH /api/users/{id}
async fn update(store: SharedStore, req: Request) -> Result<Json<User>, ApiError> {
    let patch: UserPatch = serde_json::from_slice(req.body())?;
    let id = user_id(&req)?;
    store.merge(id, patch).map(Json::ok).ok_or_else(|| not_found(id))
}

// DELETE /api/users/{id}
async fn delete(store: SharedStore, req: Request) -> Result<String, ApiError> {
    let id = user_id(&req)?;
    match store.remove(id) {
        Some(_) => {
            info!(id, "user deleted");
            Ok(format!("User with id {id} deleted"))
        }
        None => Err(not_found(id)),
    }
}
