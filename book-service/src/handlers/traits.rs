//! Handler trait for REST collection endpoints
//!
//! [`CollectionHandler`] is the HTTP-facing side of a resource: each method
//! turns one request into a response envelope or an [`ApiError`]. Like the
//! repository trait it uses RPITIT, so implementations are plain `async fn`s.

use std::future::Future;

use super::error::ApiError;
use super::response::{ItemResponse, ListResponse, MessageResponse};

/// Standard REST CRUD handler trait
///
/// # Type Parameters
///
/// - `Id`: identifier as received in the request path
/// - `Entity`: the record type returned to clients
/// - `CreateDto`: payload accepted by `create`
/// - `UpdateDto`: payload accepted by `update`
pub trait CollectionHandler<Id, Entity, CreateDto, UpdateDto>: Send + Sync {
    /// Every entity in the collection
    fn list(&self) -> impl Future<Output = Result<ListResponse<Entity>, ApiError>> + Send;

    /// A single entity by id
    ///
    /// # Errors
    ///
    /// `NotFound` when no entity has this id.
    fn get(&self, id: Id) -> impl Future<Output = Result<ItemResponse<Entity>, ApiError>> + Send;

    /// Create a new entity, answering 201 with the stored record
    fn create(
        &self,
        dto: CreateDto,
    ) -> impl Future<Output = Result<ItemResponse<Entity>, ApiError>> + Send;

    /// Update an entity, answering with the post-update record
    ///
    /// # Errors
    ///
    /// `NotFound` when no entity has this id.
    fn update(
        &self,
        id: Id,
        dto: UpdateDto,
    ) -> impl Future<Output = Result<ItemResponse<Entity>, ApiError>> + Send;

    /// Permanently remove an entity
    ///
    /// # Errors
    ///
    /// `NotFound` when no entity has this id.
    fn delete(&self, id: Id) -> impl Future<Output = Result<MessageResponse, ApiError>> + Send;
}
