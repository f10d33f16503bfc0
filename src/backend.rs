use log::info;
use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::Request;
use rusqlite::Connection;

use std::sync::{Arc, Mutex};

use crate::auth::UserID;
use crate::config::StoreKind;
use crate::data::{DBConnection, DeleteResult, EntityID, ErrorBody};
use crate::input::Validate;
use crate::internal_error::{InternalError, InternalResult};
use crate::store::{LocalRepository, Repository, TableRepository, TableRow};

/// The configured store, shared by every route.
pub struct Backend {
    connection: DBConnection,
    kind: StoreKind,
}

impl Backend {
    pub fn new(connection: Connection, kind: StoreKind) -> Backend {
        Backend {
            connection: Arc::new(Mutex::new(connection)),
            kind,
        }
    }

    /// Runs `f` against the signed-in user's repository for `E`, inside one
    /// transaction. An error from `f` rolls back everything it wrote.
    pub fn with_repository<E, T>(
        &self,
        user: &UserID,
        f: impl FnOnce(&dyn Repository<E>) -> InternalResult<T>,
    ) -> InternalResult<T>
    where
        E: TableRow,
    {
        let connection = self.connection.lock()?;
        let transaction = connection.unchecked_transaction()?;

        let result = match self.kind {
            StoreKind::Table => f(&TableRepository::new(&*transaction, user.as_str()))?,
            StoreKind::Local => f(&LocalRepository::namespaced(&*transaction, user.as_str()))?,
        };

        transaction.commit()?;
        Ok(result)
    }
}

pub fn list_records<E: TableRow>(backend: &Backend, user: &UserID) -> InternalResult<Vec<E>> {
    backend.with_repository(user, |repository: &dyn Repository<E>| repository.list())
}

pub fn get_record<E: TableRow>(
    backend: &Backend,
    user: &UserID,
    id: EntityID,
) -> InternalResult<Json<E>> {
    backend
        .with_repository(user, |repository: &dyn Repository<E>| repository.get(id))?
        .map(Json)
        .ok_or(InternalError::NotFound(E::NAME))
}

pub fn create_record<E>(
    backend: &Backend,
    user: &UserID,
    draft: E::Draft,
) -> InternalResult<Created<Json<E>>>
where
    E: TableRow,
    E::Draft: Validate,
{
    draft.validate()?;

    let record = backend.with_repository(user, |repository: &dyn Repository<E>| {
        repository.create(draft)
    })?;
    info!("Created {} {}", E::NAME, record.id());

    let location = format!("/api/{}/{}", E::COLLECTION, record.id());
    Ok(Created::new(location).body(Json(record)))
}

pub fn update_record<E>(
    backend: &Backend,
    user: &UserID,
    id: EntityID,
    patch: E::Patch,
) -> InternalResult<Json<E>>
where
    E: TableRow,
    E::Patch: Validate,
{
    patch.validate()?;

    backend
        .with_repository(user, |repository: &dyn Repository<E>| {
            repository.update(id, patch)
        })?
        .map(Json)
        .ok_or(InternalError::NotFound(E::NAME))
}

pub fn delete_record<E: TableRow>(
    backend: &Backend,
    user: &UserID,
    id: EntityID,
) -> InternalResult<Json<DeleteResult>> {
    let success = backend.with_repository(user, |repository: &dyn Repository<E>| {
        if repository.get(id)?.is_none() {
            return Err(InternalError::NotFound(E::NAME));
        }
        repository.delete(id)
    })?;
    info!("Deleted {} {}", E::NAME, id);

    Ok(Json(DeleteResult { success }))
}

#[catch(default)]
pub fn json_catcher(status: Status, _request: &Request) -> (Status, Json<ErrorBody>) {
    let message = status.reason().unwrap_or("Unknown error");
    (status, Json(ErrorBody::new(message)))
}
