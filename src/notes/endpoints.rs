use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};

use crate::auth::UserID;
use crate::backend::*;
use crate::data::DeleteResult;
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/notes")]
pub fn get_notes(user: UserID, backend: &State<Backend>) -> InternalResult<Json<Vec<Note>>> {
    let notes = list_records(backend, &user)?;

    Ok(Json(pinned_first(notes)))
}

#[get("/notes/<id>")]
pub fn get_note(id: NoteID, user: UserID, backend: &State<Backend>) -> InternalResult<Json<Note>> {
    get_record(backend, &user, id)
}

#[post("/notes", format = "json", data = "<note>")]
pub fn add_note(
    note: Json<NewNote>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Created<Json<Note>>> {
    create_record(backend, &user, note.into_inner())
}

#[patch("/notes/<id>", format = "json", data = "<patch>")]
pub fn set_note(
    id: NoteID,
    patch: Json<NotePatch>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Note>> {
    update_record(backend, &user, id, patch.into_inner())
}

#[delete("/notes/<id>")]
pub fn delete_note(
    id: NoteID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<DeleteResult>> {
    delete_record::<Note>(backend, &user, id)
}
