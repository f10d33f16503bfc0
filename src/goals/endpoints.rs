use log::info;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};

use crate::auth::UserID;
use crate::backend::*;
use crate::data::DeleteResult;
use crate::internal_error::InternalResult;
use crate::store::Repository;
use crate::suggestions::parse_suggestions;

use super::data::*;
use super::helpers::*;

#[get("/goals")]
pub fn get_goals(user: UserID, backend: &State<Backend>) -> InternalResult<Json<Vec<Goal>>> {
    list_records(backend, &user).map(Json)
}

#[get("/goals/<id>")]
pub fn get_goal(id: GoalID, user: UserID, backend: &State<Backend>) -> InternalResult<Json<Goal>> {
    get_record(backend, &user, id)
}

#[post("/goals", format = "json", data = "<goal>")]
pub fn create_goal(
    goal: Json<NewGoal>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Created<Json<Goal>>> {
    create_record(backend, &user, goal.into_inner())
}

#[patch("/goals/<id>", format = "json", data = "<patch>")]
pub fn update_goal(
    id: GoalID,
    patch: Json<GoalPatch>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Goal>> {
    update_record(backend, &user, id, patch.into_inner())
}

#[delete("/goals/<id>")]
pub fn delete_goal(
    id: GoalID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<DeleteResult>> {
    delete_record::<Goal>(backend, &user, id)
}

/// Creates one goal per suggestion; a completion failing validation creates none.
#[post("/goals/suggestions", format = "json", data = "<import>")]
pub fn import_suggestions(
    import: Json<SuggestionImport>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Created<Json<Vec<Goal>>>> {
    let suggestions = parse_suggestions(&import.completion)?;

    let goals = backend.with_repository(&user, |repository: &dyn Repository<Goal>| {
        suggestions
            .into_iter()
            .map(|suggestion| repository.create(NewGoal::from(suggestion)))
            .collect::<InternalResult<Vec<Goal>>>()
    })?;
    info!("Imported {} suggested goals", goals.len());

    Ok(Created::new("/api/goals").body(Json(goals)))
}

#[get("/stats/goals")]
pub fn goal_stats(user: UserID, backend: &State<Backend>) -> InternalResult<Json<GoalStats>> {
    let goals: Vec<Goal> = list_records(backend, &user)?;

    Ok(Json(GoalStats {
        summary: goal_summary(&goals),
        by_category: progress_by_category(&goals),
    }))
}
