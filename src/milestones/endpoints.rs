use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};

use crate::auth::UserID;
use crate::backend::*;
use crate::data::DeleteResult;
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/milestones?<query..>")]
pub fn get_milestones(
    query: MilestoneQuery,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Vec<Milestone>>> {
    let goal_id = goal_filter(query.goal_id.as_deref())?;
    let milestones = list_records(backend, &user)?;

    Ok(Json(milestones_for_goal(milestones, goal_id)))
}

#[get("/milestones/<id>")]
pub fn get_milestone(
    id: MilestoneID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Milestone>> {
    get_record(backend, &user, id)
}

#[post("/milestones", format = "json", data = "<milestone>")]
pub fn create_milestone(
    milestone: Json<NewMilestone>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Created<Json<Milestone>>> {
    create_record(backend, &user, milestone.into_inner())
}

#[patch("/milestones/<id>", format = "json", data = "<patch>")]
pub fn update_milestone(
    id: MilestoneID,
    patch: Json<MilestonePatch>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Milestone>> {
    update_record(backend, &user, id, patch.into_inner())
}

#[delete("/milestones/<id>")]
pub fn delete_milestone(
    id: MilestoneID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<DeleteResult>> {
    delete_record::<Milestone>(backend, &user, id)
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};
    use serde_json::json;

    use crate::config::StoreKind;
    use crate::data::new_entity_id;
    use crate::test_support::{as_user, test_client};

    use super::*;

    #[test]
    fn lists_milestones_of_one_goal() {
        let client = test_client(StoreKind::Table);
        let goal_id = new_entity_id();

        for (goal, title, date) in [
            (goal_id, "Buy shoes", "2024-03-01"),
            (new_entity_id(), "Unrelated", "2024-01-01"),
            (goal_id, "First 5k", "2024-02-01"),
        ] {
            let response = client
                .post("/api/milestones")
                .header(as_user("alice"))
                .header(ContentType::JSON)
                .body(json!({ "goalId": goal, "title": title, "date": date }).to_string())
                .dispatch();
            assert_eq!(response.status(), Status::Created);
        }

        let milestones: Vec<Milestone> = client
            .get(format!("/api/milestones?goalId={}", goal_id))
            .header(as_user("alice"))
            .dispatch()
            .into_json()
            .unwrap();

        let titles: Vec<&str> = milestones.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["First 5k", "Buy shoes"]);

        let all: Vec<Milestone> = client
            .get("/api/milestones")
            .header(as_user("alice"))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(all.len(), 3);

        let response = client
            .get("/api/milestones?goalId=not-a-goal")
            .header(as_user("alice"))
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[test]
    fn rejects_impossible_dates() {
        let client = test_client(StoreKind::Table);

        let response = client
            .post("/api/milestones")
            .header(as_user("alice"))
            .header(ContentType::JSON)
            .body(
                json!({ "goalId": new_entity_id(), "title": "Oops", "date": "2024-13-40" })
                    .to_string(),
            )
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[test]
    fn completes_a_milestone() {
        let client = test_client(StoreKind::Local);

        let milestone: Milestone = client
            .post("/api/milestones")
            .header(as_user("alice"))
            .header(ContentType::JSON)
            .body(
                json!({ "goalId": new_entity_id(), "title": "Half way", "date": "2024-07-01" })
                    .to_string(),
            )
            .dispatch()
            .into_json()
            .unwrap();
        assert!(!milestone.completed);

        let updated: Milestone = client
            .patch(format!("/api/milestones/{}", milestone.id))
            .header(as_user("alice"))
            .header(ContentType::JSON)
            .body(json!({ "completed": true }).to_string())
            .dispatch()
            .into_json()
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Half way");
    }
}
