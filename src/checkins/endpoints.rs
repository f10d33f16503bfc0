use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};

use crate::auth::UserID;
use crate::backend::*;
use crate::data::DeleteResult;
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/checkins?<date>")]
pub fn get_check_ins(
    date: Option<&str>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Vec<CheckIn>>> {
    let date = date_filter(date)?;
    let check_ins: Vec<CheckIn> = list_records(backend, &user)?;

    Ok(Json(match date {
        Some(date) => check_ins.into_iter().filter(|c| c.date == date).collect(),
        None => check_ins,
    }))
}

#[get("/checkins/<id>")]
pub fn get_check_in(
    id: CheckInID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<CheckIn>> {
    get_record(backend, &user, id)
}

#[post("/checkins", format = "json", data = "<check_in>")]
pub fn create_check_in(
    check_in: Json<NewCheckIn>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Created<Json<CheckIn>>> {
    create_record(backend, &user, check_in.into_inner())
}

#[patch("/checkins/<id>", format = "json", data = "<patch>")]
pub fn update_check_in(
    id: CheckInID,
    patch: Json<CheckInPatch>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<CheckIn>> {
    update_record(backend, &user, id, patch.into_inner())
}

#[delete("/checkins/<id>")]
pub fn delete_check_in(
    id: CheckInID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<DeleteResult>> {
    delete_record::<CheckIn>(backend, &user, id)
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};
    use serde_json::{json, Value};

    use crate::config::StoreKind;
    use crate::test_support::{as_user, test_client};

    use super::*;

    #[test]
    fn filters_check_ins_by_date() {
        let client = test_client(StoreKind::Table);

        for date in ["2024-03-14", "2024-03-15"] {
            let response = client
                .post("/api/checkins")
                .header(as_user("alice"))
                .header(ContentType::JSON)
                .body(
                    json!({
                        "date": date,
                        "mood": "okay",
                        "energy": "low",
                        "accomplishments": ["Shipped it"],
                    })
                    .to_string(),
                )
                .dispatch();
            assert_eq!(response.status(), Status::Created);
        }

        let check_ins: Vec<CheckIn> = client
            .get("/api/checkins?date=2024-03-15")
            .header(as_user("alice"))
            .dispatch()
            .into_json()
            .unwrap();

        assert_eq!(check_ins.len(), 1);
        assert_eq!(check_ins[0].date.to_string(), "2024-03-15");
        assert_eq!(check_ins[0].accomplishments, vec!["Shipped it"]);
    }

    #[test]
    fn invalid_date_filter_is_a_bad_request() {
        let client = test_client(StoreKind::Local);

        let response = client
            .get("/api/checkins?date=2024-13-40")
            .header(as_user("alice"))
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.into_json::<Value>().unwrap(),
            json!({ "error": "Invalid input: date: Invalid date format" })
        );
    }

    #[test]
    fn rejects_unknown_moods() {
        let client = test_client(StoreKind::Local);

        let response = client
            .post("/api/checkins")
            .header(as_user("alice"))
            .header(ContentType::JSON)
            .body(json!({ "date": "2024-03-14", "mood": "ecstatic", "energy": "low" }).to_string())
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
    }
}
