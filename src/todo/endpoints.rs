use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};

use crate::auth::UserID;
use crate::backend::*;
use crate::data::DeleteResult;
use crate::internal_error::InternalResult;

use super::data::*;
use super::util::*;

#[get("/todos?<query..>")]
pub fn get_todos(
    query: TodoQuery,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Vec<Todo>>> {
    let filter = query.filter()?;
    let order = query.order()?;

    let mut todos = filter_todos(list_records(backend, &user)?, &filter);
    if let Some(order) = order {
        sort_todos(&mut todos, order);
    }

    Ok(Json(todos))
}

#[get("/todos/<id>")]
pub fn get_todo(id: TodoID, user: UserID, backend: &State<Backend>) -> InternalResult<Json<Todo>> {
    get_record(backend, &user, id)
}

#[post("/todos", format = "json", data = "<todo>")]
pub fn create_todo(
    todo: Json<NewTodo>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Created<Json<Todo>>> {
    create_record(backend, &user, todo.into_inner())
}

#[patch("/todos/<id>", format = "json", data = "<patch>")]
pub fn update_todo(
    id: TodoID,
    patch: Json<TodoPatch>,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<Todo>> {
    update_record(backend, &user, id, patch.into_inner())
}

#[delete("/todos/<id>")]
pub fn delete_todo(
    id: TodoID,
    user: UserID,
    backend: &State<Backend>,
) -> InternalResult<Json<DeleteResult>> {
    delete_record::<Todo>(backend, &user, id)
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;
    use serde_json::json;

    use crate::config::StoreKind;
    use crate::test_support::{as_user, test_client};

    use super::*;

    fn add_todo(client: &Client, body: serde_json::Value) -> Todo {
        let response = client
            .post("/api/todos")
            .header(as_user("alice"))
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Created);
        response.into_json().unwrap()
    }

    fn fetch_titles(client: &Client, uri: &str) -> Vec<String> {
        let todos: Vec<Todo> = client
            .get(uri.to_string())
            .header(as_user("alice"))
            .dispatch()
            .into_json()
            .unwrap();
        todos.into_iter().map(|todo| todo.title).collect()
    }

    #[test]
    fn script_title_is_stripped() {
        let client = test_client(StoreKind::Table);

        let todo = add_todo(
            &client,
            json!({ "title": "<script>alert(1)</script>Buy milk", "priority": "high" }),
        );

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(fetch_titles(&client, "/api/todos"), vec!["Buy milk"]);
    }

    #[test]
    fn entity_encoded_script_title_is_stripped() {
        for store in [StoreKind::Table, StoreKind::Local] {
            let client = test_client(store);

            let todo = add_todo(
                &client,
                json!({ "title": "&lt;script&gt;alert(1)&lt;/script&gt;Buy milk" }),
            );

            assert_eq!(todo.title, "Buy milk");
            for title in fetch_titles(&client, "/api/todos") {
                assert!(!title.contains("<script>"), "read back {:?}", title);
            }
        }
    }

    #[test]
    fn null_due_date_clears_it() {
        let client = test_client(StoreKind::Table);
        let todo = add_todo(&client, json!({ "title": "Taxes", "dueDate": "2024-09-01" }));

        let patch = |body: serde_json::Value| -> Todo {
            client
                .patch(format!("/api/todos/{}", todo.id))
                .header(as_user("alice"))
                .header(ContentType::JSON)
                .body(body.to_string())
                .dispatch()
                .into_json()
                .unwrap()
        };

        let untouched = patch(json!({ "completed": true }));
        assert_eq!(untouched.due_date, todo.due_date);

        let cleared = patch(json!({ "dueDate": null }));
        assert_eq!(cleared.due_date, None);
        assert!(cleared.completed);
    }

    #[test]
    fn filters_and_sorts_through_the_query() {
        let client = test_client(StoreKind::Local);

        add_todo(&client, json!({ "title": "Laundry", "priority": "low", "dueDate": "2024-09-10" }));
        add_todo(&client, json!({ "title": "Taxes", "priority": "high", "dueDate": "2024-09-01" }));
        let done = add_todo(&client, json!({ "title": "Dishes", "priority": "medium" }));

        client
            .patch(format!("/api/todos/{}", done.id))
            .header(as_user("alice"))
            .header(ContentType::JSON)
            .body(json!({ "completed": true }).to_string())
            .dispatch();

        assert_eq!(
            fetch_titles(&client, "/api/todos?status=active&sort=due-date"),
            vec!["Taxes", "Laundry"]
        );
        assert_eq!(
            fetch_titles(&client, "/api/todos?sort=priority"),
            vec!["Taxes", "Dishes", "Laundry"]
        );
        assert_eq!(fetch_titles(&client, "/api/todos?search=TAX"), vec!["Taxes"]);
        assert_eq!(fetch_titles(&client, "/api/todos?status=completed"), vec!["Dishes"]);
    }

    #[test]
    fn unknown_sort_is_a_bad_request() {
        let client = test_client(StoreKind::Table);

        let response = client
            .get("/api/todos?sort=alphabetical")
            .header(as_user("alice"))
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
    }
}
