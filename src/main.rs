use log::info;
use rocket::{Build, Rocket};
use rusqlite::Connection;

use std::error::Error;

mod auth;
mod backend;
mod checkins;
mod config;
mod data;
mod goals;
mod input;
mod internal_error;
mod milestones;
mod notes;
mod store;
mod suggestions;
mod todo;

use backend::Backend;
use config::{AppConfig, StoreKind};
use internal_error::InternalResult;

#[macro_use]
extern crate rocket;

fn build(
    rocket: Rocket<Build>,
    connection: Connection,
    store_kind: StoreKind,
) -> InternalResult<Rocket<Build>> {
    store::schema::create_tables(&connection)?;

    Ok(rocket
        .manage(Backend::new(connection, store_kind))
        .mount(
            "/api",
            routes![
                goals::endpoints::get_goals,
                goals::endpoints::get_goal,
                goals::endpoints::create_goal,
                goals::endpoints::update_goal,
                goals::endpoints::delete_goal,
                goals::endpoints::import_suggestions,
                goals::endpoints::goal_stats,
                milestones::endpoints::get_milestones,
                milestones::endpoints::get_milestone,
                milestones::endpoints::create_milestone,
                milestones::endpoints::update_milestone,
                milestones::endpoints::delete_milestone,
                todo::endpoints::get_todos,
                todo::endpoints::get_todo,
                todo::endpoints::create_todo,
                todo::endpoints::update_todo,
                todo::endpoints::delete_todo,
                notes::endpoints::get_notes,
                notes::endpoints::get_note,
                notes::endpoints::add_note,
                notes::endpoints::set_note,
                notes::endpoints::delete_note,
                checkins::endpoints::get_check_ins,
                checkins::endpoints::get_check_in,
                checkins::endpoints::create_check_in,
                checkins::endpoints::update_check_in,
                checkins::endpoints::delete_check_in,
            ],
        )
        .register("/", catchers![backend::json_catcher]))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let rocket = rocket::build();
    let config: AppConfig = rocket.figment().extract()?;

    let connection = Connection::open(&config.database)?;
    info!(
        "Using {:?} store in {}",
        config.store,
        config.database.display()
    );

    build(rocket, connection, config.store)?.launch().await?;

    Ok(())
}

#[cfg(test)]
mod test_support {
    use rocket::http::Header;
    use rocket::local::blocking::Client;
    use rusqlite::Connection;

    use crate::auth::USER_HEADER;
    use crate::config::StoreKind;

    pub fn test_client(store_kind: StoreKind) -> Client {
        let connection = Connection::open_in_memory().unwrap();
        let rocket = super::build(rocket::build(), connection, store_kind).unwrap();

        Client::tracked(rocket).unwrap()
    }

    pub fn as_user(user_id: &str) -> Header<'static> {
        Header::new(USER_HEADER, user_id.to_string())
    }
}
