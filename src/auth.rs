use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use crate::internal_error::InternalError;

/// Header set by the identity provider in front of the service.
pub const USER_HEADER: &str = "X-User-Id";

/// The signed-in user every request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserID(String);

impl UserID {
    pub fn new(user_id: &str) -> UserID {
        UserID(user_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserID {
    type Error = InternalError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one(USER_HEADER).map(str::trim) {
            Some(user_id) if !user_id.is_empty() => Outcome::Success(UserID::new(user_id)),
            _ => Outcome::Error((Status::Unauthorized, InternalError::Unauthorized)),
        }
    }
}
