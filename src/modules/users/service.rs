use bastion_core::{AppError, RawError};
use tracing::instrument;
use uuid::Uuid;

use super::model::User;
use super::store::UserStore;

pub struct UserService;

impl UserService {
    /// Looks up a user by the raw path segment.
    ///
    /// A segment that is not a UUID is an invalid identifier, not a miss.
    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn UserStore, id: &str) -> Result<User, RawError> {
        let user_id = Uuid::parse_str(id).map_err(|_| RawError::invalid_id("_id", id))?;

        store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No user found with that ID!").into())
    }
}
