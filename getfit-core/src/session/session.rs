use log::info;

use crate::db::Store;
use crate::errors::{Field, SessionError};
use crate::validation::validate_non_empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The name was already registered.
    Returning,
    /// The name was new and a user was created for it.
    Registered,
}

/// A logged-in user together with the store their data lives in.
#[derive(Clone)]
pub struct Session {
    pub(crate) store: Store,
    user_id: i32,
    name: String,
}

impl Session {
    /// Logs in by name, registering the name first if nobody has it yet.
    pub fn login(store: Store, raw_name: &str) -> Result<(Self, LoginOutcome), SessionError> {
        let name = validate_non_empty(raw_name).map_err(SessionError::invalid(Field::Name))?;

        let (user_id, outcome) = match store.find_user_by_name(name)? {
            Some(user_id) => (user_id, LoginOutcome::Returning),
            None => {
                let user_id = store.register_user(name)?;
                info!("Registered user {:?} with id {}", name, user_id);
                (user_id, LoginOutcome::Registered)
            }
        };

        Ok((
            Self {
                store,
                user_id,
                name: name.to_string(),
            },
            outcome,
        ))
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ends the session and hands the store back.
    pub fn logout(self) -> Store {
        info!("User {:?} logged out", self.name);
        self.store
    }
}
