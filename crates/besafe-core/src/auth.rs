use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_LOGIN: &str = "example@email.com";
pub const DEFAULT_PASSWORD: &str = "****";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("wrong login or password")]
    InvalidCredentials,
}

/// The single login/password pair the gallery accepts.
#[derive(Clone, Debug)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN, DEFAULT_PASSWORD)
    }
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Both fields must match after case folding.
    pub fn verify(&self, login: &str, password: &str) -> Result<(), AuthError> {
        if fold(&self.login) == fold(login) && fold(&self.password) == fold(password) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Input fields of the sign-in screen.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

impl LoginForm {
    /// Check the typed pair. On failure both fields are cleared so the user
    /// starts over.
    pub fn submit(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        match credentials.verify(&self.login, &self.password) {
            Ok(()) => {
                info!("sign-in accepted");
                Ok(())
            }
            Err(err) => {
                warn!("sign-in rejected");
                self.login.clear();
                self.password.clear();
                Err(err)
            }
        }
    }
}
