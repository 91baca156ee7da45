//! Session Config

use clap::Args;

use crate::session::{Role, SessionContext, UserId};

use super::ConfigError;

/// Signed-in user settings, issued by the authentication service.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// Bearer token for backend requests
    #[arg(long, env = "ENCORE_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Signed-in user id
    #[arg(long, env = "ENCORE_USER_ID", default_value = "anonymous")]
    pub user_id: String,

    /// Signed-in user display name
    #[arg(long, env = "ENCORE_USER_NAME", default_value = "Guest")]
    pub user_name: String,

    /// Signed-in user role
    #[arg(long, env = "ENCORE_ROLE", value_enum, default_value_t = Role::Customer)]
    pub role: Role,
}

impl SessionConfig {
    /// Build the session context.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is blank.
    pub fn into_session(self) -> Result<SessionContext, ConfigError> {
        let token = self.token.trim().to_string();

        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        Ok(SessionContext::new(
            UserId::new(self.user_id),
            self.user_name,
            self.role,
            token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn blank_token_is_rejected() {
        let config = SessionConfig {
            token: "  ".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Linh".to_string(),
            role: Role::Receptionist,
        };

        assert!(matches!(config.into_session(), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn session_carries_user_and_role() -> TestResult {
        let session = SessionConfig {
            token: " abc ".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Linh".to_string(),
            role: Role::Receptionist,
        }
        .into_session()?;

        assert_eq!(session.user().as_str(), "u-1");
        assert_eq!(session.role(), Role::Receptionist);
        assert_eq!(session.token(), "abc");

        Ok(())
    }
}
