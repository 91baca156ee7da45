//! Session context passed explicitly to everything that talks to the backend.

use std::fmt;

use encore::ids::TypedId;
use zeroize::Zeroizing;

/// Signed-in user id
pub type UserId = TypedId<SessionContext>;

/// Dashboard role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Role {
    /// Venue administrator
    Admin,

    /// Back-office accountant
    Accountant,

    /// Front-desk staff booking on behalf of walk-in customers
    Receptionist,

    /// Customer booking for themselves
    Customer,
}

impl Role {
    /// Whether the role may create bookings.
    pub const fn can_create_bookings(self) -> bool {
        !matches!(self, Self::Accountant)
    }

    /// Lowercase role name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::Receptionist => "receptionist",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is signed in and the bearer token their requests carry.
#[derive(Clone)]
pub struct SessionContext {
    user: UserId,
    display_name: String,
    role: Role,
    token: Zeroizing<String>,
}

impl SessionContext {
    /// Create a session for a signed-in user.
    #[must_use]
    pub fn new(user: UserId, display_name: impl Into<String>, role: Role, token: String) -> Self {
        Self {
            user,
            display_name: display_name.into(),
            role,
            token: Zeroizing::new(token),
        }
    }

    /// Signed-in user id
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Name shown to staff
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Dashboard role
    pub fn role(&self) -> Role {
        self.role
    }

    /// Bearer token for backend requests
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("user", &self.user)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("token", &"**redacted**")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let session = SessionContext::new(
            UserId::new("u-1"),
            "Linh",
            Role::Receptionist,
            "secret-token".to_string(),
        );

        let debug = format!("{session:?}");

        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("**redacted**"));
        assert_eq!(session.token(), "secret-token");
    }

    #[test]
    fn accountants_cannot_book() {
        assert!(!Role::Accountant.can_create_bookings());
        assert!(Role::Receptionist.can_create_bookings());
        assert!(Role::Customer.can_create_bookings());
        assert!(Role::Admin.can_create_bookings());
    }
}
