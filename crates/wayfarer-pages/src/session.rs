//! The identity seam consumed by the authorization gate.
//!
//! The navigation pipeline only consumes a boolean "is there a valid
//! authenticated identity" fact; authentication itself (tokens, cookies,
//! account lookup) lives outside the engine. [`Session`] is the built-in
//! implementation a host can flip on sign-in and sign-out without
//! rebuilding the navigator.

use std::sync::RwLock;

/// A source of the authenticated-identity fact.
pub trait Identity: Send + Sync {
    /// Returns `true` if a valid authenticated identity is present.
    fn is_authenticated(&self) -> bool;

    /// Returns the identity's user id, if one is known.
    fn user_id(&self) -> Option<String> {
        None
    }
}

/// The built-in identity holder.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<String>>,
}

impl Session {
    /// Creates a session with no identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as the given user.
    pub fn with_user(user_id: impl Into<String>) -> Self {
        Self {
            user: RwLock::new(Some(user_id.into())),
        }
    }

    /// Signs the given user in.
    pub fn login(&self, user_id: impl Into<String>) {
        let mut user = self.user.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *user = Some(user_id.into());
    }

    /// Signs the current user out.
    pub fn logout(&self) {
        let mut user = self.user.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *user = None;
    }
}

impl Identity for Session {
    fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }

    fn user_id(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_with_user() {
        let session = Session::with_user("alice");
        assert!(session.is_authenticated());
        assert_eq!(session.user_id().unwrap(), "alice");
    }

    #[test]
    fn test_login_logout() {
        let session = Session::anonymous();
        session.login("bob");
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
    }
}
