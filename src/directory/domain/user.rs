//! User profiles synchronized from the identity provider.

use super::{DirectoryDomainError, EmailAddress, UserId};
use serde::{Deserialize, Serialize};

/// Profile of a user known to the directory.
///
/// Profiles are owned by the external identity provider; the directory only
/// mirrors them, so the type is a plain record with validated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
    email: EmailAddress,
    image_url: Option<String>,
}

impl UserProfile {
    /// Creates a profile from provider data.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyUserName`] when the display name
    /// is empty after trimming.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: EmailAddress,
    ) -> Result<Self, DirectoryDomainError> {
        let raw_name = name.into();
        let normalized = raw_name.trim();
        if normalized.is_empty() {
            return Err(DirectoryDomainError::EmptyUserName);
        }
        Ok(Self {
            id,
            name: normalized.to_owned(),
            email,
            image_url: None,
        })
    }

    /// Sets the avatar image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Creates a provisional profile for a user whose provider record has
    /// not arrived yet.
    ///
    /// Workspace-creation events can reference a creator the directory has
    /// never seen; the provisional profile keeps the membership graph
    /// consistent until the user's own sync event replaces it.
    #[must_use]
    pub fn provisional(id: UserId) -> Self {
        let email = EmailAddress::provisional_for(&id);
        Self {
            id,
            name: "Pending User".to_owned(),
            email,
            image_url: None,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the avatar image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
