use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PersonNameError;
use crate::domain::account::errors::PhoneError;
use crate::domain::account::errors::RoleError;
use crate::domain::account::errors::SecretError;

/// Account aggregate entity.
///
/// Represents a registered principal. The email is the unique login key;
/// the identifier is generated at creation and never reused. The secret
/// hash is never empty once the account exists, and the plaintext secret
/// is never stored.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: Phone,
    pub role: Role,
    pub secret_hash: String,
    /// Best-effort copy of the last issued access token, if any.
    pub access_token: Option<String>,
    /// Best-effort copy of the last issued refresh token, if any.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Person name value type (first or last name).
///
/// Ensures the name is 2-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 100;

    /// Create a new valid person name.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 2 characters
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PersonNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type.
///
/// Presence is required; no format validation beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    /// Create a new phone number.
    ///
    /// # Errors
    /// * `Empty` - Phone number is empty or whitespace
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        if phone.trim().is_empty() {
            Err(PhoneError::Empty)
        } else {
            Ok(Self(phone))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account role, a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plaintext secret accepted at signup, validated for minimum length.
///
/// Exists only in flight; the domain stores the hash.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    const MIN_LENGTH: usize = 8;

    /// Create a new secret.
    ///
    /// # Errors
    /// * `TooShort` - Secret shorter than 8 characters
    pub fn new(secret: String) -> Result<Self, SecretError> {
        let length = secret.chars().count();
        if length < Self::MIN_LENGTH {
            Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(secret))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the plaintext out of debug output.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Command to register a new account with validated fields.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: Phone,
    pub role: Role,
    pub secret: Secret,
}

impl SignupCommand {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        phone: Phone,
        role: Role,
        secret: Secret,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone,
            role,
            secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_length_bounds() {
        assert!(PersonName::new("Ann".to_string()).is_ok());
        assert!(matches!(
            PersonName::new("A".to_string()),
            Err(PersonNameError::TooShort { .. })
        ));
        assert!(matches!(
            PersonName::new("x".repeat(101)),
            Err(PersonNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_email_address_format() {
        assert!(EmailAddress::new("ann@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_phone_presence() {
        assert!(Phone::new("555-0100".to_string()).is_ok());
        assert_eq!(Phone::new("   ".to_string()), Err(PhoneError::Empty));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!(matches!(
            "superuser".parse::<Role>(),
            Err(RoleError::Unknown(_))
        ));
    }

    #[test]
    fn test_secret_minimum_length() {
        assert!(Secret::new("longenough1".to_string()).is_ok());
        assert!(matches!(
            Secret::new("short".to_string()),
            Err(SecretError::TooShort { min: 8, actual: 5 })
        ));
    }

    #[test]
    fn test_secret_debug_does_not_leak() {
        let secret = Secret::new("longenough1".to_string()).unwrap();
        assert_eq!(format!("{:?}", secret), "Secret(***)");
    }

    #[test]
    fn test_account_id_parse_round_trip() {
        let id = AccountId::new();
        let parsed = AccountId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(AccountId::from_string("not-a-uuid").is_err());
    }
}
