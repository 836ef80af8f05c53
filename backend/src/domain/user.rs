//! User data model.
//!
//! Users are kept for forward compatibility with an authenticated area; no
//! HTTP endpoint creates them yet. Clear-text passwords only ever pass through
//! [`NewUser::try_new`] on their way to an Argon2id hash.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash as PhcHash};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;
/// Minimum allowed length for a clear-text password.
pub const PASSWORD_MIN: usize = 6;

/// Validation errors returned when constructing users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    PasswordTooShort { min: usize },
    PasswordHashing,
    InvalidPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordHashing => write!(f, "password could not be hashed"),
            Self::InvalidPasswordHash => write!(f, "password hash is not a valid PHC string"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier assigned elsewhere.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into().trim().to_owned();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Salted Argon2id hash in PHC string format.
///
/// `Debug` never prints the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn hash(password: &str) -> Result<Self, UserValidationError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| UserValidationError::PasswordHashing)?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a stored PHC string after checking that it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, UserValidationError> {
        let phc = phc.into();
        PhcHash::new(&phc).map_err(|_| UserValidationError::InvalidPasswordHash)?;
        Ok(Self(phc))
    }

    /// Check a clear-text candidate against this hash.
    pub fn verify(&self, candidate: &str) -> bool {
        PhcHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated user awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    password_hash: PasswordHash,
}

impl NewUser {
    /// Validate credentials and hash the password.
    ///
    /// # Examples
    /// ```
    /// use bookings::domain::NewUser;
    ///
    /// let user = NewUser::try_new("tutor", "s3cret!").expect("valid user");
    /// assert!(user.password_hash().verify("s3cret!"));
    /// ```
    pub fn try_new(
        username: impl Into<String>,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        let username = Username::new(username)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let password_hash = PasswordHash::hash(password)?;
        Ok(Self {
            username,
            password_hash,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Combine a validated user with storage-assigned metadata.
    pub fn new(id: UserId, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        let NewUser {
            username,
            password_hash,
        } = new_user;
        Self {
            id,
            username,
            password_hash,
            created_at,
        }
    }

    /// Rebuild a stored user from already validated parts.
    pub fn from_parts(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
