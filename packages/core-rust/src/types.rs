use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Numeric primary key of a customer row.
pub type CustomerId = i64;

/// Account status of a customer.
///
/// Persisted as a small integer: `1` is active, `0` is inactive. Any other
/// persisted value is treated as inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i16", into = "i16")]
pub enum CustomerStatus {
    /// The customer may sign in and be resolved as the current principal.
    Active,
    /// The customer is disabled.
    Inactive,
}

impl CustomerStatus {
    /// Persisted integer for [`CustomerStatus::Active`].
    pub const ACTIVE_CODE: i16 = 1;
    /// Persisted integer for [`CustomerStatus::Inactive`].
    pub const INACTIVE_CODE: i16 = 0;

    /// Returns the persisted integer for this status.
    #[must_use]
    pub fn code(self) -> i16 {
        match self {
            Self::Active => Self::ACTIVE_CODE,
            Self::Inactive => Self::INACTIVE_CODE,
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl From<i16> for CustomerStatus {
    fn from(code: i16) -> Self {
        if code == Self::ACTIVE_CODE {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl From<CustomerStatus> for i16 {
    fn from(status: CustomerStatus) -> Self {
        status.code()
    }
}

/// A customer row exactly as loaded from the persistent store.
///
/// Carries the password hash, so it never leaves the store boundary:
/// [`CustomerRecord::into_customer`] is the only way to hand it to request
/// handling, and it drops the credential.
#[derive(Debug)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub uuid: Uuid,
    pub status: CustomerStatus,
    pub group_id: Option<i64>,
    pub email: String,
    pub full_name: Option<String>,
    /// Password hash. `Debug` prints it as redacted.
    pub password: SecretString,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerRecord {
    /// Strips the credential and returns the customer as it may be exposed
    /// to request handlers. Every other field is carried over unchanged.
    #[must_use]
    pub fn into_customer(self) -> Customer {
        let Self {
            customer_id,
            uuid,
            status,
            group_id,
            email,
            full_name,
            password: _,
            created_at,
            updated_at,
        } = self;

        Customer {
            customer_id,
            uuid,
            status,
            group_id,
            email,
            full_name,
            created_at,
            updated_at,
        }
    }
}

impl Clone for CustomerRecord {
    fn clone(&self) -> Self {
        Self {
            customer_id: self.customer_id,
            uuid: self.uuid,
            status: self.status,
            group_id: self.group_id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Sanitized customer attached to a request as the current principal.
///
/// Has no credential field, so serializing it can never leak the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub uuid: Uuid,
    pub status: CustomerStatus,
    pub group_id: Option<i64>,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
