//! Employee records and roles

use crate::id::EmployeeId;
use serde::{Deserialize, Serialize};

/// Workflow role, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control: approvals, assignments, deletion
    Admin,
    /// Prepares specifications for assigned sub-stages
    Drafter,
    /// Submits paperwork for assigned sub-stages
    Filer,
}

impl Role {
    /// Whether this role carries admin privileges
    #[inline]
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Drafter => "drafter",
            Role::Filer => "filer",
        };
        write!(f, "{s}")
    }
}

/// An employee of the filing organisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier
    pub id: EmployeeId,
    /// Full name; sub-stage assignments reference this
    pub full_name: String,
    /// Workflow role
    pub role: Role,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
}

impl Employee {
    /// Create a new employee record
    #[inline]
    #[must_use]
    pub fn new(full_name: impl Into<String>, role: Role, email: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(),
            full_name: full_name.into(),
            role,
            email: email.into(),
            phone: None,
        }
    }

    /// With a phone number
    #[inline]
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
