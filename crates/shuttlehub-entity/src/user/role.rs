//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on the campus transport platform.
///
/// Every stored user carries exactly one role; components dispatch on it
/// explicitly rather than relying on schema inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A student who books shuttle seats.
    Student,
    /// A driver assigned to a shuttle.
    Driver,
    /// A transport office administrator.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a driver.
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver)
    }

    /// Check if this role is a student.
    pub fn is_student(&self) -> bool {
        matches!(self, Self::Student)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Driver => "driver",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = shuttlehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "driver" => Ok(Self::Driver),
            "admin" => Ok(Self::Admin),
            _ => Err(shuttlehub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: student, driver, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_predicates() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Driver.is_admin());
        assert!(UserRole::Driver.is_driver());
        assert!(UserRole::Student.is_student());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("student".parse::<UserRole>().unwrap(), UserRole::Student);
        assert_eq!("DRIVER".parse::<UserRole>().unwrap(), UserRole::Driver);
        assert!("conductor".parse::<UserRole>().is_err());
    }
}
