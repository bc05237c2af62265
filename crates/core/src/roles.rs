//! Well-known user roles.
//!
//! Roles are assigned by the authentication layer; this crate only interprets
//! them. The wire form is the upper-snake name (e.g. `BHV_COORDINATOR`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    PartnerAdmin,
    PartnerManager,
    CustomerOwner,
    CustomerAdmin,
    CustomerManager,
    BhvCoordinator,
    BhvPloegleider,
    BhvMember,
    EhboMember,
    Ontruimer,
    Employee,
    Visitor,
}

impl Role {
    /// Every role in the closed set, in privilege order.
    pub const ALL: [Role; 13] = [
        Role::SuperAdmin,
        Role::PartnerAdmin,
        Role::PartnerManager,
        Role::CustomerOwner,
        Role::CustomerAdmin,
        Role::CustomerManager,
        Role::BhvCoordinator,
        Role::BhvPloegleider,
        Role::BhvMember,
        Role::EhboMember,
        Role::Ontruimer,
        Role::Employee,
        Role::Visitor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::PartnerAdmin => "PARTNER_ADMIN",
            Role::PartnerManager => "PARTNER_MANAGER",
            Role::CustomerOwner => "CUSTOMER_OWNER",
            Role::CustomerAdmin => "CUSTOMER_ADMIN",
            Role::CustomerManager => "CUSTOMER_MANAGER",
            Role::BhvCoordinator => "BHV_COORDINATOR",
            Role::BhvPloegleider => "BHV_PLOEGLEIDER",
            Role::BhvMember => "BHV_MEMBER",
            Role::EhboMember => "EHBO_MEMBER",
            Role::Ontruimer => "ONTRUIMER",
            Role::Employee => "EMPLOYEE",
            Role::Visitor => "VISITOR",
        }
    }

    /// Parse the wire name of a role.
    ///
    /// Returns `None` for anything outside the closed set. Matching is exact;
    /// the session layer always emits upper-snake names.
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
