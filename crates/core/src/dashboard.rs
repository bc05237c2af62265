//! Role-to-dashboard routing.
//!
//! Every user lands on one of five dashboards. Several roles share a
//! dashboard but keep their own title. Input outside the role catalogue falls
//! back to the employee dashboard with a generic title rather than failing.

use serde::Serialize;

use crate::roles::Role;

pub const ROUTE_SUPER_ADMIN: &str = "/dashboards/super-admin";
pub const ROUTE_PARTNER_ADMIN: &str = "/dashboards/partner-admin";
pub const ROUTE_CUSTOMER_ADMIN: &str = "/dashboards/customer-admin";
pub const ROUTE_BHV_COORDINATOR: &str = "/dashboards/bhv-coordinator";
pub const ROUTE_EMPLOYEE: &str = "/dashboards/employee";

/// Title shown when the role is not recognised.
pub const GENERIC_TITLE: &str = "Dashboard";

/// Where a user should be sent after login, and what to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardDescriptor {
    pub route: &'static str,
    pub title: &'static str,
}

/// Dashboard route for a role; `None` means unrecognised.
pub fn dashboard_route(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::SuperAdmin) => ROUTE_SUPER_ADMIN,
        Some(Role::PartnerAdmin | Role::PartnerManager) => ROUTE_PARTNER_ADMIN,
        Some(Role::CustomerOwner | Role::CustomerAdmin | Role::CustomerManager) => {
            ROUTE_CUSTOMER_ADMIN
        }
        Some(Role::BhvCoordinator | Role::BhvPloegleider) => ROUTE_BHV_COORDINATOR,
        Some(
            Role::BhvMember | Role::EhboMember | Role::Ontruimer | Role::Employee | Role::Visitor,
        )
        | None => ROUTE_EMPLOYEE,
    }
}

/// Dashboard title for a role; `None` means unrecognised.
pub fn dashboard_title(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::SuperAdmin) => "Super Admin Dashboard",
        Some(Role::PartnerAdmin) => "Partner Admin Dashboard",
        Some(Role::PartnerManager) => "Partner Manager Dashboard",
        Some(Role::CustomerOwner) => "Klant Eigenaar Dashboard",
        Some(Role::CustomerAdmin) => "Klant Admin Dashboard",
        Some(Role::CustomerManager) => "Klant Manager Dashboard",
        Some(Role::BhvCoordinator) => "BHV Coördinator Dashboard",
        Some(Role::BhvPloegleider) => "BHV Ploegleider Dashboard",
        Some(Role::BhvMember) => "BHV Lid Dashboard",
        Some(Role::EhboMember) => "EHBO Lid Dashboard",
        Some(Role::Ontruimer) => "Ontruimer Dashboard",
        Some(Role::Employee) => "Medewerker Dashboard",
        Some(Role::Visitor) => "Bezoeker Dashboard",
        None => GENERIC_TITLE,
    }
}

/// Resolve the dashboard for a (possibly unrecognised) role.
pub fn resolve_dashboard(role: Option<Role>) -> DashboardDescriptor {
    DashboardDescriptor {
        route: dashboard_route(role),
        title: dashboard_title(role),
    }
}

/// Resolve the dashboard for a raw role name as received from the session.
pub fn resolve_dashboard_name(name: &str) -> DashboardDescriptor {
    resolve_dashboard(Role::from_name(name))
}
