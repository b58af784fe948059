//! Role registry.
//!
//! The set is closed: anything that does not parse into a `Role` carries no
//! permissions at all.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    TravelAdmin,
    TravelTeamMember,
    Manager,
    Requester,
    AccommodationSupplier,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::TravelAdmin,
        Role::TravelTeamMember,
        Role::Manager,
        Role::Requester,
        Role::AccommodationSupplier,
    ];

    /// Role given to every self-registered user.
    pub const DEFAULT: Role = Role::Requester;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::TravelAdmin => "TRAVEL_ADMIN",
            Role::TravelTeamMember => "TRAVEL_TEAM_MEMBER",
            Role::Manager => "MANAGER",
            Role::Requester => "REQUESTER",
            Role::AccommodationSupplier => "ACCOMMODATION_SUPPLIER",
        }
    }

    /// Exact, case-sensitive match against the registry.
    pub fn parse(raw: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_parses_back_from_its_name() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_or_differently_cased_roles_do_not_parse() {
        assert_eq!(Role::parse("ROOT"), None);
        assert_eq!(Role::parse("super_admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serde_uses_registry_names() {
        let json = serde_json::to_string(&Role::AccommodationSupplier).unwrap();
        assert_eq!(json, "\"ACCOMMODATION_SUPPLIER\"");
    }
}
