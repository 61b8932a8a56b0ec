use crate::domain::user::Role;
use std::fmt;

/// A set of roles allowed to reach a route.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

const fn bit(role: Role) -> u8 {
    match role {
        Role::Admin => 1,
        Role::Doctor => 1 << 1,
        Role::Nurse => 1 << 2,
        Role::Receptionist => 1 << 3,
    }
}

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= bit(roles[i]);
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & bit(role) != 0
    }

    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | bit(role))
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|role| role.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, RoleSet::with)
    }
}

pub const ADMIN: RoleSet = RoleSet::of(&[Role::Admin]);
pub const CLINICAL: RoleSet = RoleSet::of(&[Role::Admin, Role::Doctor]);
pub const CARE_TEAM: RoleSet = RoleSet::of(&[Role::Admin, Role::Doctor, Role::Nurse]);
pub const FRONT_DESK: RoleSet = RoleSet::of(&[Role::Admin, Role::Receptionist]);
pub const STAFF: RoleSet = RoleSet::of(&Role::ALL);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_sets_contain_exactly_their_roles() {
        assert_eq!(ADMIN.iter().collect::<Vec<_>>(), vec![Role::Admin]);
        assert_eq!(
            CARE_TEAM.iter().collect::<Vec<_>>(),
            vec![Role::Admin, Role::Doctor, Role::Nurse]
        );
        assert!(!FRONT_DESK.contains(Role::Doctor));
        assert!(FRONT_DESK.contains(Role::Receptionist));
        assert!(Role::ALL.iter().all(|role| STAFF.contains(*role)));
    }

    #[test]
    fn collecting_roles_matches_const_construction() {
        let collected: RoleSet = [Role::Doctor, Role::Admin].into_iter().collect();
        assert_eq!(collected, CLINICAL);
        assert!(RoleSet::EMPTY.is_empty());
        assert_eq!(CLINICAL.to_string(), "{admin, doctor}");
    }
}
