//! Shared fixtures for unit tests.

use crate::catalog::UnitCatalog;
use crate::models::{Role, Roster, Unit};

pub const CLONE_WARS: &str = "Clone Wars";
pub const GALACTIC_CIVIL_WAR: &str = "Galactic Civil War";
pub const REBELLION: &str = "Rebellion";

/// Squad 0 spends 5+4 of 10 points, squad 1 spends 4+5 of 9 (a tie).
pub fn catalog() -> UnitCatalog {
    UnitCatalog::from_units([
        Unit::new("rex", "Captain Rex", Role::Primary, 10, 3, [CLONE_WARS]),
        Unit::new("ahsoka", "Ahsoka Tano", Role::Secondary, 0, 5, [CLONE_WARS, REBELLION]),
        Unit::new("troopers", "Clone Troopers", Role::Support, 0, 4, [CLONE_WARS]),
        Unit::new("obiwan", "Obi-Wan Kenobi", Role::Primary, 9, 4, [CLONE_WARS, GALACTIC_CIVIL_WAR]),
        Unit::new("cody", "Commander Cody", Role::Secondary, 0, 4, [CLONE_WARS]),
        Unit::new("barriss", "Barriss Offee", Role::Secondary, 0, 3, [CLONE_WARS]),
        Unit::new("arc", "ARC Troopers", Role::Support, 0, 5, [CLONE_WARS]),
        Unit::new("wookiees", "Wookiee Warriors", Role::Support, 0, 6, [CLONE_WARS]),
        Unit::new("rebels", "Rebel Commandos", Role::Support, 0, 2, [GALACTIC_CIVIL_WAR]),
        Unit::new("partisans", "Partisans", Role::Support, 0, 3, [REBELLION]),
    ])
}

pub fn valid_picks() -> Vec<(&'static str, Role)> {
    vec![
        ("rex", Role::Primary),
        ("ahsoka", Role::Secondary),
        ("troopers", Role::Support),
        ("obiwan", Role::Primary),
        ("cody", Role::Secondary),
        ("arc", Role::Support),
    ]
}

pub fn valid_roster() -> Roster {
    Roster::from_picks(valid_picks())
}

/// The valid roster with the pick at `position` replaced.
pub fn roster_with(position: usize, unit_id: &'static str, role: Role) -> Roster {
    let mut picks = valid_picks();
    picks[position] = (unit_id, role);
    Roster::from_picks(picks)
}
