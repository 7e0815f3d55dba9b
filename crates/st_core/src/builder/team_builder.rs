use super::error::{BuildRejection, BuilderError, FinalizeError};
use crate::catalog::UnitLookup;
use crate::config::RuleConfig;
use crate::error::Result;
use crate::models::{Role, Roster, RosterSlot, TeamId, TeamMetadata, ROSTER_SIZE, SQUAD_SIZE};
use crate::repository::TeamRepository;
use crate::validation::{CompositionValidator, ViolationList};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where an editing session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuilderState {
    Empty,
    /// 1 to 5 slots filled
    Filling,
    /// All six slots filled, not finalized since the last edit
    Complete,
    Valid,
    /// Last finalize failed; editing continues from here
    Invalid,
}

/// Incremental strike-team editor (3 + 3 slots).
///
/// Picks fill squad 1 first, then squad 2. Each squad takes one unit per role
/// in any order. The builder only rejects picks that could never be legal
/// (repeats, taken roles, a full roster); everything else is reported by
/// [`TeamBuilder::current_violations`] and enforced by [`TeamBuilder::finalize`].
#[derive(Debug, Clone, Default)]
pub struct TeamBuilder {
    roster: Roster,
    validator: CompositionValidator,
    /// Result of the last finalize; cleared by every edit
    outcome: Option<bool>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleConfig) -> Self {
        Self { validator: CompositionValidator::new(rules), ..Self::default() }
    }

    /// Resume editing a saved roster.
    pub fn from_roster(roster: Roster) -> Self {
        Self { roster, ..Self::default() }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn slots(&self) -> &[RosterSlot] {
        self.roster.slots()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Squad the next pick lands in; `None` once the roster is full.
    pub fn current_squad(&self) -> Option<usize> {
        (!self.roster.is_full()).then(|| self.roster.len() / SQUAD_SIZE)
    }

    /// Roles still free in the squad being filled.
    pub fn open_roles(&self) -> Vec<Role> {
        let Some(squad) = self.current_squad() else {
            return Vec::new();
        };
        let taken: Vec<Role> = self.roster.squad(squad).iter().map(|s| s.assigned_role).collect();
        Role::ALL.into_iter().filter(|role| !taken.contains(role)).collect()
    }

    /// Append a pick at the next free position and return that position.
    pub fn add_unit(
        &mut self,
        unit_id: impl Into<String>,
        role: Role,
    ) -> std::result::Result<usize, BuildRejection> {
        let unit_id = unit_id.into();
        if self.roster.contains_unit(&unit_id) {
            return Err(BuildRejection::AlreadySelected { unit_id });
        }
        let Some(squad) = self.current_squad() else {
            return Err(BuildRejection::RosterFull);
        };
        if !self.open_roles().contains(&role) {
            return Err(BuildRejection::RoleTaken { squad, role });
        }

        let position = self.roster.push(unit_id, role);
        self.outcome = None;
        Ok(position)
    }

    /// Remove the slot at `index`; later slots move up one position.
    pub fn remove_unit(&mut self, index: usize) -> std::result::Result<RosterSlot, BuilderError> {
        let len = self.roster.len();
        let removed = self
            .roster
            .remove(index)
            .ok_or(BuilderError::IndexOutOfRange { index, len })?;
        self.outcome = None;
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.roster.clear();
        self.outcome = None;
    }

    /// Live feedback on the slots picked so far.
    pub fn current_violations<L: UnitLookup + ?Sized>(&self, lookup: &L) -> ViolationList {
        self.validator.validate_partial(&self.roster, lookup)
    }

    /// Gate before persistence: six slots and a clean full validation.
    pub fn finalize<L: UnitLookup + ?Sized>(
        &mut self,
        lookup: &L,
    ) -> std::result::Result<Roster, FinalizeError> {
        if self.roster.len() != ROSTER_SIZE {
            return Err(FinalizeError::Incomplete { filled: self.roster.len() });
        }

        let violations = self.validator.validate(&self.roster, lookup);
        self.outcome = Some(violations.is_empty());
        if !violations.is_empty() {
            debug!("Finalize rejected with {} violation(s)", violations.len());
            return Err(FinalizeError::Invalid(violations));
        }
        Ok(self.roster.clone())
    }

    pub fn state(&self) -> BuilderState {
        match (self.roster.len(), self.outcome) {
            (0, _) => BuilderState::Empty,
            (len, _) if len < ROSTER_SIZE => BuilderState::Filling,
            (_, Some(true)) => BuilderState::Valid,
            (_, Some(false)) => BuilderState::Invalid,
            (_, None) => BuilderState::Complete,
        }
    }

    /// Finalize and store as a new team.
    pub fn save<L, R>(
        &mut self,
        lookup: &L,
        repo: &mut R,
        name: &str,
        metadata: TeamMetadata,
    ) -> Result<TeamId>
    where
        L: UnitLookup + ?Sized,
        R: TeamRepository + ?Sized,
    {
        let roster = self.finalize(lookup)?;
        Ok(repo.create_team(name, roster, metadata)?)
    }

    /// Finalize and overwrite the roster of an existing team.
    pub fn save_over<L, R>(&mut self, lookup: &L, repo: &mut R, id: TeamId) -> Result<()>
    where
        L: UnitLookup + ?Sized,
        R: TeamRepository + ?Sized,
    {
        let roster = self.finalize(lookup)?;
        Ok(repo.update_team(id, roster)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::models::TeamType;
    use crate::repository::InMemoryTeamRepository;
    use crate::test_support::*;
    use crate::validation::{ViolationKind, ViolationListExt};

    fn filled() -> TeamBuilder {
        let mut builder = TeamBuilder::new();
        for (id, role) in valid_picks() {
            builder.add_unit(id, role).unwrap();
        }
        builder
    }

    #[test]
    fn test_add_fills_squads_in_order() {
        let mut builder = TeamBuilder::new();
        assert_eq!(builder.state(), BuilderState::Empty);
        assert_eq!(builder.current_squad(), Some(0));

        assert_eq!(builder.add_unit("troopers", Role::Support), Ok(0));
        assert_eq!(builder.add_unit("rex", Role::Primary), Ok(1));
        assert_eq!(builder.open_roles(), vec![Role::Secondary]);
        assert_eq!(builder.add_unit("ahsoka", Role::Secondary), Ok(2));

        assert_eq!(builder.current_squad(), Some(1));
        assert_eq!(builder.open_roles(), Role::ALL.to_vec());
        assert_eq!(builder.state(), BuilderState::Filling);
    }

    #[test]
    fn test_rejections_leave_roster_untouched() {
        let mut builder = TeamBuilder::new();
        builder.add_unit("rex", Role::Primary).unwrap();
        let before = builder.roster().clone();

        assert_eq!(
            builder.add_unit("rex", Role::Primary),
            Err(BuildRejection::AlreadySelected { unit_id: "rex".to_string() })
        );
        assert_eq!(
            builder.add_unit("obiwan", Role::Primary),
            Err(BuildRejection::RoleTaken { squad: 0, role: Role::Primary })
        );
        assert_eq!(builder.roster(), &before);

        let mut full = filled();
        assert_eq!(full.add_unit("wookiees", Role::Support), Err(BuildRejection::RosterFull));
        assert_eq!(full.current_squad(), None);
        assert!(full.open_roles().is_empty());
    }

    #[test]
    fn test_role_taken_message_is_one_based() {
        let err = BuildRejection::RoleTaken { squad: 1, role: Role::Support };
        assert_eq!(err.to_string(), "Squad 2 already has a Support character");
    }

    #[test]
    fn test_remove_shifts_later_slots() {
        let mut builder = filled();
        let removed = builder.remove_unit(2).unwrap();
        assert_eq!(removed.unit_id, "troopers");

        let moved = &builder.slots()[2];
        assert_eq!(moved.unit_id, "obiwan");
        assert_eq!((moved.squad_index, moved.slot_index), (0, 2));
        assert_eq!(builder.state(), BuilderState::Filling);

        assert_eq!(
            builder.remove_unit(9),
            Err(BuilderError::IndexOutOfRange { index: 9, len: 5 })
        );
    }

    #[test]
    fn test_state_machine_through_finalize() {
        let catalog = catalog();
        let mut builder = filled();
        assert_eq!(builder.state(), BuilderState::Complete);

        let roster = builder.finalize(&catalog).unwrap();
        assert_eq!(roster, valid_roster());
        assert_eq!(builder.state(), BuilderState::Valid);

        // swap a support for an over-budget one
        builder.remove_unit(2).unwrap();
        assert_eq!(builder.state(), BuilderState::Filling);
        builder.clear();
        for (id, role) in valid_picks() {
            let id = if id == "troopers" { "wookiees" } else { id };
            builder.add_unit(id, role).unwrap();
        }
        let err = builder.finalize(&catalog).unwrap_err();
        assert!(err.violations().has_kind(ViolationKind::BudgetExceeded));
        assert_eq!(builder.state(), BuilderState::Invalid);

        // invalid is not terminal
        builder.remove_unit(5).unwrap();
        assert_eq!(builder.state(), BuilderState::Filling);
    }

    #[test]
    fn test_finalize_requires_six_slots() {
        let mut builder = TeamBuilder::new();
        builder.add_unit("rex", Role::Primary).unwrap();
        assert_eq!(
            builder.finalize(&catalog()),
            Err(FinalizeError::Incomplete { filled: 1 })
        );
        assert_eq!(builder.state(), BuilderState::Filling);
    }

    #[test]
    fn test_current_violations_are_partial() {
        let catalog = catalog();
        let mut builder = TeamBuilder::new();
        builder.add_unit("rex", Role::Primary).unwrap();
        builder.add_unit("rebels", Role::Support).unwrap();

        let violations = builder.current_violations(&catalog);
        assert!(!violations.has_kind(ViolationKind::WrongSize));
        assert!(violations.has_kind(ViolationKind::EraIncompatibleSquad));
    }

    #[test]
    fn test_save_goes_through_repository() {
        let mut repo = InMemoryTeamRepository::new(catalog());
        let metadata = TeamMetadata::new("user-1", TeamType::MyTeams);

        let mut builder = filled();
        let lookup = catalog();
        let id = builder.save(&lookup, &mut repo, "Clone Force", metadata.clone()).unwrap();
        assert_eq!(repo.get_team(id).unwrap().roster, valid_roster());

        let mut partial = TeamBuilder::new();
        partial.add_unit("rex", Role::Primary).unwrap();
        let err = partial.save(&lookup, &mut repo, "Too small", metadata).unwrap_err();
        assert!(matches!(err, CoreError::Finalize(FinalizeError::Incomplete { filled: 1 })));
    }
}
