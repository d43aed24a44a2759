use crate::admin::security::{Actor, PrivilegeCheck};
use crate::entities::player::{PlayerId, PlayerState};
use crate::telemetry::logging;
use crate::world::titles::{TitleDefinition, TitleRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCommandError {
    NoTargetSelected,
    InsufficientPrivilege,
    InvalidTitleId(i64),
}

impl std::fmt::Display for TitleCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleCommandError::NoTargetSelected => write!(f, "no target selected"),
            TitleCommandError::InsufficientPrivilege => write!(f, "insufficient privilege"),
            TitleCommandError::InvalidTitleId(id) => write!(f, "invalid title id {}", id),
        }
    }
}

impl std::error::Error for TitleCommandError {}

/// Who a title command landed on, as the reporting layer shows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleNotice {
    pub id: u32,
    pub bit_index: u8,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleReport {
    Added {
        target: TargetRef,
        title: TitleNotice,
        newly_granted: bool,
    },
    Removed {
        target: TargetRef,
        title: TitleNotice,
        was_known: bool,
        selection_cleared: bool,
    },
    Current {
        target: TargetRef,
        title: TitleNotice,
        newly_granted: bool,
    },
    MaskSet {
        target: TargetRef,
        known_mask: u64,
        dropped: u64,
        selection_cleared: bool,
    },
}

impl TitleReport {
    pub fn target(&self) -> &TargetRef {
        match self {
            TitleReport::Added { target, .. }
            | TitleReport::Removed { target, .. }
            | TitleReport::Current { target, .. }
            | TitleReport::MaskSet { target, .. } => target,
        }
    }

    pub fn selection_cleared(&self) -> bool {
        match self {
            TitleReport::Removed {
                selection_cleared, ..
            }
            | TitleReport::MaskSet {
                selection_cleared, ..
            } => *selection_cleared,
            TitleReport::Added { .. } | TitleReport::Current { .. } => false,
        }
    }
}

pub type TitleResult = Result<TitleReport, TitleCommandError>;

/// Runs title commands for one operator against one resolved target.
///
/// Target, privilege and title are all checked before the player's title
/// state is touched, so a rejected command leaves it exactly as it was.
pub struct TitleAdmin<'a> {
    registry: &'a TitleRegistry,
    privileges: &'a dyn PrivilegeCheck,
}

impl<'a> TitleAdmin<'a> {
    pub fn new(registry: &'a TitleRegistry, privileges: &'a dyn PrivilegeCheck) -> Self {
        Self {
            registry,
            privileges,
        }
    }

    pub fn add(&self, actor: &Actor, target: Option<&mut PlayerState>, id: i64) -> TitleResult {
        let (target, title) = self.prepare(actor, target, id)?;
        let outcome = target.titles.grant(title);
        Ok(TitleReport::Added {
            target: target_ref(target),
            title: notice(title, target, actor),
            newly_granted: outcome.newly_granted,
        })
    }

    pub fn remove(&self, actor: &Actor, target: Option<&mut PlayerState>, id: i64) -> TitleResult {
        let (target, title) = self.prepare(actor, target, id)?;
        let outcome = target.titles.revoke(title);
        Ok(TitleReport::Removed {
            target: target_ref(target),
            title: notice(title, target, actor),
            was_known: outcome.was_known,
            selection_cleared: outcome.selection_cleared,
        })
    }

    pub fn current(
        &self,
        actor: &Actor,
        target: Option<&mut PlayerState>,
        id: i64,
    ) -> TitleResult {
        let (target, title) = self.prepare(actor, target, id)?;
        let outcome = target.titles.select_current(title);
        Ok(TitleReport::Current {
            target: target_ref(target),
            title: notice(title, target, actor),
            newly_granted: outcome.newly_granted,
        })
    }

    pub fn set_mask(
        &self,
        actor: &Actor,
        target: Option<&mut PlayerState>,
        raw_mask: u64,
    ) -> TitleResult {
        let target = self.authorize(actor, target)?;
        let outcome = target.titles.overwrite_mask(raw_mask, self.registry);
        if outcome.dropped != 0 {
            logging::log_error(&format!(
                "title mask for {} dropped unknown bits {:#x}",
                target.name, outcome.dropped
            ));
        }
        Ok(TitleReport::MaskSet {
            target: target_ref(target),
            known_mask: outcome.applied,
            dropped: outcome.dropped,
            selection_cleared: outcome.selection_cleared,
        })
    }

    fn authorize<'t>(
        &self,
        actor: &Actor,
        target: Option<&'t mut PlayerState>,
    ) -> Result<&'t mut PlayerState, TitleCommandError> {
        let target = target.ok_or(TitleCommandError::NoTargetSelected)?;
        if !self.privileges.may_act_on(actor, target) {
            return Err(TitleCommandError::InsufficientPrivilege);
        }
        Ok(target)
    }

    fn prepare<'t>(
        &self,
        actor: &Actor,
        target: Option<&'t mut PlayerState>,
        id: i64,
    ) -> Result<(&'t mut PlayerState, &'a TitleDefinition), TitleCommandError> {
        let target = self.authorize(actor, target)?;
        let registry: &'a TitleRegistry = self.registry;
        let title = registry
            .lookup(id)
            .ok_or(TitleCommandError::InvalidTitleId(id))?;
        Ok((target, title))
    }
}

fn target_ref(player: &PlayerState) -> TargetRef {
    TargetRef {
        id: player.id,
        name: player.name.clone(),
    }
}

fn notice(title: &TitleDefinition, target: &PlayerState, actor: &Actor) -> TitleNotice {
    TitleNotice {
        id: title.id.0,
        bit_index: title.bit_index,
        display_name: title.display_name(target.sex, actor.locale, &target.name),
    }
}
