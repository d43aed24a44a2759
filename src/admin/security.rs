use crate::entities::player::{PlayerId, PlayerState, SecurityLevel};
use crate::world::titles::Locale;

/// The operator issuing an admin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub player_id: Option<PlayerId>,
    pub name: String,
    pub security: SecurityLevel,
    pub locale: Locale,
}

impl Actor {
    pub fn console(locale: Locale) -> Self {
        Self {
            player_id: None,
            name: "Console".to_string(),
            security: SecurityLevel::Console,
            locale,
        }
    }

    pub fn from_player(player: &PlayerState, locale: Locale) -> Self {
        Self {
            player_id: Some(player.id),
            name: player.name.clone(),
            security: player.security,
            locale,
        }
    }
}

pub trait PrivilegeCheck {
    fn may_act_on(&self, actor: &Actor, target: &PlayerState) -> bool;
}

/// Rank comparison between actor and target.
///
/// Title commands need at least `GameMaster`. Targets above the actor are
/// off limits; with `strict`, so are targets of equal rank. Operators may
/// always act on themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityPolicy {
    pub strict: bool,
}

impl SecurityPolicy {
    pub const MINIMUM: SecurityLevel = SecurityLevel::GameMaster;
}

impl PrivilegeCheck for SecurityPolicy {
    fn may_act_on(&self, actor: &Actor, target: &PlayerState) -> bool {
        if actor.security < Self::MINIMUM {
            return false;
        }
        if actor.player_id == Some(target.id) {
            return true;
        }
        if self.strict {
            target.security < actor.security
        } else {
            target.security <= actor.security
        }
    }
}

impl<F> PrivilegeCheck for F
where
    F: Fn(&Actor, &PlayerState) -> bool,
{
    fn may_act_on(&self, actor: &Actor, target: &PlayerState) -> bool {
        self(actor, target)
    }
}
