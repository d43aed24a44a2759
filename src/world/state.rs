use crate::admin::commands::{AdminCommand, TitleCommand};
use crate::admin::reports;
use crate::admin::security::{Actor, SecurityPolicy};
use crate::admin::titles::{TitleAdmin, TitleResult};
use crate::entities::player::{PlayerId, PlayerState, SecurityLevel, Sex};
use crate::telemetry::logging;
use crate::world::titles::{Locale, TitleRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Which operator the current command came from. The console has no player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Console,
    Player(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Messages(Vec<String>),
    Shutdown,
}

pub struct WorldState {
    pub registry: Arc<TitleRegistry>,
    pub players: HashMap<PlayerId, PlayerState>,
    pub policy: SecurityPolicy,
    pub locale: Locale,
    selections: HashMap<OperatorId, PlayerId>,
    next_player_id: u32,
}

impl WorldState {
    pub fn new(registry: Arc<TitleRegistry>, policy: SecurityPolicy, locale: Locale) -> Self {
        Self {
            registry,
            players: HashMap::new(),
            policy,
            locale,
            selections: HashMap::new(),
            next_player_id: 1,
        }
    }

    pub fn login(
        &mut self,
        name: &str,
        sex: Sex,
        security: SecurityLevel,
    ) -> Result<PlayerId, String> {
        if self.find_player_by_name(name).is_some() {
            return Err(format!("{} is already online", name));
        }
        let id = PlayerId(self.next_player_id);
        self.next_player_id = self.next_player_id.saturating_add(1);
        let mut player = PlayerState::new(id, name.to_string(), sex);
        player.security = security;
        self.players.insert(id, player);
        logging::log_game(&format!(
            "{} logged in ({}, {})",
            name,
            id.0,
            security.name()
        ));
        Ok(id)
    }

    pub fn logout(&mut self, player_id: PlayerId) -> Option<PlayerState> {
        let player = self.players.remove(&player_id)?;
        self.selections.retain(|operator, target| {
            *target != player_id && *operator != OperatorId::Player(player_id)
        });
        logging::log_game(&format!("{} logged out", player.name));
        Some(player)
    }

    pub fn find_player_by_name(&self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        self.players
            .values()
            .find(|player| player.name.eq_ignore_ascii_case(name))
            .map(|player| player.id)
    }

    pub fn select_target(
        &mut self,
        operator: OperatorId,
        name: Option<&str>,
    ) -> Result<Option<PlayerId>, String> {
        let Some(name) = name else {
            self.selections.remove(&operator);
            return Ok(None);
        };
        let target = self
            .find_player_by_name(name)
            .ok_or_else(|| format!("Player {} is not online.", name))?;
        self.selections.insert(operator, target);
        Ok(Some(target))
    }

    pub fn selected_target(&self, operator: OperatorId) -> Option<PlayerId> {
        self.selections
            .get(&operator)
            .copied()
            .filter(|id| self.players.contains_key(id))
    }

    pub fn actor(&self, operator: OperatorId) -> Result<Actor, String> {
        match operator {
            OperatorId::Console => Ok(Actor::console(self.locale)),
            OperatorId::Player(id) => self
                .players
                .get(&id)
                .map(|player| Actor::from_player(player, self.locale))
                .ok_or_else(|| format!("operator {} is not online", id.0)),
        }
    }

    /// Runs one title command for `operator` against their selected target.
    pub fn run_title_command(
        &mut self,
        operator: OperatorId,
        command: TitleCommand,
    ) -> Result<TitleResult, String> {
        let actor = self.actor(operator)?;
        let target_id = self.selected_target(operator);
        let target = target_id.and_then(|id| self.players.get_mut(&id));
        let admin = TitleAdmin::new(&self.registry, &self.policy);
        let result = match command {
            TitleCommand::Add(id) => admin.add(&actor, target, id),
            TitleCommand::Remove(id) => admin.remove(&actor, target, id),
            TitleCommand::Current(id) => admin.current(&actor, target, id),
            TitleCommand::SetMask(mask) => admin.set_mask(&actor, target, mask),
        };
        let target_name = target_id
            .and_then(|id| self.players.get(&id))
            .map(|player| player.name.as_str())
            .unwrap_or("-");
        match &result {
            Ok(report) => logging::log_gamemaster(&format!(
                "{} titles {:?} on {}: ok{}",
                actor.name,
                command,
                target_name,
                if report.selection_cleared() {
                    ", selection cleared"
                } else {
                    ""
                }
            )),
            Err(err) => logging::log_gamemaster(&format!(
                "{} titles {:?} on {}: {}",
                actor.name, command, target_name, err
            )),
        }
        Ok(result)
    }

    pub fn handle_admin_command(
        &mut self,
        operator: OperatorId,
        command: AdminCommand,
    ) -> Result<CommandOutcome, String> {
        let messages = match command {
            AdminCommand::Titles(command) => {
                let result = self.run_title_command(operator, command)?;
                reports::render(&result)
            }
            AdminCommand::Select { target } => {
                match self.select_target(operator, target.as_deref()) {
                    Ok(Some(id)) => {
                        let name = self
                            .players
                            .get(&id)
                            .map(|player| player.name.as_str())
                            .unwrap_or("-");
                        vec![format!("Selected {}.", name)]
                    }
                    Ok(None) => vec!["Selection cleared.".to_string()],
                    Err(err) => vec![err],
                }
            }
            AdminCommand::Login {
                name,
                sex,
                security,
            } => match self.login(&name, sex, security) {
                Ok(id) => vec![format!("{} is now online ({}).", name, id.0)],
                Err(err) => vec![err],
            },
            AdminCommand::Kick { target } => {
                let Some(target) = target else {
                    return Ok(CommandOutcome::Messages(vec![
                        "Kick requires a character name.".to_string(),
                    ]));
                };
                match self.find_player_by_name(&target) {
                    Some(id) => {
                        self.logout(id);
                        vec![format!("{} was kicked.", target)]
                    }
                    None => vec![format!("Player {} is not online.", target)],
                }
            }
            AdminCommand::Online => {
                let mut players: Vec<&PlayerState> = self.players.values().collect();
                players.sort_by_key(|player| player.id);
                let mut lines = vec![format!("{} players online.", players.len())];
                for player in players {
                    let current = match player.titles.selected_bit() {
                        0 => "none".to_string(),
                        bit => self
                            .registry
                            .by_bit(bit)
                            .map(|title| title.display_name(player.sex, self.locale, &player.name))
                            .unwrap_or_else(|| format!("bit {}", bit)),
                    };
                    lines.push(format!(
                        "{} ({}) titles={:#x} current={}",
                        player.name,
                        player.security.name(),
                        player.titles.known_mask(),
                        current
                    ));
                }
                lines
            }
            AdminCommand::Shutdown => return Ok(CommandOutcome::Shutdown),
            AdminCommand::Unknown(name) => vec![format!("Unknown command '{}'.", name)],
        };
        Ok(CommandOutcome::Messages(messages))
    }
}
