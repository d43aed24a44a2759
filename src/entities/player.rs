use crate::entities::titles::PlayerTitleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Account security ranks, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SecurityLevel {
    Player,
    Moderator,
    GameMaster,
    Administrator,
    Console,
}

impl SecurityLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "player" | "0" => Some(Self::Player),
            "moderator" | "mod" | "1" => Some(Self::Moderator),
            "gamemaster" | "gm" | "2" => Some(Self::GameMaster),
            "administrator" | "admin" | "3" => Some(Self::Administrator),
            "console" | "4" => Some(Self::Console),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Moderator => "moderator",
            Self::GameMaster => "gamemaster",
            Self::Administrator => "administrator",
            Self::Console => "console",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub sex: Sex,
    pub security: SecurityLevel,
    pub titles: PlayerTitleState,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: String, sex: Sex) -> Self {
        Self {
            id,
            name,
            sex,
            security: SecurityLevel::Player,
            titles: PlayerTitleState::default(),
        }
    }

    pub fn is_gm(&self) -> bool {
        self.security >= SecurityLevel::GameMaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_no_titles() {
        let player = PlayerState::new(PlayerId(7), "Jaina".to_string(), Sex::Female);
        assert_eq!(player.titles.known_mask(), 0);
        assert_eq!(player.titles.selected_bit(), 0);
        assert!(!player.is_gm());
    }

    #[test]
    fn security_levels_are_ordered() {
        assert!(SecurityLevel::Player < SecurityLevel::Moderator);
        assert!(SecurityLevel::GameMaster < SecurityLevel::Administrator);
        assert!(SecurityLevel::Administrator < SecurityLevel::Console);
    }

    #[test]
    fn parse_security_and_sex() {
        assert_eq!(SecurityLevel::parse("GM"), Some(SecurityLevel::GameMaster));
        assert_eq!(SecurityLevel::parse("3"), Some(SecurityLevel::Administrator));
        assert_eq!(SecurityLevel::parse("king"), None);
        assert_eq!(Sex::parse("Female"), Some(Sex::Female));
        assert_eq!(Sex::parse("x"), None);
    }
}
