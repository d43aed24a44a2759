use crate::entities::player::{SecurityLevel, Sex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCommand {
    Add(i64),
    Remove(i64),
    Current(i64),
    SetMask(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Titles(TitleCommand),
    Select {
        target: Option<String>,
    },
    Login {
        name: String,
        sex: Sex,
        security: SecurityLevel,
    },
    Kick {
        target: Option<String>,
    },
    Online,
    Shutdown,
    Unknown(String),
}

pub fn parse_admin_command(message: &str) -> Result<Option<AdminCommand>, String> {
    let trimmed = message.trim();
    if !trimmed.starts_with('!') {
        return Ok(None);
    }

    let mut parts = trimmed[1..].split_whitespace();
    let command = parts
        .next()
        .ok_or_else(|| "admin command missing name".to_string())?;
    let command = command.to_ascii_lowercase();
    let parsed = match command.as_str() {
        "titles" | "title" => AdminCommand::Titles(parse_title_command(&mut parts)?),
        "select" | "target" => AdminCommand::Select {
            target: parts.next().map(str::to_string),
        },
        "login" => {
            let name = parts
                .next()
                .ok_or_else(|| "login requires a character name".to_string())?
                .to_string();
            let sex = match parts.next() {
                Some(value) => Sex::parse(value)
                    .ok_or_else(|| format!("login expected male or female, got '{value}'"))?,
                None => Sex::Male,
            };
            let security = match parts.next() {
                Some(value) => SecurityLevel::parse(value)
                    .ok_or_else(|| format!("login expected a security level, got '{value}'"))?,
                None => SecurityLevel::Player,
            };
            AdminCommand::Login {
                name,
                sex,
                security,
            }
        }
        "kick" => AdminCommand::Kick {
            target: parts.next().map(str::to_string),
        },
        "online" => AdminCommand::Online,
        "shutdown" => AdminCommand::Shutdown,
        _ => AdminCommand::Unknown(command),
    };
    Ok(Some(parsed))
}

fn parse_title_command<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
) -> Result<TitleCommand, String> {
    let action = parts
        .next()
        .ok_or_else(|| "titles command missing action".to_string())?
        .to_ascii_lowercase();
    match action.as_str() {
        "add" => Ok(TitleCommand::Add(parse_title_id(parts.next())?)),
        "remove" => Ok(TitleCommand::Remove(parse_title_id(parts.next())?)),
        "current" => Ok(TitleCommand::Current(parse_title_id(parts.next())?)),
        "set" => {
            let field = parts
                .next()
                .ok_or_else(|| "titles set missing field".to_string())?;
            if !field.eq_ignore_ascii_case("mask") {
                return Err(format!("titles set expected 'mask', got '{field}'"));
            }
            Ok(TitleCommand::SetMask(parse_u64(parts.next())?))
        }
        _ => Err(format!("unknown titles action '{action}'")),
    }
}

fn parse_title_id(value: Option<&str>) -> Result<i64, String> {
    let value = value.ok_or_else(|| "titles command missing title id".to_string())?;
    value
        .parse::<i64>()
        .map_err(|_| format!("titles command expected title id, got '{value}'"))
}

fn parse_u64(value: Option<&str>) -> Result<u64, String> {
    let value = value.ok_or_else(|| "titles command missing mask value".to_string())?;
    value
        .parse::<u64>()
        .map_err(|_| format!("titles command expected u64, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_admin_command_ignores_non_command() {
        assert_eq!(parse_admin_command("hello").unwrap(), None);
    }

    #[test]
    fn parse_admin_command_parses_title_actions() {
        assert_eq!(
            parse_admin_command("!titles add 42").unwrap(),
            Some(AdminCommand::Titles(TitleCommand::Add(42)))
        );
        assert_eq!(
            parse_admin_command("!titles REMOVE 3").unwrap(),
            Some(AdminCommand::Titles(TitleCommand::Remove(3)))
        );
        assert_eq!(
            parse_admin_command("!title current 1").unwrap(),
            Some(AdminCommand::Titles(TitleCommand::Current(1)))
        );
    }

    #[test]
    fn parse_admin_command_passes_non_positive_ids_through() {
        assert_eq!(
            parse_admin_command("!titles add -7").unwrap(),
            Some(AdminCommand::Titles(TitleCommand::Add(-7)))
        );
    }

    #[test]
    fn parse_admin_command_parses_set_mask() {
        assert_eq!(
            parse_admin_command("!titles set mask 18446744073709551615").unwrap(),
            Some(AdminCommand::Titles(TitleCommand::SetMask(u64::MAX)))
        );
        assert!(parse_admin_command("!titles set color 5").is_err());
        assert!(parse_admin_command("!titles set mask -1").is_err());
    }

    #[test]
    fn parse_admin_command_rejects_bad_title_arguments() {
        assert!(parse_admin_command("!titles add").is_err());
        assert!(parse_admin_command("!titles add abc").is_err());
        assert!(parse_admin_command("!titles").is_err());
        assert!(parse_admin_command("!titles grant 3").is_err());
    }

    #[test]
    fn parse_admin_command_parses_select() {
        assert_eq!(
            parse_admin_command("!select Bob").unwrap(),
            Some(AdminCommand::Select {
                target: Some("Bob".to_string())
            })
        );
        assert_eq!(
            parse_admin_command("!select").unwrap(),
            Some(AdminCommand::Select { target: None })
        );
    }

    #[test]
    fn parse_admin_command_parses_login() {
        assert_eq!(
            parse_admin_command("!login Jaina female gm").unwrap(),
            Some(AdminCommand::Login {
                name: "Jaina".to_string(),
                sex: Sex::Female,
                security: SecurityLevel::GameMaster,
            })
        );
        assert_eq!(
            parse_admin_command("!login Bob").unwrap(),
            Some(AdminCommand::Login {
                name: "Bob".to_string(),
                sex: Sex::Male,
                security: SecurityLevel::Player,
            })
        );
        assert!(parse_admin_command("!login").is_err());
        assert!(parse_admin_command("!login Bob other").is_err());
    }

    #[test]
    fn parse_admin_command_parses_kick_target() {
        assert_eq!(
            parse_admin_command("!kick Bob").unwrap(),
            Some(AdminCommand::Kick {
                target: Some("Bob".to_string())
            })
        );
    }

    #[test]
    fn parse_admin_command_handles_unknown() {
        assert_eq!(
            parse_admin_command("!whoami").unwrap(),
            Some(AdminCommand::Unknown("whoami".to_string()))
        );
    }
}
