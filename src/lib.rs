pub mod admin;
mod config;
pub mod entities;
pub mod telemetry;
pub mod world;

pub use admin::commands::{parse_admin_command, AdminCommand, TitleCommand};
pub use admin::security::{Actor, PrivilegeCheck, SecurityPolicy};
pub use admin::titles::{TitleAdmin, TitleCommandError, TitleReport, TitleResult};
pub use entities::player::{PlayerId, PlayerState, SecurityLevel, Sex};
pub use entities::titles::PlayerTitleState;
pub use world::state::{CommandOutcome, OperatorId, WorldState};
pub use world::titles::{Locale, TitleDefinition, TitleId, TitleRegistry, TITLE_MASK_BITS};

use std::io::BufRead;
use std::sync::Arc;

pub fn run(args: &[String]) -> Result<(), String> {
    let config = config::AppConfig::from_args(args)?;
    telemetry::logging::init(&config.root)?;
    let registry = Arc::new(TitleRegistry::load(&config.registry_path)?);
    let policy = SecurityPolicy {
        strict: config.strict_security,
    };

    println!("titles: registry scan");
    println!("- root: {}", config.root.display());
    println!("- registry: {}", config.registry_path.display());
    println!("- definitions: {}", registry.len());
    println!("- valid mask: {:#018x}", registry.valid_mask());
    println!("- session locale: {}", config.locale.code());
    println!(
        "- security: {}",
        if policy.strict { "strict" } else { "standard" }
    );

    let mut world = WorldState::new(registry, policy, config.locale);
    telemetry::logging::log_game("console started");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|err| format!("console read failed: {}", err))?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_admin_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                println!("console: commands start with '!'");
                continue;
            }
            Err(err) => {
                println!("console: {}", err);
                continue;
            }
        };
        match world.handle_admin_command(OperatorId::Console, command)? {
            CommandOutcome::Messages(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            CommandOutcome::Shutdown => break,
        }
    }
    telemetry::logging::log_game("console stopped");
    Ok(())
}
