use crate::world::titles::Locale;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub registry_path: PathBuf,
    pub locale: Locale,
    pub strict_security: bool,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        if args.len() < 2 {
            return Err("usage: titles <data-root> [registry_file]".to_string());
        }

        let root = Path::new(&args[1]).to_path_buf();
        let registry_path = if args.len() > 2 {
            PathBuf::from(&args[2])
        } else {
            env_value("TITLES_REGISTRY")
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join("dat").join("titles.yaml"))
        };
        let locale = match env_value("TITLES_LOCALE") {
            Some(code) => Locale::from_code(&code)
                .ok_or_else(|| format!("unknown TITLES_LOCALE '{}'", code))?,
            None => Locale::DEFAULT,
        };
        let strict_security = env_value("TITLES_STRICT_SECURITY")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Ok(Self {
            root,
            registry_path,
            locale,
            strict_security,
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    matches!(value.as_str(), "1" | "true" | "yes" | "on")
}
