use crate::entities::player::Sex;
use crate::telemetry::logging;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Width of the known-titles mask. Every `bit_index` must fit below it.
pub const TITLE_MASK_BITS: u8 = 64;

const NAME_PLACEHOLDER: &str = "%s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TitleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Locale {
    #[serde(rename = "enUS")]
    EnUs,
    #[serde(rename = "koKR")]
    KoKr,
    #[serde(rename = "frFR")]
    FrFr,
    #[serde(rename = "deDE")]
    DeDe,
    #[serde(rename = "zhCN")]
    ZhCn,
    #[serde(rename = "zhTW")]
    ZhTw,
    #[serde(rename = "esES")]
    EsEs,
    #[serde(rename = "esMX")]
    EsMx,
    #[serde(rename = "ruRU")]
    RuRu,
}

impl Locale {
    pub const DEFAULT: Self = Self::EnUs;

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        [
            Self::EnUs,
            Self::KoKr,
            Self::FrFr,
            Self::DeDe,
            Self::ZhCn,
            Self::ZhTw,
            Self::EsEs,
            Self::EsMx,
            Self::RuRu,
        ]
        .into_iter()
        .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "enUS",
            Self::KoKr => "koKR",
            Self::FrFr => "frFR",
            Self::DeDe => "deDE",
            Self::ZhCn => "zhCN",
            Self::ZhTw => "zhTW",
            Self::EsEs => "esES",
            Self::EsMx => "esMX",
            Self::RuRu => "ruRU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDefinition {
    pub id: TitleId,
    pub bit_index: u8,
    male_names: HashMap<Locale, String>,
    female_names: HashMap<Locale, String>,
}

impl TitleDefinition {
    pub fn new(id: TitleId, bit_index: u8, male_name: impl Into<String>) -> Self {
        let mut male_names = HashMap::new();
        male_names.insert(Locale::DEFAULT, male_name.into());
        Self {
            id,
            bit_index,
            male_names,
            female_names: HashMap::new(),
        }
    }

    pub fn with_name(mut self, sex: Sex, locale: Locale, template: impl Into<String>) -> Self {
        let names = match sex {
            Sex::Male => &mut self.male_names,
            Sex::Female => &mut self.female_names,
        };
        names.insert(locale, template.into());
        self
    }

    pub fn mask(&self) -> u64 {
        1u64.checked_shl(u32::from(self.bit_index)).unwrap_or(0)
    }

    /// Picks the name template for `sex` and `locale`.
    ///
    /// Missing female templates fall back to the male set, and missing
    /// locales fall back to `enUS`. Returns an empty string when the
    /// definition carries no usable template at all.
    pub fn name_template(&self, sex: Sex, locale: Locale) -> &str {
        let preferred = match sex {
            Sex::Male => &self.male_names,
            Sex::Female => &self.female_names,
        };
        preferred
            .get(&locale)
            .or_else(|| self.male_names.get(&locale))
            .or_else(|| preferred.get(&Locale::DEFAULT))
            .or_else(|| self.male_names.get(&Locale::DEFAULT))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn display_name(&self, sex: Sex, locale: Locale, player_name: &str) -> String {
        self.name_template(sex, locale)
            .replacen(NAME_PLACEHOLDER, player_name, 1)
    }
}

#[derive(Debug, Default, Clone)]
pub struct TitleRegistry {
    titles: BTreeMap<TitleId, TitleDefinition>,
    by_bit: HashMap<u8, TitleId>,
}

impl TitleRegistry {
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = fs::read_to_string(path)
            .map_err(|err| format!("title registry read failed for {}: {}", path.display(), err))?;
        let registry = Self::from_yaml(&data)
            .map_err(|err| format!("title registry {}: {}", path.display(), err))?;
        logging::log_game(&format!(
            "title registry loaded: {} definitions from {}",
            registry.len(),
            path.display()
        ));
        Ok(registry)
    }

    pub fn from_yaml(data: &str) -> Result<Self, String> {
        let file: TitleFile =
            serde_yaml::from_str(data).map_err(|err| format!("yaml decode failed: {}", err))?;
        let mut registry = Self::default();
        for entry in file.titles {
            registry.insert(entry.into_definition()?)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, title: TitleDefinition) -> Result<(), String> {
        if title.id.0 == 0 {
            return Err("title id 0 is reserved".to_string());
        }
        if title.bit_index >= TITLE_MASK_BITS {
            return Err(format!(
                "title {} bit index {} exceeds mask width {}",
                title.id.0, title.bit_index, TITLE_MASK_BITS
            ));
        }
        if self.titles.contains_key(&title.id) {
            return Err(format!("title {} already exists", title.id.0));
        }
        if let Some(existing) = self.by_bit.get(&title.bit_index) {
            return Err(format!(
                "title {} bit index {} already used by title {}",
                title.id.0, title.bit_index, existing.0
            ));
        }
        self.by_bit.insert(title.bit_index, title.id);
        self.titles.insert(title.id, title);
        Ok(())
    }

    /// Identifiers arrive from operator input, so anything that does not fit
    /// a positive `u32` is simply unknown.
    pub fn lookup(&self, id: i64) -> Option<&TitleDefinition> {
        if id <= 0 {
            return None;
        }
        let id = u32::try_from(id).ok()?;
        self.titles.get(&TitleId(id))
    }

    /// The definition owning `bit_index`, if any.
    pub fn by_bit(&self, bit_index: u8) -> Option<&TitleDefinition> {
        self.by_bit
            .get(&bit_index)
            .and_then(|id| self.titles.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TitleDefinition> {
        self.titles.values()
    }

    /// Every bit position owned by some definition.
    pub fn valid_mask(&self) -> u64 {
        sanitize_mask(u64::MAX, self.iter())
    }

    /// Bit positions no definition owns, bit 0 included.
    pub fn unused_bits(&self) -> Vec<u8> {
        let valid = self.valid_mask();
        (0..TITLE_MASK_BITS)
            .filter(|bit| (valid >> bit) & 1 == 0)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Drops every bit of `candidate` that no definition claims.
///
/// Two passes: strip all defined bits from a copy so only the orphans remain,
/// then strip the orphans from the candidate.
pub fn sanitize_mask<'a>(
    candidate: u64,
    definitions: impl IntoIterator<Item = &'a TitleDefinition>,
) -> u64 {
    let mut orphans = candidate;
    for definition in definitions {
        orphans &= !definition.mask();
    }
    candidate & !orphans
}

#[derive(Debug, Deserialize)]
struct TitleFile {
    #[serde(default)]
    titles: Vec<TitleEntry>,
}

#[derive(Debug, Deserialize)]
struct TitleEntry {
    id: u32,
    bit_index: u8,
    name: TitleNames,
}

#[derive(Debug, Deserialize)]
struct TitleNames {
    male: HashMap<Locale, String>,
    #[serde(default)]
    female: HashMap<Locale, String>,
}

impl TitleEntry {
    fn into_definition(self) -> Result<TitleDefinition, String> {
        if self.name.male.is_empty() {
            return Err(format!("title {} has no male name template", self.id));
        }
        Ok(TitleDefinition {
            id: TitleId(self.id),
            bit_index: self.bit_index,
            male_names: self.name.male,
            female_names: self.name.female,
        })
    }
}
