use std::path::PathBuf;
use titles::{Locale, Sex, TitleRegistry};

fn main() -> Result<(), String> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/titles.yaml"))
        });
    let registry = TitleRegistry::load(&path)?;

    for title in registry.iter() {
        println!(
            "title {:>3} bit {:>2} male '{}' female '{}'",
            title.id.0,
            title.bit_index,
            title.name_template(Sex::Male, Locale::DEFAULT),
            title.name_template(Sex::Female, Locale::DEFAULT)
        );
    }

    let valid = registry.valid_mask();
    let unused = registry.unused_bits();
    println!("definitions: {}", registry.len());
    println!("valid mask: {:#018x} ({})", valid, valid);
    println!("unused bits: {:?}", unused);
    Ok(())
}
