//! Effects command implementation

use serde::Serialize;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::PxmConfig;
use crate::transforms::{explain_effect, Effect};

/// One menu entry as printed by `pxm effects --json`
#[derive(Debug, Serialize)]
struct MenuEntry {
    tag: &'static str,
    name: &'static str,
    label: &'static str,
    description: String,
    produces_text: bool,
}

fn menu_entries(config: &PxmConfig) -> Vec<MenuEntry> {
    Effect::menu(&config.effect_defaults())
        .iter()
        .filter_map(|effect| {
            Some(MenuEntry {
                tag: effect.callback_tag()?,
                name: effect.name(),
                label: effect.label(),
                description: explain_effect(effect),
                produces_text: effect.produces_text(),
            })
        })
        .collect()
}

/// List the effect menu with the configured default parameters.
pub fn run_effects(json: bool, config: &PxmConfig) -> ExitCode {
    let entries = menu_entries(config);

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for entry in &entries {
            println!("{:<16} {:<18} {}", entry.tag, entry.label, entry.description);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_entries_follow_config() {
        let mut config = PxmConfig::default();
        config.effects.pixelate_block = 5;

        let entries = menu_entries(&config);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].tag, "pixelate");
        assert_eq!(entries[0].description, "Pixelate into 5×5 blocks");
        assert!(entries[1].produces_text);
    }

    #[test]
    fn test_menu_entries_serialize() {
        let entries = menu_entries(&PxmConfig::default());
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[3]["tag"], "flip_left_right");
        assert_eq!(json[3]["name"], "mirror-h");
    }
}
