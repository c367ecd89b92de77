//! `botswarm config`: Configuration management commands.

use std::path::{Path, PathBuf};

use botswarm_config::SwarmConfig;

fn resolve(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(SwarmConfig::config_path)
}

fn load(path: Option<&Path>) -> Result<SwarmConfig, botswarm_config::ConfigError> {
    SwarmConfig::load_file(&resolve(path))
}

/// Non-fatal oddities worth pointing out to an operator.
fn warnings(config: &SwarmConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();

    if config.conf_version != botswarm_config::CONF_VERSION {
        warnings.push("conf_version does not match this build; some options may be missing");
    }

    if config.max_bots == 0 {
        warnings.push("max_bots is 0, no bot can ever be added");
    }

    if config.disable_bots {
        warnings.push("disable_bots is set; only GM accounts can summon bots");
    }

    let collect = &config.collect;
    let collects_anything = collect.combat
        || collect.quest
        || collect.profession
        || collect.loot
        || collect.skin
        || collect.objects;
    if collects_anything && collect.distance == 0 {
        warnings.push("collect.distance is 0, bots will not collect anything");
    }

    warnings
}

pub fn validate(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match load(path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Max bots:        {}", config.max_bots);
            println!("   Debug whisper:   {}", config.debug_whisper);
            println!("   Sell garbage:    {}", config.sell_garbage);
            println!(
                "   Follow distance: {}..{}",
                config.follow_distance.min, config.follow_distance.max
            );
            println!(
                "   Collect range:   {} (max {})",
                config.collect.distance, config.collect.distance_max
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load(path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", resolve(path).display());
    Ok(())
}

pub fn init(path: Option<&Path>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = resolve(path);

    if config_path.exists() && !force {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or re-run with --force.");
        return Ok(());
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&config_path, SwarmConfig::default_toml())?;
    println!("✅ Created {}", config_path.display());
    Ok(())
}
