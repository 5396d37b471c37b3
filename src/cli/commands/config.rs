use crate::config::Config;
use std::path::Path;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let default_path = Config::default_config_path();
    let path = path.unwrap_or(&default_path);

    if Config::create_default_if_missing(path)? {
        println!("✓ Created default config: {}", path.display());
        println!("  Edit the [catalog] section to point at your film database.");
    } else {
        println!("Config already exists: {}", path.display());
    }
    Ok(())
}

pub fn cmd_show_config(config: &Config) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(&config.masked())?;
    println!("{content}");
    Ok(())
}
