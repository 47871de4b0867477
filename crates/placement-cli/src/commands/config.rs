use anyhow::Result;
use colored::Colorize;
use placement_core::config::PortalConfig;
use placement_infrastructure::ConfigService;

/// Prints the effective configuration with the API key masked.
pub fn show(config: &PortalConfig) -> Result<()> {
    let mut printable = config.clone();
    if printable.service.has_api_key() {
        printable.service.api_key = "********".to_string();
    }
    print!("{}", toml::to_string_pretty(&printable)?);
    Ok(())
}

pub fn init(service: &ConfigService, force: bool) -> Result<()> {
    let path = service.init_default(force)?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

pub fn path(service: &ConfigService) {
    println!("{}", service.config_path().display());
}
