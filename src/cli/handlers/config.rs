//! Configuration handler for cmdhist CLI

use crate::cli::CliApp;
use crate::cli::args::ConfigArgs;
use crate::config::Config;
use crate::error::{Error, Result};

pub fn handle_config(app: &mut CliApp, args: &ConfigArgs) -> Result<()> {
    if args.show {
        let config_json = serde_json::to_string_pretty(&app.config)?;
        println!("{}", config_json);
    } else if args.init {
        let config_path = Config::default_config_path()?;
        Config::default().save_to_path(&config_path)?;
        println!("Configuration initialized at {}", config_path.display());
    } else if args.validate {
        if let Some(e) = app.config_error.take() {
            return Err(e);
        }
        app.config.validate()?;
        println!("Configuration is valid");
    } else {
        return Err(Error::invalid_arguments(
            "config needs one of --show, --init or --validate",
        ));
    }

    Ok(())
}
