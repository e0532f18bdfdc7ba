use crate::app::command_support::{
    load_settings, map_config_err, parse_flags, resolve_config_path, CONFIG_FLAG,
};
use crate::config::init_settings;

pub fn cmd_config(args: &[String]) -> Result<String, String> {
    let flags = parse_flags(args, &[CONFIG_FLAG], &[])?;
    match flags.positionals() {
        [action] if action == "show" => {
            let path = resolve_config_path(&flags)?;
            let settings = load_settings(&flags)?;
            let rendered = serde_yaml::to_string(&settings)
                .map_err(|e| format!("failed to encode settings: {e}"))?;
            Ok(format!(
                "config={}\nexists={}\n{}",
                path.display(),
                path.exists(),
                rendered.trim_end()
            ))
        }
        [action] if action == "init" => {
            let path = resolve_config_path(&flags)?;
            init_settings(&path).map_err(map_config_err)?;
            Ok(format!("config initialized\nconfig={}", path.display()))
        }
        _ => Err("usage: config show|init [--config <file>]".to_string()),
    }
}
