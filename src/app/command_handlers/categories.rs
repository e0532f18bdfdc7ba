use crate::app::command_support::{load_catalog, load_settings, parse_flags, CATEGORIES_FLAG, CONFIG_FLAG};

pub fn cmd_categories(args: &[String]) -> Result<String, String> {
    let flags = parse_flags(args, &[CONFIG_FLAG, CATEGORIES_FLAG], &[])?;
    if let Some(extra) = flags.positionals().first() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    let settings = load_settings(&flags)?;
    let catalog = load_catalog(&flags, &settings)?;
    if catalog.is_empty() {
        return Ok("No categories configured".to_string());
    }
    let mut lines = vec![format!("categories={}", catalog.len())];
    lines.extend(
        catalog
            .categories()
            .iter()
            .map(|category| format!("category={} name={}", category.id, category.name)),
    );
    Ok(lines.join("\n"))
}
