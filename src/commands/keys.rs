//! `glossa keys`: list leaf keys.

use super::CommandContext;

/// List leaf keys for one locale, one line each, as `namespace:key`.
///
/// `namespace` restricts to a single table, `prefix` filters on the key
/// path (without the namespace).
pub fn handle_keys(
    ctx: &CommandContext<'_>,
    locale: Option<&str>,
    namespace: Option<&str>,
    prefix: Option<&str>,
) -> anyhow::Result<String> {
    let locale = locale.unwrap_or(&ctx.config.catalog.default_locale);
    if !ctx.catalog.contains_locale(locale) {
        anyhow::bail!("locale '{locale}' is not loaded");
    }

    let mut lines = Vec::new();
    for ns in ctx.catalog.namespaces(locale) {
        if namespace.is_some_and(|wanted| wanted != ns) {
            continue;
        }
        let Some(table) = ctx.catalog.table(locale, ns) else {
            continue;
        };
        for key in table.keys() {
            if prefix.map_or(true, |p| key.starts_with(p)) {
                lines.push(format!("{ns}:{key}"));
            }
        }
    }
    Ok(lines.join("\n"))
}
