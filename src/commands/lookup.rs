//! `glossa lookup`: print one translation.

use glossa_core::markup;
use glossa_core::translator::count_param;
use glossa_core::Resolved;

use super::CommandContext;

/// Render `key` the way the application would see it.
///
/// Missing keys print the key itself, matching `Translator::t`. A key that
/// names a subtree prints the subtree as JSON.
pub fn handle_lookup(
    ctx: &CommandContext<'_>,
    key: &str,
    locale: Option<&str>,
    params: &[(String, String)],
    plain: bool,
) -> anyhow::Result<String> {
    let translator = ctx.translator(locale);
    let params: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    if let Ok(resolution) = translator.lookup_counted(key, count_param(&params)) {
        if let Resolved::Tree(children) = resolution.value {
            return Ok(serde_json::to_string_pretty(children)?);
        }
        if let Resolved::List(_) = resolution.value {
            if let Some(parts) = translator.t_list(key, &params) {
                return Ok(render(&parts.join("\n"), plain));
            }
        }
    }

    Ok(render(&translator.t(key, &params), plain))
}

fn render(text: &str, plain: bool) -> String {
    if plain {
        markup::strip(text)
    } else {
        text.to_string()
    }
}
