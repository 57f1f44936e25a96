//! `glossa check` and `glossa validate`.

use glossa_core::coverage::{coverage, CoverageReport};

use super::CommandContext;

/// Coverage report against `reference` (default: the first fallback
/// locale, else the default locale). Returns the rendered report and
/// whether every locale is complete.
pub fn handle_check(
    ctx: &CommandContext<'_>,
    reference: Option<&str>,
    json: bool,
) -> anyhow::Result<(String, bool)> {
    let catalog_cfg = &ctx.config.catalog;
    let reference = reference
        .or(catalog_cfg.fallback_locales.first().map(String::as_str))
        .unwrap_or(&catalog_cfg.default_locale);

    let report = coverage(&ctx.catalog, reference)?;
    let complete = report.is_complete();
    let text = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        render_report(&report)
    };
    Ok((text, complete))
}

fn render_report(report: &CoverageReport) -> String {
    let mut out = format!("Reference locale: {}\n", report.reference);
    if report.locales.is_empty() {
        out.push_str("No other locales loaded.\n");
    }
    for locale in &report.locales {
        out.push_str(&format!("\n{}\n", locale.locale));
        for ns in &locale.namespaces {
            out.push_str(&format!(
                "  {}: {}/{} ({:.1}%)\n",
                ns.namespace, ns.present, ns.total, ns.coverage_percent
            ));
            for key in &ns.missing {
                out.push_str(&format!("    missing: {key}\n"));
            }
            for key in &ns.extra {
                out.push_str(&format!("    extra: {key}\n"));
            }
            for m in &ns.placeholder_mismatches {
                out.push_str(&format!(
                    "    placeholders: {} expected [{}] found [{}]\n",
                    m.key,
                    m.expected.join(", "),
                    m.found.join(", ")
                ));
            }
        }
    }
    out
}

/// Summarize what loaded. Loading itself already failed on malformed input.
pub fn handle_validate(ctx: &CommandContext<'_>) -> String {
    let mut out = String::new();
    for locale in ctx.catalog.locales() {
        for ns in ctx.catalog.namespaces(locale) {
            let leaves = ctx.catalog.table(locale, ns).map_or(0, |t| t.len());
            out.push_str(&format!("{locale}/{ns}: {leaves} keys\n"));
        }
    }
    out.push_str(&format!(
        "OK: {} tables across {} locales",
        ctx.catalog.len(),
        ctx.catalog.locales().len()
    ));
    out
}
