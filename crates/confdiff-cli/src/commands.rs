use std::fs;

use anyhow::Context;
use colored::Colorize;
use confdiff_diff::{DiffConfig, DiffResult};
use confdiff_loader::{load_document, DocumentRequest, SectionSelector};
use confdiff_report::{render_json, HtmlReport, ReportContext, TextReport};
use tracing::info;

use crate::cli::*;

/// Both documents loaded and compared.
struct Comparison {
    context: ReportContext,
    result: DiffResult,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let Comparison { context, result } = compare(&cli)?;

    match cli.format {
        OutputFormat::Text => {
            print!("{}", TextReport::new(&context, &result).with_color(!cli.no_color));
        }
        OutputFormat::Json => println!("{}", render_json(&context, &result)?),
    }

    if let Some(path) = &cli.html {
        HtmlReport::new(&context, &result).write_to(path)?;
        let notice = format!("📄 HTML report saved to: {}", path.display().to_string().bold());
        // Keep stdout parseable in JSON mode.
        match cli.format {
            OutputFormat::Text => println!("\n{notice}"),
            OutputFormat::Json => eprintln!("{notice}"),
        }
    }
    Ok(())
}

fn diff_config(cli: &Cli) -> anyhow::Result<DiffConfig> {
    if cli.strict_types {
        return Ok(DiffConfig::strict());
    }
    let Some(path) = &cli.config else {
        return Ok(DiffConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = DiffConfig::from_toml_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), groups = config.equivalence_groups.len(), "loaded diff config");
    Ok(config)
}

fn compare(cli: &Cli) -> anyhow::Result<Comparison> {
    let SectionSelector {
        left: left_section,
        right: right_section,
    } = SectionSelector::parse(cli.section.as_deref().unwrap_or_default());

    let differ = diff_config(cli)?.differ()?;

    let left = load_document(
        &DocumentRequest::new(cli.left.clone())
            .with_section(left_section.clone())
            .with_start(cli.start.clone()),
    )?;
    let right = load_document(
        &DocumentRequest::new(cli.right.clone())
            .with_section(right_section.clone())
            .with_start(cli.start.clone()),
    )?;

    let result = differ.compare(&left.value, &right.value);
    let context = ReportContext::new(left.label, right.label)
        .with_sections(left_section, right_section)
        .with_start_path(cli.start.clone());
    Ok(Comparison { context, result })
}
