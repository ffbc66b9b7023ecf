//! Renderers for the three output formats.

use std::io::Write;
use std::path::Path;

use eyre::{Context, Result};
use rstest_bdd_gherkin::{Document, LanguageKeywords, Step, StepKeyword, Token};
use serde::Serialize;

#[derive(Serialize)]
struct JsonDump<'a> {
    path: &'a Path,
    #[serde(flatten)]
    document: &'a Document,
}

/// Write `document` as pretty JSON followed by a newline.
pub(crate) fn write_json(writer: &mut dyn Write, path: &Path, document: &Document) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &JsonDump { path, document })
        .wrap_err_with(|| format!("failed to serialise {}", path.display()))?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}

fn write_header(writer: &mut dyn Write, path: &Path) -> Result<()> {
    writeln!(writer, "# {}", path.display())
        .wrap_err_with(|| format!("failed to write header for {}", path.display()))
}

/// Write one token per line under a `# path` header.
pub(crate) fn write_tokens(writer: &mut dyn Write, path: &Path, tokens: &[Token]) -> Result<()> {
    write_header(writer, path)?;
    for token in tokens {
        writeln!(writer, "{token}").wrap_err("failed to write token")?;
    }
    Ok(())
}

/// Write every step with its resolved keyword, grouped by background and
/// scenario.
///
/// Steps without a leading keyword (label steps carrying a table or a
/// doc string) are printed with `-` in the keyword column.
pub(crate) fn write_steps(
    writer: &mut dyn Write,
    path: &Path,
    document: &Document,
    keywords: &LanguageKeywords,
) -> Result<()> {
    write_header(writer, path)?;
    if let Some(background) = &document.feature.background {
        writeln!(writer, "Background: {}", background.title.as_str())
            .wrap_err("failed to write background header")?;
        write_step_lines(writer, &background.steps, keywords)?;
    }
    for scenario in &document.feature.scenarios {
        writeln!(writer, "Scenario: {}", scenario.title.as_str())
            .wrap_err_with(|| format!("failed to write scenario '{}'", scenario.title.as_str()))?;
        write_step_lines(writer, &scenario.steps, keywords)?;
    }
    Ok(())
}

fn write_step_lines(
    writer: &mut dyn Write,
    steps: &[Step],
    keywords: &LanguageKeywords,
) -> Result<()> {
    let mut previous: Option<StepKeyword> = None;
    for step in steps {
        let resolved = keywords
            .step_keyword(step.title.as_str())
            .map(|keyword| keyword.resolve(&mut previous));
        let column = resolved.map_or("-", |keyword| keyword.as_str());
        let mut extras = String::new();
        if let Some(table) = &step.table {
            extras.push_str(&format!(" [table: {} row(s)]", table.fields.len()));
        }
        if step.text.is_some() {
            extras.push_str(" [doc string]");
        }
        writeln!(writer, "  {column:<5} {}{extras}", step.title.as_str())
            .wrap_err_with(|| format!("failed to write step '{}'", step.title.as_str()))?;
    }
    Ok(())
}
