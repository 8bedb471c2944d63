//! Implementation of the `shipkit list` command.

use serde_json::json;

use shipkit_core::application::{BuilderCatalog, BuilderInfo};

use super::builtin_builders;
use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let builders = BuilderCatalog::new(builtin_builders()?).list();

    match args.format {
        ListFormat::Table => {
            output.header("Builders (in precedence order):")?;
            output.print(&format!(
                "  {:<14} {:<10} {:<20} {}",
                "NAME", "FEATURE", "FRAMEWORKS", "CONVENTION"
            ))?;
            for builder in &builders {
                output.print(&table_row(builder))?;
            }
        }

        // JSON output must be parseable even in non-TTY pipes, so it
        // ignores --quiet.
        ListFormat::Json => {
            let rendered: Vec<_> = builders.iter().map(builder_json).collect();
            output.json(&rendered)?;
        }

        ListFormat::List => {
            for builder in &builders {
                output.print(&builder.name)?;
            }
        }
    }

    Ok(())
}

fn table_row(builder: &BuilderInfo) -> String {
    let frameworks = if builder.frameworks.is_empty() {
        "any".to_owned()
    } else {
        builder.frameworks.join(", ")
    };
    format!(
        "  {:<14} {:<10} {:<20} {}",
        builder.name,
        builder.feature.as_deref().unwrap_or("(name)"),
        frameworks,
        builder.convention
    )
}

fn builder_json(builder: &BuilderInfo) -> serde_json::Value {
    json!({
        "name": builder.name,
        "feature": builder.feature,
        "frameworks": builder.frameworks,
        "convention": builder.convention,
    })
}
