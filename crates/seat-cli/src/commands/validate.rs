use anyhow::bail;
use seat_core::errors::FieldViolation;
use seat_schema::SchemaRegistry;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::read_json;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub schema: &'static str,
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
}

/// Check `document` against `schema`, collecting every violation.
pub fn check(
    registry: &SchemaRegistry,
    schema: &'static str,
    document: &Value,
) -> anyhow::Result<ValidationReport> {
    let violations = registry.violations(schema, document)?;
    Ok(ValidationReport {
        schema,
        valid: violations.is_empty(),
        violations,
    })
}

/// Handle `seat validate`.
pub fn handle(args: &ValidateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = read_json(&args.file)?;
    let report = check(&SchemaRegistry::new(), args.kind.schema_name(), &document)?;
    output(&report, flags.format)?;

    if !report.valid {
        bail!(
            "{} is not a valid {} ({} violation(s))",
            args.file.display(),
            report.schema,
            report.violations.len()
        );
    }
    Ok(())
}
