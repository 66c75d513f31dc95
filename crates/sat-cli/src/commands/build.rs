//! `sat build`: merge plugin defaults into the archive configuration.

use tracing::{debug, instrument};

use sat_core::application::BuildReport;

use crate::{
    cli::BuildArgs,
    commands::Services,
    config::{AppConfig, PlanEntry},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: BuildArgs, mut config: AppConfig, output: OutputManager) -> CliResult<()> {
    if !args.plugins.is_empty() {
        config.build.plugins = args.plugins.iter().map(|p| PlanEntry::from_flag(p)).collect();
    }
    if let Some(path) = args.output {
        config.build.output = path;
    }

    let plan = config.build.plan()?;
    debug!(plugins = plan.len(), dry_run = args.dry_run, "Build plan ready");

    let builder = Services::new(&config).into_builder();

    if args.dry_run {
        let report = builder.build(&plan)?;
        report_skipped(&report, &output)?;
        output.document(&report.config)?;
        return Ok(());
    }

    let target = &config.build.output;
    let report = builder.build_to(&plan, target)?;
    report_skipped(&report, &output)?;
    output.success(&format!(
        "Wrote {} ({} plugin{} applied)",
        target.display(),
        report.applied.len(),
        if report.applied.len() == 1 { "" } else { "s" }
    ))?;
    Ok(())
}

fn report_skipped(report: &BuildReport, output: &OutputManager) -> CliResult<()> {
    for skipped in &report.skipped {
        output.warning(&format!(
            "Skipped optional plugin '{}': {} not found at {}",
            skipped.plugin_id,
            skipped.artifact,
            skipped.path.display()
        ))?;
    }
    Ok(())
}
