use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{metrics::GenerationStats, options::ConversionOptions, orchestrator::Orchestrator},
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

const OUTPUT_SUFFIX: &str = "schemas.ts";

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub verbose: bool,
  pub quiet: bool,
  pub only: Vec<String>,
  pub(crate) options: ConversionOptions,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      only,
      export_schemas,
      export_types,
      implicit_required,
      with_description,
      with_docs,
      no_default_values,
      complexity_threshold,
      all_readonly,
      strict_objects,
      additional_props_default_value,
      export_all_named_schemas,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }

    let only = only.unwrap_or_default();
    let output = output.unwrap_or_else(|| default_output_path(&input));

    let options = ConversionOptions::builder()
      .should_export_all_schemas(export_schemas || only.is_empty())
      .should_export_all_types(export_types)
      .with_implicit_required_props(implicit_required)
      .with_default_values(!no_default_values)
      .with_docs(with_docs)
      .with_description(with_description)
      .complexity_threshold(complexity_threshold)
      .all_readonly(all_readonly)
      .strict_objects(strict_objects)
      .additional_properties_default_value(additional_props_default_value)
      .export_all_named_schemas(export_all_named_schemas)
      .build();

    Ok(Self {
      input,
      output,
      verbose,
      quiet,
      only,
      options,
    })
  }

  async fn create_orchestrator(&self) -> anyhow::Result<Orchestrator> {
    let document = SpecLoader::open(&self.input).await?.parse()?;
    Ok(Orchestrator::new(document, self.options.clone(), self.only.clone()))
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(&self.output, code)
      .await
      .with_context(|| format!("failed to write {}", self.output.display()))?;
    Ok(())
  }
}

/// `api.yaml` becomes `api.schemas.ts` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
  let stem = input.file_stem().map_or_else(|| "openapi".into(), |stem| stem.to_string_lossy());
  input.with_file_name(format!("{stem}.{OUTPUT_SUFFIX}"))
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI document from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    let message = if self.config.only.is_empty() {
      "Generating Zod validators...".to_string()
    } else {
      format!("Generating Zod validators for {}...", self.config.only.join(", "))
    };
    self.info(&message.with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Schemas generated:", stats.schemas_generated.to_string());
    self.stat("Types generated:", stats.types_generated.to_string());
    if stats.circular_schemas > 0 {
      self.stat("Circular schemas:", stats.circular_schemas.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_complex_schemas(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_complex_schemas(&self, stats: &GenerationStats) {
    if stats.complex_schemas.is_empty() || !self.config.verbose {
      return;
    }

    self.stat("Complex schemas:", stats.complex_schemas.len().to_string());
    for (name, score) in &stats.complex_schemas {
      println!(
        "              {} {}",
        name.as_str().with(self.colors.accent()),
        format!("(score {score})").with(self.colors.info())
      );
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || !self.config.verbose {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated Zod validators".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let orchestrator = config.create_orchestrator().await?;

  logger.log_generating();
  let source_path = config.input.display().to_string();
  let (code, stats) = orchestrator.generate_with_header(&source_path)?;
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(code).await?;

  logger.log_success();
  Ok(())
}
