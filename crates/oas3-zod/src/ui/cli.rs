use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-zod")]
#[command(author, version, about = "OpenAPI to Zod validator generator", styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate Zod validators from an OpenAPI document
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the OpenAPI document (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the TypeScript module is written (defaults to <input>.schemas.ts)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Translate only these component schemas and what they reference (comma-separated names)
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Export every component schema, even when --only is given
  #[arg(long, default_value_t = false)]
  pub export_schemas: bool,

  /// Emit a static type declaration for every schema, not only circular ones
  #[arg(long, default_value_t = false)]
  pub export_types: bool,

  /// Treat properties as required when an object has no `required` array
  #[arg(long, default_value_t = false)]
  pub implicit_required: bool,

  /// Append `.describe(...)` with each schema's description
  #[arg(long, default_value_t = false)]
  pub with_description: bool,

  /// Accepted for compatibility; has no effect on the output
  #[arg(long, default_value_t = false)]
  pub with_docs: bool,

  /// Do not emit `.default(...)` calls
  #[arg(long, default_value_t = false)]
  pub no_default_values: bool,

  /// Complexity score at which a schema is reported as complex (-1 disables)
  #[arg(long, value_name = "N", default_value_t = 4, allow_negative_numbers = true)]
  pub complexity_threshold: i64,

  /// Make every object and array readonly
  #[arg(long, default_value_t = false)]
  pub all_readonly: bool,

  /// Reject unknown keys on every object
  #[arg(long, default_value_t = false)]
  pub strict_objects: bool,

  /// Whether objects without `additionalProperties` accept unknown keys
  #[arg(long, value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
  pub additional_props_default_value: bool,

  /// Accepted for compatibility; has no effect on the output
  #[arg(long, default_value_t = false)]
  pub export_all_named_schemas: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all component schemas with their identifiers and dependencies
  Schemas {
    /// Path to the OpenAPI document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
