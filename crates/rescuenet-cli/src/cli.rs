//! Clap derive structures for the `rescuenet` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use rescuenet_core::{IncidentType, ResourceStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rescuenet -- emergency incident dispatch from the command line
#[derive(Debug, Parser)]
#[command(
    name = "rescuenet",
    version,
    about = "Report, triage, and track emergency incidents",
    long_about = "An emergency-operations console: report incidents, work their\n\
        response checklists, and keep an eye on nearby resources and the\n\
        overall community stress level.\n\n\
        State persists per data directory, so repeated invocations operate\n\
        on the same incident log.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file (default: platform config dir)
    #[arg(long, env = "RESCUENET_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for persisted state (default: platform data dir)
    #[arg(long, env = "RESCUENET_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RESCUENET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON (scripting)
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report a new incident
    #[command(alias = "r")]
    Report(ReportArgs),

    /// List incidents
    #[command(alias = "ls")]
    Incidents(IncidentsArgs),

    /// Mark an incident resolved
    Resolve {
        /// Incident id
        id: String,
    },

    /// Toggle a response checklist item
    Check {
        /// Incident id
        incident: String,

        /// Checklist item id, or its 1-based index within the incident
        item: String,
    },

    /// Manage the resource roster
    #[command(alias = "res")]
    Resources(ResourcesArgs),

    /// Stress level and incident distribution overview
    Status,

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Incident category
    #[arg(long = "type", short = 't', value_enum)]
    pub kind: ReportKind,

    /// What happened
    #[arg(long, short = 'd')]
    pub description: String,

    /// A photo of the scene is attached
    #[arg(long)]
    pub photo: bool,

    /// A video of the scene is attached
    #[arg(long)]
    pub video: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportKind {
    Fire,
    Medical,
    Accident,
    Flood,
    Crime,
}

impl From<ReportKind> for IncidentType {
    fn from(k: ReportKind) -> Self {
        match k {
            ReportKind::Fire => IncidentType::Fire,
            ReportKind::Medical => IncidentType::Medical,
            ReportKind::Accident => IncidentType::Accident,
            ReportKind::Flood => IncidentType::Flood,
            ReportKind::Crime => IncidentType::Crime,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INCIDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IncidentsArgs {
    /// Only show active (unresolved) incidents
    #[arg(long, short = 'a')]
    pub active: bool,

    /// Show one incident in detail, including its checklist
    #[arg(long)]
    pub id: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ResourcesArgs {
    #[command(subcommand)]
    pub command: ResourcesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourcesCommand {
    /// List the resource roster
    #[command(alias = "ls")]
    List,

    /// Re-fetch nearby services from the directory
    Refresh,

    /// Update a resource's status or load
    Update {
        /// Resource id
        id: String,

        /// New availability status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// New capacity
        #[arg(long)]
        capacity: Option<u32>,

        /// New current load (must not exceed capacity)
        #[arg(long)]
        load: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Available,
    Busy,
    Offline,
}

impl From<StatusArg> for ResourceStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Available => ResourceStatus::Available,
            StatusArg::Busy => ResourceStatus::Busy,
            StatusArg::Offline => ResourceStatus::Offline,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the resolved configuration
    Show,
}
