//! Clap derive structures for the `scis` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scis -- call supply chain user, sync, work-item and query services
#[derive(Debug, Parser)]
#[command(
    name = "scis",
    version,
    about = "Call supply chain user management, sync, work-item and query services",
    long_about = "Authenticated REST calls against user management, process server\n\
        sync, work-item and InfoHub query endpoints.\n\n\
        Response bodies are printed as received. Transport failures on most\n\
        commands are reported as an {\"error\": ...} envelope on stdout.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SCIS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(long, short = 'p', env = "SCIS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SCIS_OUTPUT",
        default_value = "raw",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Response body exactly as received
    Raw,
    /// Indented JSON when the body parses, otherwise raw
    Pretty,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Request a CSRF token
    Token(TokenArgs),

    /// Add, update and look up users
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Synchronize users and groups into the process server
    Sync(SyncArgs),

    /// Create and update work items
    #[command(alias = "wi")]
    WorkItems(WorkItemsArgs),

    /// Run an InfoHub query
    #[command(alias = "q")]
    Query(QueryArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Request body, inline or from a file (`-` reads stdin).
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// JSON payload
    #[arg(long, short = 'd', conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read the payload from a file, or `-` for stdin
    #[arg(long, short = 'f')]
    pub data_file: Option<PathBuf>,
}

/// CSRF token value sent with user and sync calls.
#[derive(Debug, Args)]
pub struct TokenOpt {
    /// CSRF token obtained from `scis token`
    #[arg(long, short = 't', env = "SCIS_TOKEN", hide_env_values = true)]
    pub token: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOKEN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Which token endpoint to call
    pub family: TokenFamily,

    /// Requested token lifetime in seconds (defaults to the profile setting)
    #[arg(long, short = 'l')]
    pub lifetime: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TokenFamily {
    /// User management (`ibm_csrf_url`)
    Ibm,
    /// Process server (`bpm_csrf_url`)
    Bpm,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Create a user, skipping the welcome email and activating immediately
    Add {
        #[command(flatten)]
        token: TokenOpt,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Merge changes into an existing user
    Update {
        /// User ID
        id: String,

        #[command(flatten)]
        token: TokenOpt,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Search for a user, including details and groups
    Find {
        /// User ID or search term
        id: String,

        #[command(flatten)]
        token: TokenOpt,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYNC
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub command: SyncCommand,
}

#[derive(Debug, Subcommand)]
pub enum SyncCommand {
    /// Sync users into the process server database
    Users {
        #[command(flatten)]
        token: TokenOpt,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Sync groups and their members
    Groups {
        #[command(flatten)]
        token: TokenOpt,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Fetch the result of a previous sync
    Result {
        #[command(flatten)]
        token: TokenOpt,

        /// Status URL (defaults to the profile's `users_sync_url`)
        #[arg(long)]
        url: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WORK ITEMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WorkItemsArgs {
    #[command(subcommand)]
    pub command: WorkItemsCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkItemsCommand {
    /// Create a work item
    Create {
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Apply a partial update to a work item
    Update {
        /// Work item ID
        id: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUERY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Tenant to query (defaults to the profile's tenant_id, then client_id)
    #[arg(long)]
    pub tenant: Option<String>,

    #[command(flatten)]
    pub payload: PayloadArgs,
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
    /// Print the config file location
    Path,

    /// Display the resolved configuration with secrets redacted
    Show,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
