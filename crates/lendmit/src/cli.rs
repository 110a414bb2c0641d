//! Clap derive structures for the `lendmit` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lendmit -- borrow and lend within the community from the command line
#[derive(Debug, Parser)]
#[command(
    name = "lendmit",
    version,
    about = "Borrow and lend within the LendMIT community",
    long_about = "Command-line client for LendMIT.\n\n\
        Sign up and verify an account, browse and remember listings,\n\
        and follow other members' postings.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "LENDMIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "LENDMIT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Account email (overrides profile)
    #[arg(long, short = 'e', env = "LENDMIT_EMAIL", global = true)]
    pub email: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LENDMIT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LENDMIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with the profile's credentials
    Login,

    /// Create an account and request a verification code
    Signup(SignupArgs),

    /// Submit an emailed verification code
    Verify(VerifyArgs),

    /// Request a fresh verification code
    ResendCode(ResendCodeArgs),

    /// Browse and remember listings
    #[command(alias = "ls")]
    Listings(ListingsArgs),

    /// Follow a member's postings
    Follow(FolloweeArgs),

    /// Stop following a member
    Unfollow(FolloweeArgs),

    /// List the members you follow
    Followees,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// First name for the new profile
    #[arg(long)]
    pub first_name: String,

    /// Last name for the new profile
    #[arg(long)]
    pub last_name: String,

    /// Password (prompted when omitted and not configured)
    #[arg(long, hide_env = true, env = "LENDMIT_SIGNUP_PASSWORD")]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// User id returned by signup
    #[arg(long)]
    pub user: String,

    /// Verification code from the email
    pub code: String,
}

#[derive(Debug, Args)]
pub struct ResendCodeArgs {
    /// User id returned by signup
    #[arg(long)]
    pub user: String,
}

// ── Listings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListingsArgs {
    #[command(subcommand)]
    pub command: ListingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListingsCommand {
    /// Your own listings
    Mine,

    /// Everyone's listings
    Feed,

    /// Look up a listing's intent
    Intent {
        /// Resource id
        resource_id: String,
    },

    /// Remember a listing you created in the local cache
    Remember {
        /// Resource id assigned by the server
        #[arg(long)]
        id: String,

        /// Item name
        #[arg(long)]
        name: String,

        /// Category (e.g. "Tools & Equipment")
        #[arg(long)]
        category: Option<String>,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },
}

// ── Following ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FolloweeArgs {
    /// Member id to follow or unfollow
    pub followee: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the resolved configuration
    Show,

    /// Interactive configuration wizard
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
