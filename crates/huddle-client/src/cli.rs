//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use huddle_core::{Role, Visibility};

/// huddle - manage meetings from the command line
#[derive(Debug, Parser)]
#[command(name = "huddle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "HUDDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Base URL of the platform (overrides `api.root`)
    #[arg(long, env = "HUDDLE_API_ROOT")]
    pub api_root: Option<String>,

    /// Request timeout in seconds (overrides `api.timeout`)
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands that talk to the meeting API.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Create, inspect and run meetings
    Meeting {
        #[command(subcommand)]
        action: MeetingAction,
    },

    /// List and change meeting members
    Members {
        #[command(subcommand)]
        action: MembersAction,
    },

    /// Browse a principal's meeting library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Manage meeting recordings
    Recording {
        #[command(subcommand)]
        action: RecordingAction,
    },

    /// Manage email invitations
    Invitations {
        #[command(subcommand)]
        action: InvitationsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum MeetingAction {
    /// Show a meeting's profile
    Get {
        /// Meeting id (`d:<tenant>:<resource>`)
        id: String,
    },

    /// Create a meeting
    Create {
        /// Display name
        topic: String,

        #[arg(long)]
        description: Option<String>,

        /// Record sessions
        #[arg(long)]
        record: bool,

        /// Every participant joins as moderator
        #[arg(long)]
        all_moderators: bool,

        /// Participants wait until a moderator joins
        #[arg(long)]
        wait_moderator: bool,

        /// public, loggedin or private
        #[arg(long)]
        visibility: Option<Visibility>,

        /// Principal to add as manager (can be repeated)
        #[arg(long = "manager", action = clap::ArgAction::Append)]
        managers: Vec<String>,

        /// Principal to add as member (can be repeated)
        #[arg(long = "member", action = clap::ArgAction::Append)]
        members: Vec<String>,
    },

    /// Change fields of a meeting; only the given fields are sent
    Update {
        id: String,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        record: Option<bool>,

        #[arg(long)]
        all_moderators: Option<bool>,

        #[arg(long)]
        wait_moderator: Option<bool>,

        #[arg(long)]
        visibility: Option<Visibility>,
    },

    /// Start (or join) a meeting and print the join URL
    Start { id: String },

    /// End a running meeting
    End { id: String },

    /// Delete a meeting
    Delete { id: String },

    /// Show conference-server details about a meeting
    Info { id: String },
}

#[derive(Debug, Subcommand)]
pub enum MembersAction {
    /// List members
    List {
        id: String,

        /// Continuation token from a previous page
        #[arg(long)]
        start: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Follow continuation tokens and print every member
        #[arg(long, conflicts_with = "start")]
        all: bool,
    },

    /// Change roles: `<principal>=manager`, `<principal>=member` or `<principal>=remove`
    Set {
        id: String,

        #[arg(required = true, value_parser = parse_member_change)]
        changes: Vec<(String, Option<Role>)>,
    },

    /// Share a meeting with principals
    Share {
        id: String,

        #[arg(required = true)]
        principals: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum LibraryAction {
    /// List the meetings in a principal's library
    List {
        principal: String,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Remove a meeting from a principal's library
    Remove { principal: String, meeting: String },
}

#[derive(Debug, Subcommand)]
pub enum RecordingAction {
    /// Show a recording
    Get { id: String },

    /// Make a recording visible to the meeting's audience
    Publish { id: String },

    /// Hide a recording
    Unpublish { id: String },

    /// Delete a recording
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum InvitationsAction {
    /// List outstanding invitations
    List { id: String },

    /// Send an invitation email again
    Resend { id: String, email: String },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the current configuration
    Dump,

    /// Validate the configuration
    Validate,

    /// Show the configuration file path
    Path,
}

/// Parses `principal=role`, where role `remove` drops the principal.
pub fn parse_member_change(value: &str) -> Result<(String, Option<Role>), String> {
    let (principal, role) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected <principal>=<role>, got `{}`", value))?;
    if principal.is_empty() {
        return Err(format!("missing principal in `{}`", value));
    }
    let role = match role {
        "remove" => None,
        other => Some(other.parse::<Role>()?),
    };
    Ok((principal.to_string(), role))
}
