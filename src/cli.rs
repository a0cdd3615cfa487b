// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line interface definitions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "study-admin", version, about = "Research study administration client")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the access token
    Login {
        #[arg(long, short)]
        username: String,
        /// Password; prefer setting STUDY_ADMIN_PASSWORD so it stays out of argv
        #[arg(long, short, env = "STUDY_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Show whether a session is active
    Status,
    /// Resolve a client route through the authentication guard
    Open { path: String },
    #[command(subcommand)]
    Participants(ParticipantCommand),
    /// Message templates
    #[command(subcommand)]
    Content(ContentCommand),
    /// SMS history
    #[command(subcommand)]
    Messages(MessageCommand),
    #[command(subcommand)]
    Fitbit(FitbitCommand),
}

#[derive(Debug, Args)]
pub struct Page {
    #[arg(long)]
    pub skip: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum ParticipantCommand {
    List {
        #[command(flatten)]
        page: Page,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        study_group: Option<String>,
    },
    Get {
        id: i64,
    },
    /// Look up by study PID
    ByPid {
        pid: String,
    },
    Create {
        #[arg(long)]
        pid: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        study_group: String,
        #[arg(long)]
        friendly_name: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// HH:MM[:SS]
        #[arg(long)]
        window_start: Option<NaiveTime>,
        #[arg(long)]
        window_end: Option<NaiveTime>,
        /// Minutes from UTC
        #[arg(long, allow_hyphen_values = true)]
        timezone_offset: Option<i32>,
        /// Create the participant inactive
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        pid: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        study_group: Option<String>,
        #[arg(long)]
        friendly_name: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        window_start: Option<NaiveTime>,
        #[arg(long)]
        window_end: Option<NaiveTime>,
        #[arg(long, allow_hyphen_values = true)]
        timezone_offset: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
    /// Flag a participant for Fitbit registration
    RequestFitbit {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    List {
        #[command(flatten)]
        page: Page,
        #[arg(long)]
        bucket: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        active: Option<bool>,
    },
    Update {
        id: i64,
        #[arg(long)]
        bucket: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
    /// Distinct bucket names
    Buckets,
}

#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    History {
        #[command(flatten)]
        page: Page,
        #[arg(long)]
        participant_id: Option<i64>,
        #[arg(long)]
        pid: Option<String>,
        /// RFC 3339 timestamp
        #[arg(long)]
        start_date: Option<DateTime<Utc>>,
        #[arg(long)]
        end_date: Option<DateTime<Utc>>,
        #[arg(long)]
        status: Option<String>,
    },
    Stats {
        #[arg(long)]
        start_date: Option<DateTime<Utc>>,
        #[arg(long)]
        end_date: Option<DateTime<Utc>>,
    },
    WindowTimes,
    /// Resend a failed message
    Resend {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum FitbitCommand {
    /// List stored Fitbit tokens
    Tokens,
    /// Request Fitbit registration for a participant
    Register {
        participant_id: i64,
    },
    /// Trigger a data fetch for one participant, or all
    FetchData {
        #[arg(long)]
        participant_id: Option<i64>,
    },
    /// Register tokens manually
    Auth {
        #[arg(long)]
        participant_id: i64,
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        refresh_token: String,
        /// ISO 8601 expiry
        #[arg(long)]
        expires_at: String,
    },
    /// Export collected data to Dropbox
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_password_from_env() {
        std::env::set_var("STUDY_ADMIN_PASSWORD", "from-env");

        let cli = Cli::try_parse_from(["study-admin", "login", "-u", "researcher"])
            .expect("password should come from the environment");
        match cli.command {
            Command::Login { username, password } => {
                assert_eq!(username, "researcher");
                assert_eq!(password, "from-env");
            }
            other => panic!("unexpected command {:?}", other),
        }

        // An explicit flag still wins
        let cli = Cli::try_parse_from(["study-admin", "login", "-u", "r", "-p", "flag"]).unwrap();
        assert!(matches!(cli.command, Command::Login { password, .. } if password == "flag"));

        std::env::remove_var("STUDY_ADMIN_PASSWORD");
        assert!(Cli::try_parse_from(["study-admin", "login", "-u", "r"]).is_err());
    }
}
