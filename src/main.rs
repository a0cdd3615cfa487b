// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Study-Admin command-line client
//!
//! Drives the study administration API from the terminal: sign in, manage
//! participants and message templates, inspect SMS history, and trigger
//! Fitbit/Dropbox jobs.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Command, ContentCommand, FitbitCommand, MessageCommand, ParticipantCommand};
use serde::Serialize;
use study_admin_client::{
    config::Config,
    models::{
        FitbitAuthRequest, LoginCredentials, MessageContentCreate, MessageContentQuery,
        MessageContentUpdate, MessageQuery, MessageStatsQuery, ParticipantCreate,
        ParticipantQuery, ParticipantUpdate,
    },
    router::Route,
    stores::auth::LOGIN_FAILED,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(api = %config.api_base_url, "Starting study-admin");

    let mut app = AppState::bootstrap(config).context("Failed to initialize client")?;
    run(&mut app, cli.command).await
}

async fn run(app: &mut AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            app.router.navigate(Route::Login);
            let credentials = LoginCredentials::new(username, password);
            match app.auth.login(&credentials).await {
                Some(token) => {
                    app.router.navigate(Route::Home);
                    print_json(&serde_json::json!({ "token_type": token.token_type }))
                }
                None => bail!(app
                    .auth
                    .error()
                    .unwrap_or(LOGIN_FAILED)
                    .to_string()),
            }
        }
        Command::Logout => {
            app.auth.logout();
            print_json(&serde_json::json!({ "logged_in": false }))
        }
        Command::Status => print_json(&serde_json::json!({
            "logged_in": app.auth.is_logged_in(),
            "api": app.config.api_base_url,
        })),
        Command::Open { path } => {
            let route = app.router.push(&path)?;
            print_json(&serde_json::json!({ "route": route.name(), "path": route.path() }))
        }
        Command::Participants(cmd) => {
            enter(app, Route::Participants)?;
            participants(app, cmd).await
        }
        Command::Content(cmd) => {
            enter(app, Route::Messages)?;
            content(app, cmd).await
        }
        Command::Messages(cmd) => {
            enter(app, Route::Messages)?;
            messages(app, cmd).await
        }
        Command::Fitbit(cmd) => {
            enter(app, Route::Fitbit)?;
            fitbit(app, cmd).await
        }
    }
}

/// Navigate to the route owning a command; refuse if the guard bounces us.
fn enter(app: &AppState, route: Route) -> anyhow::Result<()> {
    if app.router.navigate(route) != route {
        bail!("Not logged in; run `study-admin login` first");
    }
    Ok(())
}

async fn participants(app: &mut AppState, cmd: ParticipantCommand) -> anyhow::Result<()> {
    let store = &mut app.participants;
    match cmd {
        ParticipantCommand::List {
            page,
            active,
            study_group,
        } => {
            let query = ParticipantQuery {
                skip: page.skip,
                limit: page.limit,
                active,
                study_group,
            };
            let participants = store.fetch_participants(&query).await.to_vec();
            read_result(store.error(), &participants)
        }
        ParticipantCommand::Get { id } => {
            let participant = store.get_participant(id).await;
            read_result(store.error(), &participant)
        }
        ParticipantCommand::ByPid { pid } => {
            let participant = store.get_participant_by_pid(&pid).await;
            read_result(store.error(), &participant)
        }
        ParticipantCommand::Create {
            pid,
            phone,
            study_group,
            friendly_name,
            start_date,
            window_start,
            window_end,
            timezone_offset,
            inactive,
        } => {
            let body = ParticipantCreate {
                friendly_name,
                start_date,
                sms_window_start: window_start,
                sms_window_end: window_end,
                timezone_offset,
                active: !inactive,
                ..ParticipantCreate::new(pid, phone, study_group)
            };
            print_json(&store.create_participant(&body).await?)
        }
        ParticipantCommand::Update {
            id,
            pid,
            phone,
            study_group,
            friendly_name,
            start_date,
            window_start,
            window_end,
            timezone_offset,
            active,
        } => {
            let body = ParticipantUpdate {
                pid,
                friendly_name,
                phone_number: phone,
                study_group,
                start_date,
                sms_window_start: window_start,
                sms_window_end: window_end,
                active,
                timezone_offset,
                ..Default::default()
            };
            print_json(&store.update_participant(id, &body).await?)
        }
        ParticipantCommand::Delete { id } => {
            store.delete_participant(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        ParticipantCommand::RequestFitbit { id } => {
            print_json(&store.request_fitbit_registration(id).await?)
        }
    }
}

async fn content(app: &mut AppState, cmd: ContentCommand) -> anyhow::Result<()> {
    let store = &mut app.message_content;
    match cmd {
        ContentCommand::List {
            page,
            bucket,
            active,
        } => {
            let query = MessageContentQuery {
                skip: page.skip,
                limit: page.limit,
                bucket,
                active,
            };
            let contents = store.fetch_message_contents(&query).await.to_vec();
            read_result(store.error(), &contents)
        }
        ContentCommand::Get { id } => {
            let content = store.get_message_content(id).await;
            read_result(store.error(), &content)
        }
        ContentCommand::Create {
            bucket,
            content,
            active,
        } => {
            let body = MessageContentCreate {
                content,
                bucket,
                active,
            };
            print_json(&store.create_message_content(&body).await?)
        }
        ContentCommand::Update {
            id,
            bucket,
            content,
            active,
        } => {
            let body = MessageContentUpdate {
                content,
                bucket,
                active,
            };
            print_json(&store.update_message_content(id, &body).await?)
        }
        ContentCommand::Delete { id } => {
            store.delete_message_content(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        ContentCommand::Buckets => {
            let buckets = store.fetch_unique_buckets().await.to_vec();
            read_result(store.error(), &buckets)
        }
    }
}

async fn messages(app: &mut AppState, cmd: MessageCommand) -> anyhow::Result<()> {
    let store = &mut app.messages;
    match cmd {
        MessageCommand::History {
            page,
            participant_id,
            pid,
            start_date,
            end_date,
            status,
        } => {
            let query = MessageQuery {
                skip: page.skip,
                limit: page.limit,
                participant_id,
                pid,
                start_date,
                end_date,
                status,
            };
            let messages = store.fetch_messages(&query).await.to_vec();
            read_result(
                store.error(),
                &serde_json::json!({
                    "messages": messages,
                    "estimated_total": store.total_count(),
                }),
            )
        }
        MessageCommand::Stats {
            start_date,
            end_date,
        } => {
            let query = MessageStatsQuery {
                start_date,
                end_date,
            };
            let stats = store.fetch_message_stats(&query).await;
            read_result(store.error(), &stats)
        }
        MessageCommand::WindowTimes => {
            let times = store.fetch_sms_window_times().await;
            read_result(store.error(), &times)
        }
        MessageCommand::Resend { id } => print_json(&store.resend_message(id).await?),
    }
}

async fn fitbit(app: &mut AppState, cmd: FitbitCommand) -> anyhow::Result<()> {
    let store = &mut app.fitbit;
    match cmd {
        FitbitCommand::Tokens => {
            let tokens = store.fetch_tokens().await.to_vec();
            read_result(store.error(), &tokens)
        }
        FitbitCommand::Register { participant_id } => {
            print_json(&store.request_registration(participant_id).await?)
        }
        FitbitCommand::FetchData { participant_id } => {
            print_json(&store.trigger_data_fetch(participant_id).await?)
        }
        FitbitCommand::Auth {
            participant_id,
            access_token,
            refresh_token,
            expires_at,
        } => {
            let body = FitbitAuthRequest {
                participant_id,
                access_token,
                refresh_token,
                expires_at,
            };
            print_json(&store.create_manual_auth(&body).await?)
        }
        FitbitCommand::Export => print_json(&store.export_data().await?),
    }
}

/// Read operations never fail outright; surface the store's error instead.
fn read_result<T: Serialize>(error: Option<&str>, value: &T) -> anyhow::Result<()> {
    if let Some(error) = error {
        bail!(error.to_string());
    }
    print_json(value)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize logging to stderr, plain text or flattened JSON.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("study_admin_client=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
