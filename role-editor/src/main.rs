use clap::{Parser, Subcommand};
use role_editor::config::EditorConfig;
use role_editor::report::{render_errors, render_session};
use role_editor::services::{AdminApiClient, EditorError, RoleEditor, SubmitOutcome, TracingNotifier};
use service_core::error::AppError;
use service_core::observability::init_tracing;
use std::sync::Arc;

/// Inspect and edit a users-permissions role through the admin API.
#[derive(Debug, Parser)]
#[command(name = "role-editor", about = "Inspect and edit a users-permissions role", long_about = None)]
struct Cli {
    /// Id of the role to load
    role_id: u64,

    /// Open every permission section in the report
    #[arg(short, long)]
    expand: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Flip "select all" for a section and save the role.
    #[command(name = "select-all")]
    SelectAll {
        /// Plugin key (`api::address`) or display name (`Address`)
        section: String,
    },

    /// Show the route bound to an action.
    Route {
        /// Action identifier, e.g. `api::address.address.create`
        action: String,
    },
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = EditorConfig::load()?;
    init_tracing(
        &config.service.service_name,
        &config.service.log_level,
        config.service.otlp_endpoint(),
    )?;

    let store = Arc::new(AdminApiClient::new(&config.admin)?);
    let mut editor = RoleEditor::new(store, Arc::new(TracingNotifier), config.validation);
    editor.load(cli.role_id).await?;

    if cli.expand {
        editor.session_mut()?.tree.expand_all();
    }

    match cli.command {
        None => {}
        Some(Command::Route { action }) => {
            editor
                .session_mut()?
                .tree
                .select_action(&action)
                .map_err(EditorError::from)?;
        }
        Some(Command::SelectAll { section }) => {
            let tree = &mut editor.session_mut()?.tree;
            tree.toggle_section(&section).map_err(EditorError::from)?;
            if !tree.is_expanded(&section).map_err(EditorError::from)? {
                tree.toggle_expanded(&section).map_err(EditorError::from)?;
            }

            if let SubmitOutcome::Rejected(errors) = editor.submit().await? {
                return Err(AppError::BadRequest(anyhow::anyhow!(render_errors(&errors))));
            }
        }
    }

    println!("{}", render_session(editor.session()?));
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
