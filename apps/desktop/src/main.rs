use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ClientSettings, UserDirectory, DEFAULT_API_BASE_URL};
use shared::domain::UserId;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Command-line access to the remote user directory")]
struct Args {
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    #[arg(long, default_value = "warn")]
    log_filter: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print every user in the order the service returns them.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print the detail view for one user.
    Show { id: i64 },
    /// Delete one user on the server.
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_new(&args.log_filter)
        .with_context(|| format!("invalid log filter '{}'", args.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = ClientSettings::new(args.api_base_url, args.request_timeout_secs);
    let directory = settings
        .connect()
        .context("failed to configure user directory client")?;

    run(&directory, args.command).await
}

async fn run(directory: &dyn UserDirectory, command: Command) -> Result<()> {
    match command {
        Command::List { json } => {
            let users = directory.list_users().await.context("Failed to load users.")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                print!("{}", render::render_table(&users));
            }
        }
        Command::Show { id } => {
            let users = directory.list_users().await.context("Failed to load users.")?;
            let Some(user) = users.iter().find(|user| user.id == UserId(id)) else {
                bail!("user {id} not found");
            };
            print!("{}", render::render_detail(user));
        }
        Command::Delete { id } => {
            let user_id = UserId(id);
            match directory.delete_user(user_id).await {
                Ok(()) => println!("Deleted user {user_id}"),
                Err(err) if err.status().is_some() => {
                    return Err(err).context("Failed to delete user on server.");
                }
                Err(err) => return Err(err).context("Network error while deleting user."),
            }
        }
    }
    Ok(())
}
