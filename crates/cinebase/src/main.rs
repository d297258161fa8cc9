//! cinebase CLI entry point.

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinebase::cli::users::{UsersAction, UsersCommand};
use cinebase::cli::{Cli, Commands, OutputFormat};
use cinebase::output::{format_output, pretty};
use cinebase::Storage;
use cinebase_core::account::{User, UserForm};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinebase=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let storage = Storage::from_config(&cli.config()).await?;

    match cli.command {
        Commands::Init => {
            let users = storage.list_users().await?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "backend": storage.backend().to_string(),
                        "users": users.len(),
                    })
                ),
                OutputFormat::Pretty => println!(
                    "Storage ready\n  Backend: {}\n  Users: {}",
                    storage.backend(),
                    users.len()
                ),
            }
        }
        Commands::Login { username, password } => {
            let Some(user) = storage.login(&username, &password).await? else {
                bail!("Invalid credentials");
            };
            print_user(&user, cli.format, "Logged in");
        }
        Commands::Users(users_cmd) => run_users(&storage, users_cmd, cli.format).await?,
        Commands::Recover {
            username,
            new_password,
            confirm_password,
        } => {
            let user = storage
                .reset_password(&username, &new_password, &confirm_password)
                .await?;
            print_user(&user, cli.format, "Password updated");
        }
    }

    Ok(())
}

async fn run_users(storage: &Storage, cmd: UsersCommand, format: OutputFormat) -> Result<()> {
    let Some(me) = storage.login(&cmd.as_user, &cmd.password).await? else {
        bail!("Invalid administrator credentials");
    };
    if !me.role.is_admin() {
        bail!("User '{}' is not an administrator", me.username);
    }

    match cmd.action {
        UsersAction::List => {
            let users = storage.list_users().await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&users, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_users(&users)),
            }
        }
        UsersAction::Get { id } => {
            let Some(user) = storage.get_user_by_id(id).await? else {
                bail!("User {id} not found");
            };
            match format {
                OutputFormat::Json => println!("{}", format_output(&user, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_user(&user)),
            }
        }
        UsersAction::Delete { id } => {
            storage.delete_user(id).await?;
            println!("Deleted user {id}");
        }
        UsersAction::Create {
            name,
            username,
            password,
            role,
        } => {
            let form = UserForm {
                password,
                role: Some(role),
                ..UserForm::create(name, username)
            };
            let user = storage.save_user(&form).await?;
            print_user(&user, format, "Created");
        }
        UsersAction::Update {
            id,
            name,
            username,
            password,
            role,
        } => {
            let form = UserForm {
                name,
                username,
                password,
                role,
                ..UserForm::edit(id)
            };
            let user = storage.save_user(&form).await?;
            print_user(&user, format, "Updated");
        }
    }

    Ok(())
}

fn print_user(user: &User, format: OutputFormat, label: &str) {
    match format {
        OutputFormat::Json => println!("{}", format_output(user, format)),
        OutputFormat::Pretty => println!("{label}:\n{}", pretty::format_user(user)),
    }
}
