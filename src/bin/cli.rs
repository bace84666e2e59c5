use anyhow::{Context, bail};
use bastion::cli::create_admin;
use bastion::modules::users::store::PgUserStore;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bastion-cli")]
#[command(about = "Bastion CLI - Administrative tools for Bastion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name of the admin
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(name, email, password).await,
    }
}

async fn handle_create_admin(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let Some(database_url) = std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty())
    else {
        bail!("DATABASE_URL must be set to create an admin");
    };
    let store = PgUserStore::connect(&database_url).await?;

    // Use provided values or prompt interactively
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let user = create_admin(&store, &name, &email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Error creating admin: {}", e))?;

    println!("\nAdmin created successfully!");
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);
    Ok(())
}
