use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::Password;
use dotenvy::dotenv;
use squadgate_auth::{Role, TokenService};
use squadgate_cli::{describe_token, hash, users_file_entry};
use squadgate_config::JwtConfig;

#[derive(Parser)]
#[command(name = "squadgate-cli")]
#[command(about = "SquadGate CLI - Operator tools for the gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password for the identity file
    HashPassword {
        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Print a complete identity file entry for this email
        #[arg(short = 'e', long, requires = "role")]
        email: Option<String>,

        /// Role for the identity file entry (coach, player, admin)
        #[arg(short = 'r', long, requires = "email")]
        role: Option<Role>,
    },
    /// Verify a token with JWT_SECRET and show its claims
    InspectToken {
        /// The bearer token, without the "Bearer " prefix
        token: String,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword {
            password,
            email,
            role,
        } => handle_hash_password(password, email, role),
        Commands::InspectToken { token } => handle_inspect_token(&token),
    }
}

fn handle_hash_password(password: Option<String>, email: Option<String>, role: Option<Role>) {
    let password = match password {
        Some(password) => password,
        None => match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        },
    };

    let password_hash = match hash(&password) {
        Ok(password_hash) => password_hash,
        Err(e) => {
            eprintln!("❌ Error hashing password: {}", e);
            std::process::exit(1);
        }
    };

    match (email, role) {
        (Some(email), Some(role)) => {
            println!("{}", users_file_entry(&email, &password_hash, role));
        }
        _ => println!("{}", password_hash),
    }
}

fn handle_inspect_token(token: &str) {
    let config = match JwtConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let tokens = TokenService::new(&config);
    match describe_token(&tokens, token, Utc::now()) {
        Ok(summary) => println!("✅ {}", summary),
        Err(verdict) => {
            eprintln!("❌ {}", verdict);
            std::process::exit(1);
        }
    }
}
