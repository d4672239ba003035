use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use todo_auth::create_access_token;
use todo_cli::seeder;
use todo_config::{DatabaseConfig, JwtConfig};
use todo_db::{PgPool, init_db_pool};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "todo-cli")]
#[command(about = "Todo CLI - Developer tools for the Todo API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a signed access token for a user
    IssueToken {
        /// User ID to put in the token subject (random when omitted)
        #[arg(short = 'u', long)]
        user_id: Option<Uuid>,
    },
    /// Insert fake todos for a user
    Seed {
        /// Owner of the seeded todos
        #[arg(short = 'u', long)]
        user_id: Uuid,

        /// Number of todos to create
        #[arg(short = 'c', long, default_value = "25")]
        count: usize,
    },
    /// Delete all todos of a user
    Clear {
        /// Owner whose todos are deleted
        #[arg(short = 'u', long)]
        user_id: Uuid,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken { user_id } => handle_issue_token(user_id),
        Commands::Seed { user_id, count } => {
            let pool = connect().await;
            handle_seed(&pool, user_id, count).await
        }
        Commands::Clear { user_id } => {
            let pool = connect().await;
            handle_clear(&pool, user_id).await
        }
    }
}

async fn connect() -> PgPool {
    let Some(config) = DatabaseConfig::from_env() else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_issue_token(user_id: Option<Uuid>) {
    let user_id = user_id.unwrap_or_else(Uuid::new_v4);
    let jwt_config = JwtConfig::from_env();

    match create_access_token(user_id, &jwt_config) {
        Ok(token) => {
            println!("✅ Access token issued");
            println!("   User ID: {}", user_id);
            println!("   Expires in: {}s", jwt_config.access_token_expiry);
            println!("\n{}", token);
        }
        Err(e) => {
            eprintln!("\n❌ Error issuing token: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, user_id: Uuid, count: usize) {
    match seeder::seed_todos(pool, user_id, count).await {
        Ok(inserted) => {
            println!("✅ Created {} todos", inserted);
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding todos: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear(pool: &PgPool, user_id: Uuid) {
    match seeder::clear_todos(pool, user_id).await {
        Ok(deleted) => {
            println!("✅ Cleared {} todos", deleted);
        }
        Err(e) => {
            eprintln!("\n❌ Error clearing todos: {}", e);
            std::process::exit(1);
        }
    }
}
