mod commands;

use anyhow::Context;
use commands::{content, user, CommandLine, Commands, ContentCommand, UserCommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renungan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = renungan_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    renungan_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Commands::User(command) => match command {
            UserCommand::Create {
                email,
                password,
                role,
                name,
            } => user::create(&pool, &email, &password, &role, name).await,
            UserCommand::Delete { email } => user::delete(&pool, &email).await,
            UserCommand::DeleteAll { yes } => user::delete_all(&pool, yes).await,
            UserCommand::ResetPassword { email, password } => {
                user::reset_password(&pool, &email, &password).await
            }
        },
        Commands::Content(command) => match command {
            ContentCommand::Seed => content::seed(&pool).await,
            ContentCommand::Import { file } => content::import(&pool, &file).await,
        },
    }
}
