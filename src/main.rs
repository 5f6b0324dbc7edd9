use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tillbox::auth;
use tillbox::config::Config;
use tillbox::db::{create_pool, init_db, queries, AppState};
use tillbox::handlers;
use tillbox::models::{NewPayment, NewUser};

#[derive(Parser, Debug)]
#[command(name = "tillbox")]
#[command(about = "Account and payment ledger with signed webhook ingestion")]
struct Cli {
    /// Seed the database with dev data (a user, an admin, accounts, payments)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,
}

fn seed_dev_data(state: &AppState) {
    let mut conn = state.db.get().expect("Failed to get db connection for seeding");

    let count = queries::count_users(&conn).expect("Failed to count users");
    if count > 0 {
        tracing::info!("Users already exist, skipping seed");
        return;
    }

    let tx = conn.transaction().expect("Failed to start seed transaction");

    let password_hash = auth::hash_password("123456").expect("Failed to hash seed password");

    let user = queries::create_user(
        &tx,
        &NewUser {
            email: "user1@example.com".to_string(),
            password_hash: password_hash.clone(),
            display_name: "Dark".to_string(),
            is_admin: false,
        },
    )
    .expect("Failed to create seed user");

    queries::create_user(
        &tx,
        &NewUser {
            email: "admin@example.com".to_string(),
            password_hash,
            display_name: "admin".to_string(),
            is_admin: true,
        },
    )
    .expect("Failed to create seed admin");

    let account1 = queries::create_account(&tx, user.id, 100.0).expect("Failed to create account");
    let account2 = queries::create_account(&tx, user.id, 250.5).expect("Failed to create account");

    queries::insert_payment(
        &tx,
        &NewPayment {
            transaction_id: "5eae174f-7cd0-472c-bd36-35660f00132b".to_string(),
            account_id: account1.id,
            user_id: user.id,
            amount: 25.0,
        },
    )
    .expect("Failed to create seed payment");

    queries::insert_payment(
        &tx,
        &NewPayment {
            transaction_id: "7eae174f-7cd0-472c-bd36-35660f00132b".to_string(),
            account_id: account2.id,
            user_id: user.id,
            amount: 50.0,
        },
    )
    .expect("Failed to create seed payment");

    tx.commit().expect("Failed to commit seed data");
    tracing::info!("Seeded dev data: users Dark/admin (password 123456)");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tillbox=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_path).expect("Failed to create database pool");

    {
        let conn = pool.get().expect("Failed to get db connection");
        init_db(&conn).expect("Failed to initialize schema");
    }

    let state = AppState {
        db: pool,
        config: config.clone(),
    };

    if cli.seed {
        if config.dev_mode {
            seed_dev_data(&state);
        } else {
            tracing::warn!("--seed ignored outside dev mode (set TILLBOX_ENV=dev)");
        }
    }

    let app = handlers::app(state).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("Tillbox server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    if cleanup_on_exit {
        let db_path = &config.database_path;
        if let Err(e) = std::fs::remove_file(db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        } else {
            tracing::info!("Removed {}", db_path);
        }
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
