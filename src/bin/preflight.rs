use produtos_api::app::statements;
use produtos_api::{AppConfig, PgExecutor, QueryExecutor};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--init-schema-if-missing]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL (or DB_HOST, DB_USER, DB_PASSWORD, DB_DATABASE)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let init_schema_if_missing = args.iter().any(|a| a == "--init-schema-if-missing");

    // Force-read config (nice error messages if missing)
    let config = AppConfig::from_env()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  DB_MAX_CONNECTIONS={}", config.max_connections);
    println!("  ERROR_MAPPING={:?}", config.error_mapping);
    println!("  BOOTSTRAP_SCHEMA={}", config.bootstrap_schema);

    let executor = PgExecutor::connect(&config.database_url, 1)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    executor
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database ping failed: {}", e))?;
    println!("  Database reachable.");

    if executor.table_exists().await? {
        println!("  produtos table exists.");
    } else if init_schema_if_missing {
        println!("  produtos table missing -> creating it...");
        executor.ensure_schema().await?;
        println!("  produtos table created.");
    } else {
        return Err(anyhow::anyhow!(
            "produtos table does not exist. Re-run with --init-schema-if-missing"
        ));
    }

    let count = executor
        .query(&statements::count())
        .await
        .map_err(|e| anyhow::anyhow!("Count query failed: {}", e))?;
    let total = count
        .first()
        .and_then(|row| row.get("total"))
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    println!("  Products stored: {}", total);

    println!("> Preflight OK.");
    Ok(())
}
