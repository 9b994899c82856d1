//! # Seed Data Generator
//!
//! Populates the database with sample departments and sellers, then runs the
//! seller queries against it.
//!
//! ## Usage
//! ```bash
//! # Uses SELLERS_DB_PATH (default ./sellers.db)
//! cargo run -p sellers-db --bin seed
//!
//! # Specify database path and dump the seller list as JSON
//! cargo run -p sellers-db --bin seed -- --db ./data/sellers.db --json
//! ```

use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use sellers_core::{Department, Seller};
use sellers_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Sample departments, inserted when the table is empty.
const DEPARTMENTS: &[&str] = &["Computers", "Electronics", "Fashion", "Books"];

/// (name, email, birth date, base salary, index into DEPARTMENTS)
const SELLERS: &[(&str, &str, (i32, u32, u32), f64, usize)] = &[
    ("Bob Brown", "bob@gmail.com", (1998, 4, 21), 1000.0, 0),
    ("Maria Green", "maria@gmail.com", (1979, 12, 31), 3500.0, 1),
    ("Alex Grey", "alex@gmail.com", (1988, 1, 15), 2200.0, 0),
    ("Martha Red", "martha@gmail.com", (1993, 11, 30), 3000.0, 3),
    ("Donald Blue", "donald@gmail.com", (2000, 1, 9), 4000.0, 2),
    ("Alex Pink", "alexpink@gmail.com", (1997, 3, 4), 3000.0, 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if args.help {
        print_help();
        return Ok(());
    }

    let mut config = DbConfig::from_env()?;
    if let Some(path) = args.database_path {
        config.database_path = path;
    }
    let dump_json = args.dump_json;

    let db = Database::new(config).await?;

    let departments = ensure_departments(&db).await?;

    let existing = db.sellers().count().await?;
    if existing > 0 {
        info!(existing, "Sellers already present, skipping insert");
    } else {
        for (name, email, (y, m, d), salary, dept_idx) in SELLERS {
            let birth_date = NaiveDate::from_ymd_opt(*y, *m, *d)
                .ok_or_else(|| format!("invalid birth date for {}", name))?;

            let mut seller = Seller::new(
                *name,
                *email,
                birth_date,
                *salary,
                departments[*dept_idx].clone(),
            );

            if let Err(e) = db.sellers().insert(&mut seller).await {
                warn!(name = %name, error = %e, "Failed to insert seller");
                continue;
            }

            println!("Inserted! New id = {}", seller.id.unwrap_or_default());
        }
    }

    println!();
    println!("=== find_by_id ===");
    let all = db.sellers().find_all().await?;
    if let Some(first_id) = all.iter().filter_map(|s| s.id).min() {
        match db.sellers().find_by_id(first_id).await? {
            Some(seller) => print_seller(&seller),
            None => println!("No seller with id {}", first_id),
        }
    }

    println!();
    println!("=== find_by_department ===");
    let filter = &departments[0];
    for seller in db.sellers().find_by_department(filter).await? {
        print_seller(&seller);
    }

    println!();
    println!("=== find_all ===");
    for seller in &all {
        print_seller(seller);
    }

    if dump_json {
        println!();
        println!("{}", serde_json::to_string_pretty(&all)?);
    }

    db.close().await;
    Ok(())
}

/// Command-line options.
#[derive(Debug, Default, PartialEq)]
struct SeedArgs {
    database_path: Option<PathBuf>,
    dump_json: bool,
    help: bool,
}

/// Parses the arguments after the program name.
///
/// Unknown arguments are logged and skipped; `--db` without a path is an error.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<SeedArgs, String> {
    let mut parsed = SeedArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => match args.next() {
                Some(path) if !path.starts_with('-') => parsed.database_path = Some(path.into()),
                _ => return Err(format!("{} requires a database path", arg)),
            },
            "--json" | "-j" => parsed.dump_json = true,
            "--help" | "-h" => parsed.help = true,
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
    }

    Ok(parsed)
}

fn print_help() {
    println!("Sellers Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: $SELLERS_DB_PATH or ./sellers.db)");
    println!("  -j, --json         Print all sellers as JSON");
    println!("  -h, --help         Show this help message");
}

/// Returns the stored departments in DEPARTMENTS order, inserting any that
/// are missing.
async fn ensure_departments(db: &Database) -> Result<Vec<Department>, Box<dyn std::error::Error>> {
    let stored = db.departments().find_all().await?;
    let mut result = Vec::with_capacity(DEPARTMENTS.len());

    for name in DEPARTMENTS {
        match stored.iter().find(|d| d.name == *name) {
            Some(department) => result.push(department.clone()),
            None => {
                let mut department = Department::new(*name);
                db.departments().insert(&mut department).await?;
                info!(id = ?department.id, name = %name, "Department created");
                result.push(department);
            }
        }
    }

    Ok(result)
}

fn print_seller(seller: &Seller) {
    println!(
        "Seller[id={}, name={}, email={}, birth_date={}, base_salary={:.2}, department=Department[id={}, name={}]]",
        seller.id.unwrap_or_default(),
        seller.name,
        seller.email,
        seller.birth_date,
        seller.base_salary,
        seller.department.id.unwrap_or_default(),
        seller.department.name,
    );
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (one line per query)
/// - Default: `info,sellers=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sellers=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
