use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use finsight::{
    BudgetEntry, BudgetMonth, Category, NewTransaction, create_transaction, initialize_db,
    save_budgets,
};

/// A utility for creating a test database for the REST API server of finsight.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();
    let this_month = BudgetMonth::from_date(today);

    println!("Creating test transactions...");
    let samples: [(&str, f64, i64, Category); 8] = [
        ("Supermarket", 84.3, 0, Category::Food),
        ("Bus pass", 45.0, 2, Category::Transportation),
        ("Power bill", 120.0, 5, Category::Utilities),
        ("Rent", 950.0, 7, Category::Housing),
        ("Cinema", 22.5, 12, Category::Entertainment),
        ("Pharmacy", 18.9, 20, Category::Healthcare),
        ("Cafe", 14.0, 35, Category::Food),
        ("Textbook", 60.0, 40, Category::Education),
    ];

    for (description, amount, days_ago, category) in samples {
        let date: Date = today - Duration::days(days_ago);
        create_transaction(
            NewTransaction::new(description, amount, date, category)?,
            &conn,
        )?;
    }

    println!("Creating test budgets...");
    let budgets = [
        (Category::Food, 300.0),
        (Category::Transportation, 60.0),
        (Category::Utilities, 100.0),
        (Category::Housing, 950.0),
        (Category::Savings, 0.0),
    ]
    .into_iter()
    .map(|(category, amount)| BudgetEntry::new(this_month, category, amount))
    .collect::<Result<Vec<_>, _>>()?;

    save_budgets(&budgets, &mut conn)?;

    println!("Success!");

    Ok(())
}
