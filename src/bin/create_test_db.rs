//! Creates a database populated with sample expenses for manual testing.

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime, Time};

use kharcha_rs::{NewExpense, create_expense, initialize_db};

/// Create a test database with sample expenses spread over recent months.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path for the new SQLite database.
    #[arg(long, default_value = "test.db")]
    db_path: String,
}

fn main() {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path).expect("Could not open the database");
    initialize_db(&connection).expect("Could not initialize the database");

    let samples = [
        ("Groceries", "Weekly vegetables and staples", 850.0),
        ("Chai", "Office tea round", 60.0),
        ("Auto fare", "Commute to work", 120.0),
        ("Electricity bill", "Monthly power bill", 1430.0),
        ("Mobile recharge", "Prepaid data pack", 299.0),
        ("Dinner out", "Birthday dinner", 1250.0),
        ("Books", "Two paperbacks", 540.0),
    ];

    let now = OffsetDateTime::now_utc();
    let mut created = 0;

    // Spread the samples over the last three months so the comparison badge
    // and the previous-month link have data to work with.
    for months_back in 0..3 {
        for (i, (title, description, amount)) in samples.iter().enumerate() {
            let payment_time = now
                .replace_time(Time::from_hms(12, 0, 0).unwrap())
                - Duration::days(30 * months_back + (i as i64 * 3));

            create_expense(
                NewExpense {
                    title: (*title).to_owned(),
                    description: (*description).to_owned(),
                    amount: *amount,
                    payment_time,
                },
                &connection,
            )
            .expect("Could not create sample expense");

            created += 1;
        }
    }

    println!("Created {created} sample expenses in {}", args.db_path);
}
