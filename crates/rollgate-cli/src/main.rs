use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use rollgate_cli::seeder;
use rollgate_config::RegistrationConfig;
use rollgate_db::postgres::PgStudentStore;
use rollgate_db::{PgPool, init_db_pool};
use rollgate_models::{NewStudent, validate_institutional_email, validate_roll_identifier};

#[derive(Parser)]
#[command(name = "rollgate-cli")]
#[command(about = "Rollgate CLI - Administrative tools for Rollgate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the role assigned to self-registered students
    SeedRoles,
    /// Add one student to the system-of-record
    AddStudent {
        /// Roll number
        #[arg(short = 'r', long)]
        roll: Option<String>,

        /// Institutional email address
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Seed fake student records with rolls from the current batches
    SeedStudents {
        /// Number of records to create
        #[arg(short = 'c', long, default_value = "100")]
        count: usize,
    },
}

fn exit_with(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => exit_with("Configuration error", "DATABASE_URL must be set"),
    };
    let pool = match init_db_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => exit_with("Failed to connect to database", e),
    };

    match cli.command {
        Commands::SeedRoles => handle_seed_roles(&pool).await,
        Commands::AddStudent { roll, email } => handle_add_student(&pool, roll, email).await,
        Commands::SeedStudents { count } => handle_seed_students(&pool, count).await,
    }
}

async fn handle_seed_roles(pool: &PgPool) {
    match seeder::seed_roles(pool).await {
        Ok(roles) => {
            for role in roles {
                println!("✅ Role ready: {} ({})", role.name, role.role_type);
            }
        }
        Err(e) => exit_with("Error seeding roles", e),
    }
}

async fn handle_add_student(pool: &PgPool, roll: Option<String>, email: Option<String>) {
    let config = RegistrationConfig::from_env();

    let roll = match roll {
        Some(roll) => roll,
        None => Input::new()
            .with_prompt("Roll number")
            .interact_text()
            .unwrap_or_else(|e| exit_with("Failed to read roll number", e)),
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Institutional email")
            .interact_text()
            .unwrap_or_else(|e| exit_with("Failed to read email", e)),
    };

    if !validate_roll_identifier(&roll, &Utc::now()) {
        println!("⚠️  {} is outside the batches that can currently register", roll);
    }
    if !validate_institutional_email(&email, &config.institution_domain) {
        println!(
            "⚠️  {} is not an address on {}",
            email, config.institution_domain
        );
    }

    let store = PgStudentStore::new(pool.clone());
    let student = NewStudent {
        roll,
        institutional_email: email,
    };

    match store.insert(&student).await {
        Ok(student) => {
            println!("\n✅ Student added successfully!");
            println!("   Roll: {}", student.roll);
            println!("   Email: {}", student.institutional_email);
        }
        Err(e) => exit_with("Error adding student", e),
    }
}

async fn handle_seed_students(pool: &PgPool, count: usize) {
    let config = RegistrationConfig::from_env();

    if let Err(e) =
        seeder::seed_students(pool, count, &config.institution_domain, Utc::now()).await
    {
        exit_with("Error seeding students", e);
    }
}
