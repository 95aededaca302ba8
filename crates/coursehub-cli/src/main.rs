use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;

use coursehub_cli::seeder::{self, SEED_PASSWORD, SeedConfig};
use coursehub_core::hash_password;
use coursehub_db::{Datastore, PgStore, init_db_pool};
use coursehub_models::{NewUser, Role};

#[derive(Parser)]
#[command(name = "coursehub-cli")]
#[command(about = "Coursehub CLI - Administrative tools for Coursehub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Role: instructor or student
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
    /// Seed the database with fake instructors, courses, sessions and students
    Seed {
        /// Number of instructors to create
        #[arg(short = 'i', long, default_value = "3")]
        instructors: usize,

        /// Number of courses per instructor
        #[arg(short = 'c', long, default_value = "2")]
        courses: usize,

        /// Number of sessions per course
        #[arg(long, default_value = "5")]
        sessions: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "20")]
        students: usize,

        /// Number of enrollments per student
        #[arg(long, default_value = "2")]
        enrollments: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            email,
            role,
            password,
        } => handle_create_user(&store, email, role, password).await,
        Commands::Migrate => handle_migrate(&store).await,
        Commands::Seed {
            instructors,
            courses,
            sessions,
            students,
            enrollments,
        } => {
            let config = SeedConfig {
                instructors,
                courses_per_instructor: courses,
                sessions_per_course: sessions,
                students,
                enrollments_per_student: enrollments,
            };
            handle_seed(&store, config).await
        }
    }
}

async fn handle_create_user(
    store: &PgStore,
    email: Option<String>,
    role: Option<Role>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let roles = [Role::Instructor, Role::Student];
            let index = Select::new()
                .with_prompt("Role")
                .items(&roles)
                .default(0)
                .interact()?;
            roles[index]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    if password.len() < 8 {
        return Err(anyhow!("Password must be at least 8 characters"));
    }

    let password_hash = hash_password(&password).map_err(|e| e.error)?;
    let user = store
        .create_user(NewUser {
            email: email.trim().to_lowercase(),
            password_hash,
            role,
        })
        .await
        .map_err(|e| e.error.context("Error creating user"))?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Role: {}", user.role);
    Ok(())
}

async fn handle_migrate(store: &PgStore) -> anyhow::Result<()> {
    store
        .run_migrations()
        .await
        .map_err(|e| e.error.context("Error running migrations"))?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_seed(store: &PgStore, config: SeedConfig) -> anyhow::Result<()> {
    let summary = seeder::seed_all(store, &config)
        .await
        .map_err(|e| e.error.context("Error seeding database"))?;

    println!("\n✅ Seeded database");
    println!("   Instructors: {}", summary.instructors);
    println!("   Courses: {}", summary.courses);
    println!("   Sessions: {}", summary.sessions);
    println!("   Students: {}", summary.students);
    println!("   Enrollments: {}", summary.enrollments);
    println!("   Password for all seeded accounts: {}", SEED_PASSWORD);
    Ok(())
}
