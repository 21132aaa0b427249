//! Student Service - command line access to the student roster.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::Student;
use student_service_lib::config::StudentServiceConfig;
use student_service_lib::RosterAction;

#[derive(Parser)]
#[command(name = "student-service")]
#[command(about = "Student roster backed by a document store")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Document store file
    #[arg(long, global = true, env = "STUDENT_SERVICE_STORE_PATH")]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all students sorted by name
    List,
    /// Add a student
    Add(StudentArgs),
    /// Overwrite a stored student and its phones
    Update {
        /// Store id of the student document
        #[arg(long)]
        document_id: String,
        #[command(flatten)]
        student: StudentArgs,
    },
    /// Delete a student document
    Delete {
        /// Store id of the student document
        #[arg(long)]
        document_id: String,
    },
}

#[derive(Args)]
struct StudentArgs {
    /// Student identifier
    #[arg(long)]
    id: String,
    /// Student name
    #[arg(long)]
    name: String,
    /// Study program
    #[arg(long, default_value = "")]
    program: String,
    /// Phone number (repeatable)
    #[arg(long = "phone")]
    phones: Vec<String>,
}

impl From<StudentArgs> for Student {
    fn from(args: StudentArgs) -> Self {
        Student::new(args.id, args.name, args.program, args.phones)
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing first so configuration warnings are logged
    let service = StudentServiceConfig::service_from_env();
    init_tracing(service.log_filter(cli.verbose));

    let mut config = StudentServiceConfig::from_env();
    if let Some(path) = cli.store {
        config.store.path = path;
    }
    tracing::debug!(?config, "Configuration loaded");

    let action = match cli.command {
        Commands::List => RosterAction::List,
        Commands::Add(args) => RosterAction::Add(args.into()),
        Commands::Update {
            document_id,
            student,
        } => RosterAction::Update(Student::from(student).with_document_id(document_id)),
        Commands::Delete { document_id } => RosterAction::Delete { document_id },
    };

    let snapshot = match student_service_lib::run_action(action, &config).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(code = e.code(), "Command failed: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&snapshot.students) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Failed to render students: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing(filter: &str) {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
