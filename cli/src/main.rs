mod file_storage;
mod http;


use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use session::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use session::error::GENERIC_FAILURE;
use session::guard::{GuardDecision, private_decision};
use session::routes::{RouteAccess, access_for};
use session::marketplace::{Application, ApplicationStatus, Course, InstituteProfile, Location};
use session::{
    ApiConfig, Credentials, InstituteFilter, Marketplace, PasswordChange, Registration, Role, Session, SessionStore,
};

use crate::file_storage::FileTokenStorage;
use crate::http::HttpApi;

type Store = SessionStore<HttpApi, FileTokenStorage>;
type Market = Marketplace<HttpApi>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("registration failed: {0}")]
    RegisterFailed(String),
    #[error("password change failed: {0}")]
    PasswordChangeFailed(String),
    #[error("{0}")]
    Request(String),
    #[error("sign in first")]
    NotSignedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "granthive-cli", about = "GrantHive session CLI")]
struct Cli {
    #[arg(long, env = "GRANTHIVE_API_URL", default_value = DEFAULT_API_URL)]
    base_url: String,

    #[arg(
        long,
        env = "GRANTHIVE_API_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    #[arg(long, env = "GRANTHIVE_TOKEN_FILE", default_value = ".granthive/token")]
    token_file: PathBuf,

    /// Log session activity to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the bearer token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "GRANTHIVE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Print the identity decoded from the stored token.
    Whoami,
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GRANTHIVE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        role: Role,
    },
    /// Change the signed-in user's password.
    ChangePassword {
        #[arg(long, env = "GRANTHIVE_PASSWORD", hide_env_values = true)]
        old_password: String,
        #[arg(long, env = "GRANTHIVE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Show what the route guard decides for PATH with the stored session.
    Access { path: String },
    /// Search institutes by location, course, scholarship type or free text.
    Search {
        #[arg(long = "country", value_delimiter = ',')]
        countries: Vec<String>,
        #[arg(long = "city", value_delimiter = ',')]
        cities: Vec<String>,
        #[arg(long = "course", value_delimiter = ',')]
        courses: Vec<String>,
        #[arg(long = "scholarship-type", value_delimiter = ',')]
        scholarship_types: Vec<String>,
        /// Free-text match on institute names.
        #[arg(long, default_value = "")]
        text: String,
    },
    /// List the signed-in user's applications (received, for institutions).
    Applications,
    /// Accept or reject an application received by the signed-in institution.
    Decide {
        id: String,
        #[arg(value_enum)]
        decision: Decision,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    Accept,
    Reject,
}

impl From<Decision> for ApplicationStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => Self::Accepted,
            Decision::Reject => Self::Rejected,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let config = ApiConfig::new(&cli.base_url, Duration::from_secs(cli.timeout_secs));
    let market = Marketplace::new(HttpApi::new(config.clone())?);
    let store = SessionStore::new(HttpApi::new(config)?, FileTokenStorage::new(&cli.token_file));
    store.rehydrate();
    tracing::debug!(
        token_file = %store.storage().path().display(),
        authenticated = store.session().is_authenticated(),
        "session rehydrated"
    );

    match cli.command {
        Command::Login { email, password } => run_login(&store, Credentials::new(email, password)).await,
        Command::Logout => {
            store.logout();
            println!("signed out");
            Ok(())
        }
        Command::Whoami => print_json(&session_json(&store.session())),
        Command::Register { name, email, password, role } => {
            run_register(&store, Registration { name, email, password, role }).await
        }
        Command::ChangePassword { old_password, new_password } => {
            run_change_password(&store, PasswordChange { old_password, new_password }).await
        }
        Command::Access { path } => print_json(&access_json(&path, &store.session())),
        Command::Search { countries, cities, courses, scholarship_types, text } => {
            let filter = InstituteFilter { countries, cities, courses, search: text, scholarship_types };
            run_search(&market, &store.session(), &filter).await
        }
        Command::Applications => run_applications(&market, &store.session()).await,
        Command::Decide { id, decision } => run_decide(&market, &store.session(), &id, decision.into()).await,
    }
}

async fn run_login(store: &Store, credentials: Credentials) -> Result<(), CliError> {
    if !store.login(&credentials).await {
        let session = store.session();
        let message = session.error().unwrap_or(GENERIC_FAILURE);
        return Err(CliError::LoginFailed(message.to_owned()));
    }
    print_json(&session_json(&store.session()))
}

async fn run_register(store: &Store, registration: Registration) -> Result<(), CliError> {
    store.register(&registration).await.map_err(CliError::RegisterFailed)?;
    println!("registered {} as {}", registration.email, registration.role);
    Ok(())
}

async fn run_change_password(store: &Store, change: PasswordChange) -> Result<(), CliError> {
    store.change_password(&change).await.map_err(CliError::PasswordChangeFailed)?;
    println!("password updated");
    Ok(())
}

async fn run_search(market: &Market, session: &Session, filter: &InstituteFilter) -> Result<(), CliError> {
    let found = market
        .search_institutes(session.token(), filter)
        .await
        .map_err(|e| CliError::Request(e.request_message("Search failed")))?;
    print_json(&Value::Array(found.iter().map(institute_json).collect()))
}

async fn run_applications(market: &Market, session: &Session) -> Result<(), CliError> {
    let applications = match session.role() {
        Some(Role::Student) => market.student_applications(session.token()).await,
        Some(Role::Institution) => market.institute_applications(session.token()).await,
        None => return Err(CliError::NotSignedIn),
    }
    .map_err(|e| CliError::Request(e.request_message("Could not load applications")))?;
    print_json(&Value::Array(applications.iter().map(application_json).collect()))
}

async fn run_decide(market: &Market, session: &Session, id: &str, status: ApplicationStatus) -> Result<(), CliError> {
    if session.role() != Some(Role::Institution) {
        return Err(CliError::NotSignedIn);
    }
    let updated = market
        .set_application_status(session.token(), id, status)
        .await
        .map_err(|e| CliError::Request(e.request_message("Could not update application")))?;
    print_json(&application_json(&updated))
}

fn institute_json(profile: &InstituteProfile) -> Value {
    json!({
        "user_id": profile.user_id,
        "name": profile.name,
        "university": profile.university,
        "location": profile.location.as_ref().map(Location::label),
        "courses": profile.courses().iter().map(Course::title).collect::<Vec<_>>(),
    })
}

fn application_json(application: &Application) -> Value {
    json!({
        "id": application.id,
        "course": application.course_title(),
        "status": application.status.label(),
        "submitted": application.submitted_on(),
    })
}

fn session_json(session: &Session) -> Value {
    json!({
        "authenticated": session.is_authenticated(),
        "role": session.role(),
        "identity": session.identity(),
    })
}

fn access_json(path: &str, session: &Session) -> Value {
    match access_for(path) {
        RouteAccess::Public => json!({ "path": path, "access": "public", "decision": "render" }),
        RouteAccess::Private { allowed_roles } => json!({
            "path": path,
            "access": "private",
            "allowed_roles": allowed_roles,
            "decision": describe_decision(private_decision(session, allowed_roles)),
        }),
    }
}

fn describe_decision(decision: GuardDecision) -> String {
    match decision {
        GuardDecision::ShowLoading => "loading".to_owned(),
        GuardDecision::Redirect(target) => format!("redirect {target}"),
        GuardDecision::Render => "render".to_owned(),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
