//! HomeChores CLI
//!
//! Command-line front end for registering, signing in, browsing the worker
//! directory and managing a worker profile.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use homechores::config::AppConfig;
use homechores::directory::{DirectoryQuery, list_workers};
use homechores::logging::init_logging;
use homechores::storage::{
    FileStore, JobCategory, Profile, ProfileStore, WorkerProfile, WorkerRegistration,
    WorkerUpdate,
};
use homechores::utils::parsing::{
    parse_count_or_zero, parse_decimal_or_zero, parse_job_filter, parse_sort_key,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// HomeChores marketplace tool
#[derive(Parser, Debug)]
#[command(name = "homechores-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the stored blobs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password
    Login { email: String, password: String },

    /// Create a regular user account
    RegisterUser {
        name: String,
        email: String,
        password: String,
    },

    /// Create a worker account
    RegisterWorker {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: String,
        /// plumber, electrician, decorator or pharmacist
        #[arg(long)]
        job: String,
        /// Years of experience
        #[arg(long, default_value = "0")]
        experience: String,
        /// Price per hour
        #[arg(long, default_value = "0")]
        price: String,
        /// Diploma file name
        #[arg(long)]
        diploma: Option<String>,
        /// CV file name
        #[arg(long)]
        cv: Option<String>,
        /// Certificate file name (repeatable)
        #[arg(long = "cert")]
        certs: Vec<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Update the signed-in worker's profile
    UpdateProfile {
        /// Price per hour (must be positive)
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Years of experience
        #[arg(long)]
        experience: Option<String>,
        /// Diploma file name (empty to clear)
        #[arg(long)]
        diploma: Option<String>,
        /// CV file name (empty to clear)
        #[arg(long)]
        cv: Option<String>,
        /// Certificate file name (repeatable, replaces the list)
        #[arg(long = "cert")]
        certs: Vec<String>,
    },

    /// Browse the worker directory
    List {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,
        /// Job type filter, or "all"
        #[arg(short, long, default_value = "all")]
        job: String,
        /// name, rating, price-low or price-high
        #[arg(long, default_value = "name")]
        sort: String,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AppConfig::load().context("Failed to load configuration")?;
    let data_dir = config
        .resolve_data_dir(args.data_dir.as_deref())
        .context("Failed to resolve data directory")?;
    tracing::debug!(data_dir = %data_dir.display(), "opening store");

    let backend = FileStore::new(data_dir);
    let mut store = match config.rng_seed {
        Some(seed) => ProfileStore::open_seeded(backend, seed),
        None => ProfileStore::open(backend),
    }
    .context("Failed to open profile store")?;

    match args.command {
        Command::Login { email, password } => cmd_login(&mut store, &email, &password),
        Command::RegisterUser {
            name,
            email,
            password,
        } => cmd_register_user(&mut store, &name, &email, &password),
        Command::RegisterWorker {
            name,
            email,
            password,
            phone,
            job,
            experience,
            price,
            diploma,
            cv,
            certs,
        } => {
            let registration = WorkerRegistration {
                name,
                email,
                phone,
                job_type: Some(job.parse::<JobCategory>().context("Please select a job type")?),
                experience_years: parse_count_or_zero(&experience),
                price: parse_decimal_or_zero(&price),
                diploma_name: diploma,
                cv_name: cv,
                certificate_names: certs,
            };
            cmd_register_worker(&mut store, registration, &password)
        }
        Command::Logout => cmd_logout(&mut store),
        Command::Whoami => cmd_whoami(&store),
        Command::UpdateProfile {
            price,
            phone,
            experience,
            diploma,
            cv,
            certs,
        } => {
            let update = WorkerUpdate {
                phone,
                experience_years: experience.as_deref().map(parse_count_or_zero),
                price: price.as_deref().map(parse_decimal_or_zero),
                diploma_name: diploma,
                cv_name: cv,
                certificate_names: (!certs.is_empty()).then_some(certs),
                ..WorkerUpdate::default()
            };
            cmd_update_profile(&mut store, update)
        }
        Command::List { search, job, sort } => {
            let query = DirectoryQuery {
                search,
                category: parse_job_filter(&job)?,
                sort: parse_sort_key(&sort)?,
            };
            cmd_list(&mut store, &query, config.seed_directory)
        }
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

type Store = ProfileStore<FileStore>;

fn cmd_login(store: &mut Store, email: &str, password: &str) -> Result<()> {
    let profile = store.authenticate(email, password)?;
    println!("✅ Welcome back, {}!", profile.name());
    Ok(())
}

fn cmd_register_user(store: &mut Store, name: &str, email: &str, password: &str) -> Result<()> {
    let user = store.register_user(name, email, password)?;
    println!("✅ Account created for {} ({})", user.name, user.email);
    Ok(())
}

fn cmd_register_worker(
    store: &mut Store,
    registration: WorkerRegistration,
    password: &str,
) -> Result<()> {
    let worker = store.register_worker(registration, password)?;
    println!("✅ Worker account created!");
    print_worker(&worker);
    Ok(())
}

fn cmd_logout(store: &mut Store) -> Result<()> {
    store.logout()?;
    println!("👋 Signed out.");
    Ok(())
}

fn cmd_whoami(store: &Store) -> Result<()> {
    match store.current() {
        None => println!("Not signed in."),
        Some(Profile::User(user)) => {
            println!("👤 {} <{}> (user)", user.name, user.email);
        }
        Some(Profile::Worker(worker)) => print_worker(worker),
    }
    Ok(())
}

fn cmd_update_profile(store: &mut Store, update: WorkerUpdate) -> Result<()> {
    if update.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    // The store takes any price; only positive ones are allowed from here.
    if let Some(price) = update.price {
        if price <= 0.0 {
            anyhow::bail!("Price must be greater than zero");
        }
    }

    let worker = store.update_worker_profile(&update)?;
    if update.price.is_some() {
        println!("✅ Price updated!");
    }
    if update.diploma_name.as_deref().is_some_and(|n| !n.is_empty()) {
        println!("✅ Diploma uploaded");
    }
    if update.cv_name.as_deref().is_some_and(|n| !n.is_empty()) {
        println!("✅ CV uploaded");
    }
    if let Some(certs) = &update.certificate_names {
        println!("✅ {} certificate(s) uploaded", certs.len());
    }
    print_worker(&worker);
    Ok(())
}

fn cmd_list(store: &mut Store, query: &DirectoryQuery, seed: bool) -> Result<()> {
    if seed {
        store
            .ensure_directory_seeded()
            .context("Failed to seed worker directory")?;
    }

    let workers = list_workers(&store.directory()?, query);
    println!("{} workers found (sorted by {})", workers.len(), query.sort);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for w in &workers {
        println!(
            "⭐ {:<3} {:<24} {:<12} {:>2} yrs  ${}/hr",
            w.rating,
            w.name,
            w.job_type.label(),
            w.experience_years,
            w.price
        );
    }
    Ok(())
}

fn print_worker(worker: &WorkerProfile) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("👷 {} <{}>", worker.name, worker.email);
    println!("   Job:        {}", worker.job_type);
    println!("   Phone:      {}", worker.phone);
    println!("   Experience: {} yrs", worker.experience_years);
    println!("   Price:      ${}/hr", worker.price);
    println!("   Rating:     {}", worker.rating);
    println!(
        "   Diploma:    {}",
        worker.diploma_name.as_deref().unwrap_or("-")
    );
    println!("   CV:         {}", worker.cv_name.as_deref().unwrap_or("-"));
    if !worker.certificate_names.is_empty() {
        println!("   Certs:      {}", worker.certificate_names.join(", "));
    }
}
