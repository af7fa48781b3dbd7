mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod interactive;
mod logic;
mod models;
mod report;

use clap::Parser;
use cli::{Cli, Commands, DatasetArgs, OutputArgs};
use config::Config;
use datasources::{file::read_answers, DatasetSource};
use db::Database;
use error::{Result, SchemeError};
use logic::matcher::{is_scheme_name_column, rule_columns};
use logic::{EligibilitySearch, SaveTarget, SchemeMatcher};
use models::{Dataset, FarmerInput};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        let code = match e {
            SchemeError::DatasetUnavailable(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        let target = Config::default_config_path()?;
        if target.exists() {
            println!("{} already exists; it will be replaced.", target.display());
        }
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load_or_default(cli.config.clone())?;
    let data_dir = cli.data_dir.as_ref();

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Check { dataset } => check(&config, &dataset, data_dir).await,
        Commands::Match {
            dataset,
            input,
            answers,
            save,
            output,
        } => {
            let mut farmer = match input {
                Some(ref path) => read_answers(path).await?,
                None => FarmerInput::default(),
            };
            farmer = farmer.merged_with(FarmerInput::parse_assignments(&answers)?);
            if farmer.is_empty() {
                tracing::warn!("No answers given; only schemes without conditions can match");
            }
            let session = Session::new(&config, data_dir);
            session
                .match_and_report(&dataset, &farmer, save.save.as_deref(), save.user, &output)
                .await
        }
        Commands::Ask {
            dataset,
            save,
            output,
        } => {
            let session = Session::new(&config, data_dir);
            let source = resolve_source(&config, &dataset)?;
            let loaded = session.search.load(&source).await?;
            let farmer = interactive::prompt_answers(&loaded)?;
            session.report(&loaded, &farmer, save.save.as_deref(), save.user, &output)
        }
        Commands::Profiles { user } => {
            let db = Database::open(data_dir)?;
            let user_id = user.unwrap_or_else(|| config.profiles.user_id.clone());
            let profiles = db.list_profiles(&user_id)?;
            print!("{}", report::render_profiles(&profiles));
            Ok(())
        }
        Commands::History {
            profile,
            user,
            limit,
        } => {
            let db = Database::open(data_dir)?;
            let user_id = user.unwrap_or_else(|| config.profiles.user_id.clone());
            let stored = db
                .get_profile(&user_id, &profile)?
                .ok_or_else(|| SchemeError::NotFound(format!("Profile '{}'", profile)))?;
            let records = db.search_history(stored.id, limit)?;
            print!("{}", report::render_history(&stored, &records));
            Ok(())
        }
        Commands::Rerun {
            profile,
            user,
            dataset,
            answers,
            no_save,
            output,
        } => {
            let db = Database::open(data_dir)?;
            let user_id = user.unwrap_or_else(|| config.profiles.user_id.clone());
            let stored = db
                .get_profile(&user_id, &profile)?
                .ok_or_else(|| SchemeError::NotFound(format!("Profile '{}'", profile)))?;
            let farmer = stored
                .answers
                .merged_with(FarmerInput::parse_assignments(&answers)?);
            drop(db);

            let session = Session::new(&config, data_dir);
            let save = if no_save { None } else { Some(profile.as_str()) };
            session
                .match_and_report(&dataset, &farmer, save, Some(user_id), &output)
                .await
        }
        Commands::Forget { profile, user } => {
            let db = Database::open(data_dir)?;
            let user_id = user.unwrap_or_else(|| config.profiles.user_id.clone());
            db.delete_profile(&user_id, &profile)?;
            println!("Deleted profile '{}'", profile);
            Ok(())
        }
    }
}

/// `--dataset`/`--dataset-url` replace the configured source for one run.
fn resolve_source(config: &Config, args: &DatasetArgs) -> Result<DatasetSource> {
    let mut dataset = config.dataset.clone();
    if let Some(ref path) = args.dataset {
        dataset.path = Some(path.clone());
    } else if let Some(ref url) = args.dataset_url {
        dataset.path = None;
        dataset.url = Some(url.clone());
    }
    DatasetSource::from_config(&dataset)
}

/// Everything one matching command needs, built from the loaded config.
struct Session<'a> {
    config: &'a Config,
    data_dir: Option<&'a PathBuf>,
    search: EligibilitySearch,
}

impl<'a> Session<'a> {
    fn new(config: &'a Config, data_dir: Option<&'a PathBuf>) -> Self {
        Self {
            config,
            data_dir,
            search: EligibilitySearch::new(SchemeMatcher::from_config(&config.matcher)),
        }
    }

    async fn match_and_report(
        &self,
        dataset: &DatasetArgs,
        farmer: &FarmerInput,
        save: Option<&str>,
        user: Option<String>,
        output: &OutputArgs,
    ) -> Result<()> {
        let source = resolve_source(self.config, dataset)?;
        let loaded = self.search.load(&source).await?;
        self.report(&loaded, farmer, save, user, output)
    }

    fn report(
        &self,
        dataset: &Dataset,
        farmer: &FarmerInput,
        save: Option<&str>,
        user: Option<String>,
        output: &OutputArgs,
    ) -> Result<()> {
        let user_id = user.unwrap_or_else(|| self.config.profiles.user_id.clone());

        // Opening the store is part of saving; a failure here is a warning too.
        let mut store_warning: Option<String> = None;
        let store = match save {
            Some(_) if !self.config.profiles.enabled => {
                store_warning = Some("Profile store is disabled; results were not saved".into());
                None
            }
            Some(_) => match Database::open(self.data_dir) {
                Ok(db) => Some(db),
                Err(e) => {
                    tracing::warn!("Failed to open profile store: {}", e);
                    store_warning = Some(format!("Results were not saved: {}", e));
                    None
                }
            },
            None => None,
        };

        let target = match (store.as_ref(), save) {
            (Some(db), Some(profile_name)) => Some(SaveTarget {
                store: db,
                user_id: &user_id,
                profile_name,
            }),
            _ => None,
        };

        let mut outcome = self.search.run(farmer, dataset, target);
        if outcome.warning.is_none() {
            outcome.warning = store_warning;
        }

        if output.explain {
            self.search.explain(&mut outcome, farmer, dataset);
        }

        if output.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print!("{}", report::render_outcome(&outcome));
        }
        Ok(())
    }
}

async fn check(config: &Config, args: &DatasetArgs, data_dir: Option<&PathBuf>) -> Result<()> {
    let source = resolve_source(config, args)?;
    println!("Dataset: {}", source.describe());

    let dataset = EligibilitySearch::default().load(&source).await?;
    println!("Schemes: {}", dataset.len());

    let columns = rule_columns(&dataset);
    if columns.is_empty() {
        println!("Eligibility columns: (none)");
    } else {
        println!("Eligibility columns: {}", columns.join(", "));
    }

    let has_name_column = dataset
        .column_labels()
        .iter()
        .any(|label| is_scheme_name_column(label));
    if !has_name_column {
        println!("Warning: no \"Scheme Name\" column; results will be unnamed");
    }

    let unnamed = dataset
        .rows()
        .iter()
        .filter(|row| {
            !row.columns()
                .any(|(label, value)| is_scheme_name_column(label) && !value.is_blank())
        })
        .count();
    if has_name_column && unnamed > 0 {
        println!("Warning: {} scheme(s) have no name", unnamed);
    }

    if config.profiles.enabled {
        let db = Database::open(data_dir)?;
        println!("Profile store: {}", db.path().display());
    } else {
        println!("Profile store: disabled");
    }
    Ok(())
}
