//! Patient search predicate CLI (psearch)
//!
//! Builds the predicate a patient search would hand to the persistence layer
//! and prints it, for checking search settings without a running server.

use clap::Parser;
use helios_patient_search::config::{SearchSettings, StoreDialect};
use helios_patient_search::search::SearchableAttributes;
use helios_patient_search::{IdentifierTypeRef, PatientSearchCriteria, PatientSearchQuery};
use tracing::info;

/// Print the predicate for a patient search.
#[derive(Debug, Parser)]
#[command(name = "psearch", version, about)]
struct Cli {
    #[command(flatten)]
    settings: SearchSettings,

    /// Name to search for.
    #[arg(long)]
    name: Option<String>,

    /// Identifier to search for.
    #[arg(long)]
    identifier: Option<String>,

    /// Identifier type filter, as `uuid` or `uuid=name`. May be repeated.
    #[arg(long = "identifier-type", value_parser = parse_identifier_type)]
    identifier_types: Vec<IdentifierTypeRef>,

    /// Match the identifier exactly.
    #[arg(long)]
    exact: bool,

    /// Match the name or the identifier instead of both.
    #[arg(long = "or")]
    combine: bool,

    /// Single free-text query matched against names, attributes and identifiers.
    #[arg(
        long,
        conflicts_with_all = ["name", "identifier", "identifier_types", "exact", "combine"]
    )]
    query: Option<String>,

    /// Searchable person attribute type uuid for free-text queries. May be repeated.
    #[arg(long = "searchable-attribute")]
    searchable_attributes: Vec<String>,

    /// The store has no regular expression support.
    #[arg(long)]
    no_regex: bool,

    /// Print the predicate as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_identifier_type(value: &str) -> Result<IdentifierTypeRef, String> {
    let (uuid, name) = match value.split_once('=') {
        Some((uuid, name)) => (uuid.trim(), Some(name.trim())),
        None => (value.trim(), None),
    };

    if uuid.is_empty() {
        return Err("identifier type uuid cannot be empty".to_string());
    }

    let identifier_type = IdentifierTypeRef::new(uuid);
    Ok(match name.filter(|n| !n.is_empty()) {
        Some(name) => identifier_type.with_name(name),
        None => identifier_type,
    })
}

fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "helios_patient_search={},helios_psearch={}",
            level, level
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.settings.log_level);

    if let Err(errors) = cli.settings.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let config = cli.settings.into_configuration();
    let dialect = if cli.no_regex {
        StoreDialect::without_regex()
    } else {
        StoreDialect::default()
    };
    let attributes = SearchableAttributes::new(cli.searchable_attributes);

    let mut criteria = PatientSearchCriteria::new(&config).with_dialect(dialect);
    if !attributes.attribute_types().is_empty() {
        criteria = criteria.with_attributes(&attributes);
    }

    let predicate = match cli.query.as_deref() {
        Some(query) => {
            info!(query = %query, "Building free-text patient search");
            criteria.prepare_for_query(query)?
        }
        None => {
            let mut query = PatientSearchQuery::new()
                .with_identifier_types(cli.identifier_types)
                .match_identifier_exactly(cli.exact)
                .search_names_or_identifiers(cli.combine);
            query.name = cli.name;
            query.identifier = cli.identifier;

            info!(mode = %query.search_mode(), "Building patient search");
            criteria.prepare(&query)?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&predicate)?);
    } else {
        println!("{}", predicate);
    }

    Ok(())
}
