//! Command-line interface.
//!
//! ```text
//! influbazzar query creators --data creators.json --filter category=Beauty --sort engagement:desc
//! influbazzar facets creators --data creators.json --field category
//! influbazzar preset top-beauty --data creators.json
//! influbazzar wizard campaign --answers campaign.yaml
//! influbazzar withdraw --data earnings.json --amount 2500
//! ```
//!
//! [`execute`] runs a parsed command and returns the rendered output, so the
//! binary only has to print it.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use influbazzar_query::{
    facets, parse_filter, run_query, AcceptedValues, Bound, Query, SortKey,
};
use tracing::debug;

use crate::actions::{self, Receipt};
use crate::catalog::{load_file, load_records};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::model::{balance, Campaign, Collection, Creator, EarningsEntry, Faq, Listing};
use crate::output::{render_facets, render_view, serialize_structured, OutputMode};
use crate::wizards::{campaign_wizard, complete_signup, replay, signup_wizard};

/// Runs `$body` with `$ty` bound to the record type of a collection.
macro_rules! with_listing {
    ($collection:expr, |$ty:ident| $body:expr) => {
        match $collection {
            Collection::Creators => {
                type $ty = Creator;
                $body
            }
            Collection::Campaigns => {
                type $ty = Campaign;
                $body
            }
            Collection::Earnings => {
                type $ty = EarningsEntry;
                $body
            }
            Collection::Faqs => {
                type $ty = Faq;
                $body
            }
        }
    };
}

/// Browse influencer-marketplace data from the command line.
#[derive(Debug, Parser)]
#[command(name = "influbazzar", version)]
#[command(about = "Search, filter, sort and page through marketplace data")]
pub struct Cli {
    /// Config file [default: ./influbazzar.yaml if present]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output mode
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search, filter, sort and page through a collection
    Query(QueryArgs),

    /// Count the distinct values of a filterable field
    Facets(FacetsArgs),

    /// Run a query stored in the config file
    Preset(PresetArgs),

    /// Replay a filled-in form through its wizard
    Wizard(WizardArgs),

    /// Request a payout from the paid earnings balance
    Withdraw(WithdrawArgs),
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Collection to list
    #[arg(value_enum)]
    pub collection: Collection,

    /// JSON or YAML file holding the records
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Case-insensitive text to look for
    #[arg(short, long)]
    pub search: Option<String>,

    /// Search only these fields instead of the collection's searchable ones
    #[arg(long = "in", value_name = "FIELDS", value_delimiter = ',')]
    pub search_in: Vec<String>,

    /// Keep records whose field has one of the values, e.g. category=Beauty,Tech
    #[arg(short, long = "filter", value_name = "FIELD=VALUES", value_parser = parse_filter)]
    pub filters: Vec<(String, AcceptedValues)>,

    /// Numeric bound, e.g. followers>=10000
    #[arg(short = 'w', long = "where", value_name = "CLAUSE")]
    pub bounds: Vec<Bound>,

    /// Sort key, e.g. engagement:desc
    #[arg(long, value_name = "FIELD[:DIR]")]
    pub sort: Option<SortKey>,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Records per page [default: config page_size, else 10]
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl QueryArgs {
    /// Builds the query these arguments describe.
    pub fn to_query(&self, default_page_size: Option<NonZeroUsize>) -> Result<Query> {
        let mut query = Query::new().page(self.page);
        if let Some(text) = &self.search {
            query = query.search(text.as_str());
        }
        if !self.search_in.is_empty() {
            query = query.search_fields(self.search_in.iter().map(String::as_str));
        }
        for (field, values) in &self.filters {
            query = query.filter(field, values.iter().cloned());
        }
        for bound in &self.bounds {
            query = query.bound(&bound.field, bound.op, bound.value);
        }
        if let Some(key) = &self.sort {
            query = query.order_by(&key.field, key.dir);
        }
        query = match (self.page_size, default_page_size) {
            (Some(size), _) => query.try_page_size(size)?,
            (None, Some(size)) => query.page_size(size),
            (None, None) => query,
        };
        Ok(query.build())
    }
}

#[derive(Debug, Args)]
pub struct FacetsArgs {
    /// Collection to count over
    #[arg(value_enum)]
    pub collection: Collection,

    /// JSON or YAML file holding the records
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Filterable field to count
    #[arg(long)]
    pub field: String,
}

#[derive(Debug, Args)]
pub struct PresetArgs {
    /// Preset name from the config file
    pub name: String,

    /// JSON or YAML file holding the records
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WizardKind {
    /// Brand campaign creation
    Campaign,
    /// Creator signup
    Signup,
}

#[derive(Debug, Args)]
pub struct WizardArgs {
    /// Which form to replay
    #[arg(value_enum)]
    pub kind: WizardKind,

    /// JSON or YAML file with the form's answers
    #[arg(short, long, value_name = "FILE")]
    pub answers: PathBuf,

    /// OTP that was sent (signup only); without it only the code's shape is checked
    #[arg(long)]
    pub otp: Option<String>,
}

#[derive(Debug, Args)]
pub struct WithdrawArgs {
    /// Earnings history file
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Amount in rupees
    #[arg(long)]
    pub amount: u64,
}

// ============================================================================
// Execution
// ============================================================================

/// Runs a command and returns what should be printed.
pub fn execute(cli: &Cli, config: &Config) -> Result<String> {
    let mode = cli.output;
    match &cli.command {
        Command::Query(args) => {
            let query = args.to_query(config.page_size)?;
            with_listing!(args.collection, |T| list::<T>(&args.data, &query, mode))
        }
        Command::Facets(args) => {
            with_listing!(args.collection, |T| count_facets::<T>(
                &args.data,
                &args.field,
                mode
            ))
        }
        Command::Preset(args) => {
            let preset = config.preset(&args.name)?;
            debug!(preset = %args.name, collection = %preset.collection, "running preset");
            with_listing!(preset.collection, |T| list::<T>(
                &args.data,
                &preset.query,
                mode
            ))
        }
        Command::Wizard(args) => {
            let report = match args.kind {
                WizardKind::Campaign => {
                    let wizard = campaign_wizard(load_file(&args.answers)?)?;
                    replay("campaign", wizard, actions::submit_campaign)
                }
                WizardKind::Signup => {
                    let wizard = signup_wizard(load_file(&args.answers)?, args.otp.clone())?;
                    replay("signup", wizard, |form| Ok(complete_signup(form)))
                }
            };
            if mode.is_structured() {
                Ok(serialize_structured(&report, mode)?)
            } else {
                Ok(report.to_text())
            }
        }
        Command::Withdraw(args) => {
            let entries: Vec<EarningsEntry> = load_records(&args.data)?;
            let totals = balance(&entries);
            debug!(available = totals.available, pending = totals.pending, "balance");
            let receipt = actions::request_withdrawal(totals.available, args.amount)?;
            render_receipt(&receipt, mode)
        }
    }
}

fn list<T: Listing>(data: &Path, query: &Query, mode: OutputMode) -> Result<String> {
    check_query::<T>(query)?;
    let records: Vec<T> = load_records(data)?;
    let view = run_query(&records, query);
    Ok(render_view(&view, mode)?)
}

fn count_facets<T: Listing>(data: &Path, field: &str, mode: OutputMode) -> Result<String> {
    ensure_filterable::<T>(field)?;
    let records: Vec<T> = load_records(data)?;
    let counts = facets(&records, field);
    Ok(render_facets(field, &counts, mode)?)
}

fn render_receipt(receipt: &Receipt, mode: OutputMode) -> Result<String> {
    if mode.is_structured() {
        Ok(serialize_structured(receipt, mode)?)
    } else {
        Ok(format!("{} [{}]", receipt.message, receipt.reference))
    }
}

/// Rejects filter and sort fields the record type does not declare.
///
/// Dotted paths into nested objects are passed through unchecked. Bounds
/// may name any filterable or sortable field.
pub fn check_query<T: Listing>(query: &Query) -> Result<()> {
    for field in query.filters().accepted.keys() {
        ensure_filterable::<T>(field)?;
    }
    let schema = T::schema();
    for bound in &query.filters().bounds {
        let field = bound.field.as_str();
        if !is_nested(field) && !schema.can_filter(field) && !schema.can_sort(field) {
            return Err(not_filterable::<T>(field));
        }
    }
    if let Some(key) = query.sort_key() {
        if !is_nested(&key.field) && !schema.can_sort(&key.field) {
            return Err(AppError::NotSortable {
                field: key.field.clone(),
                collection: T::PLURAL.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_filterable<T: Listing>(field: &str) -> Result<()> {
    if is_nested(field) || T::schema().can_filter(field) {
        Ok(())
    } else {
        Err(not_filterable::<T>(field))
    }
}

fn not_filterable<T: Listing>(field: &str) -> AppError {
    AppError::NotFilterable {
        field: field.to_string(),
        collection: T::PLURAL.to_string(),
    }
}

fn is_nested(field: &str) -> bool {
    field.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use influbazzar_query::{Dir, FilterValue, Op};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_query_flags() {
        let cli = parse(&[
            "influbazzar",
            "query",
            "creators",
            "--data",
            "creators.json",
            "--search",
            "kapoor",
            "--filter",
            "category=Beauty,Tech",
            "--where",
            "followers>=10000",
            "--sort",
            "engagement:desc",
            "--page",
            "2",
            "-o",
            "json",
        ]);
        assert_eq!(cli.output, OutputMode::Json);
        let Command::Query(args) = &cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.collection, Collection::Creators);

        let query = args.to_query(None).unwrap();
        assert_eq!(query.search_text(), "kapoor");
        assert_eq!(query.page_number(), 2);
        assert_eq!(query.sort_key(), Some(&SortKey::new("engagement", Dir::Desc)));
        let filters = query.filters();
        assert!(filters.accepted["category"].contains(&FilterValue::from("Tech")));
        assert_eq!(filters.bounds, vec![Bound::new("followers", Op::Gte, 10000i64)]);
    }

    #[test]
    fn rejects_malformed_sort() {
        let result = Cli::try_parse_from([
            "influbazzar",
            "query",
            "faqs",
            "--data",
            "faqs.json",
            "--sort",
            "question:sideways",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn page_size_falls_back_to_config() {
        let cli = parse(&["influbazzar", "query", "faqs", "-d", "faqs.json"]);
        let Command::Query(args) = &cli.command else {
            panic!("expected query command");
        };
        let query = args.to_query(NonZeroUsize::new(25)).unwrap();
        assert_eq!(query.size().get(), 25);

        let cli = parse(&[
            "influbazzar",
            "query",
            "faqs",
            "-d",
            "faqs.json",
            "--page-size",
            "0",
        ]);
        let Command::Query(args) = &cli.command else {
            panic!("expected query command");
        };
        assert!(matches!(
            args.to_query(None),
            Err(AppError::Query(influbazzar_query::QueryError::ZeroPageSize))
        ));
    }

    #[test]
    fn undeclared_fields_are_rejected() {
        let query = Query::new().filter("followers", ["100"]);
        assert!(matches!(
            check_query::<Creator>(&query),
            Err(AppError::NotFilterable { .. })
        ));

        let query = Query::new().order_desc("handle");
        let err = check_query::<Creator>(&query).unwrap_err();
        assert_eq!(err.to_string(), "Field 'handle' cannot be sorted on creators");

        let query = Query::new()
            .bound("followers", Op::Gte, 10000i64)
            .filter("audience.top_city", ["Mumbai"]);
        assert!(check_query::<Creator>(&query).is_ok());
    }
}
