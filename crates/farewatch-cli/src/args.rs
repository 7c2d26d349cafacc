//! Command-line argument definitions using clap's derive API.
//!
//! Each argument struct converts into the core model it describes, so clap
//! attributes never leak into `farewatch-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Models → Store
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use farewatch_core::{Airport, Carrier, NewQuote, QuoteFilter, Route, SortOrder};
use jiff::Timestamp;

/// Track flight fares over time.
///
/// Farewatch keeps carriers, airports, routes and the price quotes observed
/// for them in a local SQLite file. Running without a command lists the
/// store's tables.
#[derive(Parser)]
#[command(version, about, name = "farewatch")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/farewatch/farewatch.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// JSON configuration file; --database-file still takes precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the store if needed and report its tables
    Init,
    /// List the tables in the store
    Tables,
    /// Manage carriers
    #[command(alias = "c")]
    Carrier {
        #[command(subcommand)]
        command: CarrierCommands,
    },
    /// Manage airports
    #[command(alias = "a")]
    Airport {
        #[command(subcommand)]
        command: AirportCommands,
    },
    /// Manage routes and their layovers
    #[command(alias = "r")]
    Route {
        #[command(subcommand)]
        command: RouteCommands,
    },
    /// Record and query fare quotes
    #[command(alias = "q")]
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },
    /// Write a JSON batch of carriers, airports, routes and quotes in one
    /// transaction
    Import(ImportArgs),
}

/// Insert or update a carrier
#[derive(ClapArgs)]
pub struct UpsertCarrierArgs {
    #[arg(help = "Carrier ID")]
    pub id: u64,
    #[arg(help = "Carrier name")]
    pub name: String,
    #[arg(long, help = "ID of the parent carrier, which must already exist")]
    pub parent: Option<u64>,
    #[arg(long, help = "Country the carrier is based in")]
    pub country: Option<String>,
    #[arg(
        long = "flag",
        value_delimiter = ',',
        help = "Free-form flags as a comma-separated list"
    )]
    pub flags: Vec<String>,
}

impl From<UpsertCarrierArgs> for Carrier {
    fn from(val: UpsertCarrierArgs) -> Self {
        Carrier {
            id: val.id,
            name: val.name,
            parent_id: val.parent,
            country: val.country,
            flags: val.flags.into_iter().collect(),
        }
    }
}

#[derive(ClapArgs)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the record to show")]
    pub id: u64,
}

#[derive(Subcommand)]
pub enum CarrierCommands {
    /// Insert or update a carrier
    #[command(alias = "u")]
    Upsert(UpsertCarrierArgs),
    /// List all carriers
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a carrier and its parent chain
    #[command(alias = "s")]
    Show(IdArgs),
}

/// Insert or update an airport
#[derive(ClapArgs)]
pub struct UpsertAirportArgs {
    #[arg(help = "Airport ID")]
    pub id: u64,
    #[arg(help = "Airport name or code")]
    pub name: String,
    #[arg(long, help = "Country the airport is in")]
    pub country: Option<String>,
    #[arg(long, requires = "long", allow_hyphen_values = true, help = "Latitude in degrees")]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true, help = "Longitude in degrees")]
    pub long: Option<f64>,
}

impl From<UpsertAirportArgs> for Airport {
    fn from(val: UpsertAirportArgs) -> Self {
        Airport {
            id: val.id,
            name: val.name,
            country: val.country,
            latitude: val.lat,
            longitude: val.long,
        }
    }
}

#[derive(Subcommand)]
pub enum AirportCommands {
    /// Insert or update an airport
    #[command(alias = "u")]
    Upsert(UpsertAirportArgs),
    /// List all airports
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a single airport
    #[command(alias = "s")]
    Show(IdArgs),
}

/// Insert or update a route; the layover list replaces any stored one
#[derive(ClapArgs)]
pub struct UpsertRouteArgs {
    #[arg(help = "Route ID")]
    pub id: u64,
    #[arg(help = "Departure airport ID")]
    pub start: u64,
    #[arg(help = "Arrival airport ID")]
    pub end: u64,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Layover airport IDs in travel order, comma-separated"
    )]
    pub via: Vec<u64>,
}

impl From<UpsertRouteArgs> for Route {
    fn from(val: UpsertRouteArgs) -> Self {
        Route::new(val.id, val.start, val.end).with_layovers(val.via)
    }
}

#[derive(ClapArgs)]
pub struct ListRoutesArgs {
    #[arg(long, requires = "to", help = "Only routes departing from this airport")]
    pub from: Option<u64>,
    #[arg(long, requires = "from", help = "Only routes arriving at this airport")]
    pub to: Option<u64>,
}

#[derive(Subcommand)]
pub enum RouteCommands {
    /// Insert or update a route
    #[command(alias = "u")]
    Upsert(UpsertRouteArgs),
    /// List routes, optionally only those between two airports
    #[command(aliases = ["l", "ls"])]
    List(ListRoutesArgs),
    /// Show a route with its layovers
    #[command(alias = "s")]
    Show(IdArgs),
}

/// Record a fare quote
///
/// Times are RFC 3339 instants such as 2025-03-01T09:00:00Z. The quote time
/// defaults to now.
#[derive(ClapArgs)]
pub struct AddQuoteArgs {
    #[arg(long, help = "Route the quote is for")]
    pub route: u64,
    #[arg(long, help = "Carrier offering the fare")]
    pub carrier: u64,
    #[arg(long, help = "Departure time")]
    pub departs: Timestamp,
    #[arg(long, help = "Landing time")]
    pub lands: Timestamp,
    #[arg(long, help = "Fare amount")]
    pub price: f64,
    #[arg(long, help = "Three-letter currency code; the store default applies when omitted")]
    pub currency: Option<String>,
    #[arg(long, conflicts_with = "layover_minutes", help = "The fare is a direct flight")]
    pub direct: bool,
    #[arg(long, help = "Total layover time in minutes")]
    pub layover_minutes: Option<u32>,
    #[arg(long, help = "When the fare was observed")]
    pub quoted_at: Option<Timestamp>,
    #[arg(long, help = "Where the fare was observed")]
    pub source: String,
}

impl From<AddQuoteArgs> for NewQuote {
    fn from(val: AddQuoteArgs) -> Self {
        NewQuote {
            route_id: val.route,
            carrier_id: val.carrier,
            departure_time: val.departs,
            landing_time: val.lands,
            price: val.price,
            currency: val.currency,
            direct: val.direct,
            layover_minutes: val.layover_minutes,
            quote_time: val.quoted_at.unwrap_or_else(Timestamp::now),
            sourcing: val.source,
        }
    }
}

/// List quotes, oldest observation first unless --desc is given
#[derive(ClapArgs)]
pub struct ListQuotesArgs {
    #[arg(long, help = "Only quotes for this route")]
    pub route: Option<u64>,
    #[arg(long, help = "Only quotes from this carrier")]
    pub carrier: Option<u64>,
    #[arg(long, help = "Only quotes observed at or after this time")]
    pub since: Option<Timestamp>,
    #[arg(long, help = "Only quotes observed at or before this time")]
    pub until: Option<Timestamp>,
    #[arg(long, help = "Only quotes from this source")]
    pub source: Option<String>,
    #[arg(long, conflicts_with = "indirect", help = "Only direct quotes")]
    pub direct: bool,
    #[arg(long, help = "Only quotes with layovers")]
    pub indirect: bool,
    #[arg(long, help = "Newest observation first")]
    pub desc: bool,
    #[arg(long, help = "Return at most this many quotes")]
    pub limit: Option<u32>,
}

impl From<ListQuotesArgs> for QuoteFilter {
    fn from(val: ListQuotesArgs) -> Self {
        let direct = match (val.direct, val.indirect) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        QuoteFilter {
            route_id: val.route,
            carrier_id: val.carrier,
            quoted_after: val.since,
            quoted_before: val.until,
            sourcing: val.source,
            direct,
            order: if val.desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            },
            limit: val.limit,
        }
    }
}

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// Record a fare quote
    #[command(alias = "a")]
    Add(AddQuoteArgs),
    /// List quotes matching the given filters
    #[command(aliases = ["l", "ls"])]
    List(ListQuotesArgs),
    /// Show a single quote
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    #[arg(help = "Path of the JSON batch file")]
    pub file: PathBuf,
}
