//! Command handlers.
//!
//! Every handler runs its work through [`FareStore::with_database`], so each
//! command gets a fresh connection and busy retries, then renders the
//! result's markdown `Display` output.

use std::fs;

use anyhow::{Context, Result};
use farewatch_core::{
    display::{Airports, Carriers, OperationStatus, Quotes, Routes, Tables},
    Airport, Carrier, FareBatch, FareStore, NewQuote, QuoteFilter, Route,
};
use log::debug;

use crate::{
    args::{
        AirportCommands, CarrierCommands, ImportArgs, ListRoutesArgs, QuoteCommands,
        RouteCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    store: FareStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: FareStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn init(&self) -> Result<()> {
        let tables = self.store.with_database(|db| db.list_tables())?;
        self.renderer.render(
            &OperationStatus::success(format!(
                "Fare store ready at {}",
                self.store.config().database.display()
            ))
            .to_string(),
        )?;
        self.renderer.render(&Tables(tables).to_string())
    }

    pub fn list_tables(&self) -> Result<()> {
        let tables = self.store.with_database(|db| db.list_tables())?;
        self.renderer.render(&Tables(tables).to_string())
    }

    pub fn handle_carrier_command(&self, command: CarrierCommands) -> Result<()> {
        match command {
            CarrierCommands::Upsert(args) => {
                let carrier: Carrier = args.into();
                self.store
                    .with_database(|db| db.upsert_carrier(&carrier))
                    .with_context(|| format!("Failed to save carrier {}", carrier.id))?;
                self.renderer.render(&carrier.to_string())
            }
            CarrierCommands::List => {
                let carriers = self.store.with_database(|db| db.list_carriers())?;
                self.renderer.render(&Carriers(carriers).to_string())
            }
            CarrierCommands::Show(args) => {
                let found = self.store.with_database(|db| {
                    match db.get_carrier(args.id)? {
                        Some(carrier) => Ok(Some((carrier, db.carrier_ancestors(args.id)?))),
                        None => Ok(None),
                    }
                })?;
                match found {
                    Some((carrier, ancestors)) => {
                        self.renderer.render(&carrier.to_string())?;
                        if !ancestors.is_empty() {
                            self.renderer.render("### Parent chain\n\n")?;
                            self.renderer.render(&Carriers(ancestors).to_string())?;
                        }
                        Ok(())
                    }
                    None => not_found("Carrier", args.id),
                }
            }
        }
    }

    pub fn handle_airport_command(&self, command: AirportCommands) -> Result<()> {
        match command {
            AirportCommands::Upsert(args) => {
                let airport: Airport = args.into();
                self.store
                    .with_database(|db| db.upsert_airport(&airport))
                    .with_context(|| format!("Failed to save airport {}", airport.id))?;
                self.renderer.render(&airport.to_string())
            }
            AirportCommands::List => {
                let airports = self.store.with_database(|db| db.list_airports())?;
                self.renderer.render(&Airports(airports).to_string())
            }
            AirportCommands::Show(args) => {
                match self.store.with_database(|db| db.get_airport(args.id))? {
                    Some(airport) => self.renderer.render(&airport.to_string()),
                    None => not_found("Airport", args.id),
                }
            }
        }
    }

    pub fn handle_route_command(&self, command: RouteCommands) -> Result<()> {
        match command {
            RouteCommands::Upsert(args) => {
                let route: Route = args.into();
                self.store
                    .with_database(|db| db.upsert_route(&route))
                    .with_context(|| format!("Failed to save route {}", route.id))?;
                self.renderer.render(&route.to_string())
            }
            RouteCommands::List(args) => self.list_routes(&args),
            RouteCommands::Show(args) => {
                match self.store.with_database(|db| db.get_route(args.id))? {
                    Some(route) => self.renderer.render(&route.to_string()),
                    None => not_found("Route", args.id),
                }
            }
        }
    }

    pub fn list_routes(&self, args: &ListRoutesArgs) -> Result<()> {
        let routes = self.store.with_database(|db| match (args.from, args.to) {
            (Some(start), Some(end)) => db.routes_between(start, end),
            _ => db.list_routes(),
        })?;
        self.renderer.render(&Routes(routes).to_string())
    }

    pub fn handle_quote_command(&self, command: QuoteCommands) -> Result<()> {
        match command {
            QuoteCommands::Add(args) => {
                let quote: NewQuote = args.into();
                let stored = self
                    .store
                    .with_database(|db| db.insert_quote(&quote))
                    .context("Failed to record quote")?;
                self.renderer.render(&stored.to_string())
            }
            QuoteCommands::List(args) => {
                let filter: QuoteFilter = args.into();
                debug!("Listing quotes with {filter:?}");
                let quotes = self
                    .store
                    .with_database(|db| db.query_quotes(&filter)?.fetch_all())?;
                self.renderer.render(&Quotes(quotes).to_string())
            }
            QuoteCommands::Show(args) => {
                match self.store.with_database(|db| db.get_quote(args.id))? {
                    Some(quote) => self.renderer.render(&quote.to_string()),
                    None => not_found("Quote", args.id),
                }
            }
        }
    }

    pub fn import(&self, args: ImportArgs) -> Result<()> {
        let contents = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let batch: FareBatch = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse batch file {}", args.file.display()))?;

        if batch.is_empty() {
            return self
                .renderer
                .render(&OperationStatus::success("Nothing to import.").to_string());
        }

        let summary = self
            .store
            .with_database(|db| db.write_batch(&batch))
            .context("Import failed; nothing was written")?;
        self.renderer.render(&summary.to_string())
    }
}

fn not_found(entity: &str, id: u64) -> Result<()> {
    anyhow::bail!("{entity} with ID {id} not found")
}
