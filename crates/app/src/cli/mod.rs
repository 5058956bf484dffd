use clap::{Parser, Subcommand};
use jiff::Timestamp;

mod db;
mod order;
mod premium;
mod session;

#[derive(Debug, Parser)]
#[command(name = "tiffin-app", about = "Tiffin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Session(session::SessionCommand),
    Premium(premium::PremiumCommand),
    Order(order::OrderCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Session(command) => session::run(command).await,
            Commands::Premium(command) => premium::run(command).await,
            Commands::Order(command) => order::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

fn parse_timestamp(name: &str, raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid {name} timestamp: {error}"))
    })
    .transpose()
}
