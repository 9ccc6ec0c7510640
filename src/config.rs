use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Runtime settings for the item service. Flags win over environment variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "item_store")]
#[command(about = "Serve a flat-file collection of named items over HTTP")]
pub struct Config {
    /// JSON file holding the collection. Created on first write.
    #[arg(long, env = "ITEMS_DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,

    /// Address the HTTP listener binds to.
    #[arg(long = "bind", env = "ITEMS_BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind_addr: SocketAddr,
}
