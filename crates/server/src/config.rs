//! Process configuration
//!
//! The listen address is the only runtime setting. It comes from command
//! line flags, falling back to the `HOST` / `PORT` environment variables
//! (a `.env` file is loaded first) and then to the defaults below.

use clap::Parser;
use std::net::{AddrParseError, IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5005;

#[derive(Debug, Clone, Parser)]
#[command(name = "forecast-server")]
#[command(about = "Per-request LSTM forecasting service", long_about = None)]
pub struct ServeArgs {
    /// IP address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
