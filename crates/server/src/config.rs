//! Server configuration from command-line arguments and environment.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// Command-line arguments for the server
#[derive(Parser, Debug, Clone)]
#[command(name = "server")]
#[command(about = "Music genre recommendation service")]
#[command(version)]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5000, env = "PORT")]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: IpAddr,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
