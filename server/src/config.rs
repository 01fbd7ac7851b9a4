use std::net::SocketAddr;
use std::path::PathBuf;

/// Where the service listens and which files it owns.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON array of todos, rewritten in full on every mutation.
    pub todos_file: PathBuf,
    /// Append-only request audit log.
    pub log_file: PathBuf,
}

pub const DEFAULT_PORT: u16 = 3000;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            todos_file: PathBuf::from("todos.json"),
            log_file: PathBuf::from("logs.txt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.todos_file, PathBuf::from("todos.json"));
        assert_eq!(c.log_file, PathBuf::from("logs.txt"));
    }
}
