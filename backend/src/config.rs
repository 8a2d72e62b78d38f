use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub playoffs: PlayoffRounds,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub rust_log: String,
}

/// Round numbers reserved for the two playoff stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoffRounds {
    pub cut_round: i32,
    pub finals_round: i32,
}

impl Default for PlayoffRounds {
    fn default() -> Self {
        Self {
            cut_round: 100,
            finals_round: 101,
        }
    }
}

impl PlayoffRounds {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.cut_round == self.finals_round {
            anyhow::bail!(
                "PLAYOFF_CUT_ROUND and PLAYOFF_FINALS_ROUND must differ (both {})",
                self.cut_round
            );
        }
        if self.cut_round < 1 || self.finals_round < 1 {
            anyhow::bail!("playoff round numbers must be positive");
        }
        Ok(())
    }
}

fn var_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => Ok(value.parse()?),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let max_connections: u32 = var_or("DATABASE_MAX_CONNECTIONS", 5)?;
        let port: u16 = var_or("PORT", 8080)?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let defaults = PlayoffRounds::default();
        let playoffs = PlayoffRounds {
            cut_round: var_or("PLAYOFF_CUT_ROUND", defaults.cut_round)?,
            finals_round: var_or("PLAYOFF_FINALS_ROUND", defaults.finals_round)?,
        };
        playoffs.validate()?;

        Ok(Config {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            server: ServerConfig { port, host, rust_log },
            playoffs,
        })
    }
}
