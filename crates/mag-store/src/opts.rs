//! Connection options for the `mag` database.

use clap::Args;

/// PostgreSQL connection options, flattened into both subcommands.
#[derive(Args, Clone, Debug)]
pub struct PgOpts {
    /// PostgreSQL host
    #[arg(long, default_value = "localhost", env = "MAG_DB_HOST")]
    pub db_host: String,

    /// PostgreSQL port
    #[arg(long, default_value = "5432", env = "MAG_DB_PORT")]
    pub db_port: u16,

    /// Database name
    #[arg(long, default_value = "mag", env = "MAG_DB_NAME")]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "MAG_DB_USER")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "MAG_DB_PASSWORD")]
    pub db_password: String,
}

impl PgOpts {
    /// Build the tokio-postgres connection configuration.
    pub fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.db_host)
            .port(self.db_port)
            .dbname(&self.db_name)
            .user(&self.db_user)
            .password(&self.db_password);
        config
    }
}
