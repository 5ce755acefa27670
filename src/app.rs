use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::gitlab::Client;
use crate::sweep::Sweeper;

pub struct AppContext {
    pub config: Config,
    pub sweeper: Sweeper,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli)?;
        let client = Client::new(&config)?;
        Ok(Self {
            sweeper: Sweeper::new(client),
            config,
            verbosity: cli.verbose,
        })
    }
}
