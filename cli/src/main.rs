mod commands;
mod http;
mod terminal;

use commands::{CommandLine, Commands, discover, interfaces, serve};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(cfg.quiet);

    match commands.command {
        Commands::Discover => {
            print::header("getting ready for discovery", cfg.quiet);
            discover::discover(&cfg).await
        }
        Commands::Interfaces => interfaces::interfaces(&cfg),
        Commands::Serve { host, port } => {
            print::header("starting http server", cfg.quiet);
            serve::serve(host, port, &cfg).await
        }
    }
}
