use structopt::StructOpt;

mod cli;

use cli::commands::Command;
use cli::Chessbot;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    chessbot::instrumentation::init_tracing();

    Chessbot::from_args().execute();
}
