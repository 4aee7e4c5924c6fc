use clap::Parser;
use filecat::args::Args;
use std::process;

fn main() {
    dotenvy::dotenv().ok();
    filecat::logger::initialize_logger();

    // Help requests exit through the same non-zero path as usage errors.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            process::exit(2);
        }
    };

    if let Err(err) = filecat::run(args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
