extern crate ssv;

use ssv::debug_eprintln;
use ssv::error::{Error, Result};

fn main() {
    let matches = ssv::cli::parse_flags();
    ssv::utils::initialize_debug_from_args(&matches);

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        // Field-level detail goes to the debug sink, not the short message.
        if let Error::SaveError(silksave::Error::Validation(ref violations)) = err {
            for violation in violations {
                debug_eprintln!("  {}", violation);
            }
        }
        std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("show", Some(cmd)) => {
            let save = ssv::utils::load_save(matches)?;
            match cmd.subcommand() {
                ("flags", Some(sub)) => ssv::show::flags(&save, sub.value_of("scene")),
                ("summary", Some(_)) | ("", None) => ssv::show::summary(&save),
                _ => {
                    println!("Invalid 'show' subcommand. Use --help for details.");
                    Ok(())
                }
            }
        }
        ("decode", Some(cmd)) => {
            let path = ssv::utils::require_path(matches)?;
            ssv::decode::run(path, cmd.value_of("out"))
        }
        ("check", Some(cmd)) => {
            let save = ssv::utils::load_save(matches)?;
            let items = cmd
                .value_of("items")
                .ok_or_else(|| Error::CliInputError("--items is required".to_string()))?;
            ssv::check::run(&save, items)
        }
        _ => {
            println!("No subcommand given. Use --help for details.");
            Ok(())
        }
    }
}
