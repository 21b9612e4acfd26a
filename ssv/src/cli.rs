use clap;

pub fn parse_flags<'a>() -> clap::ArgMatches<'a> {
    clap::App::new("ssv")
        .version(clap::crate_version!())
        .about("Command line viewer for Hollow Knight: Silksong save files")
        .arg(clap::Arg::from_usage("-d --debug 'Enable debug output'").global(true))
        .arg(
            clap::Arg::from_usage(
                "-p, --path [path] 'Path to the save file (.dat, or decrypted .json)'",
            )
            .global(true),
        )
        .subcommand(
            clap::SubCommand::with_name("show")
                .about("Display save file contents")
                .subcommand(
                    clap::SubCommand::with_name("summary")
                        .about("Show mode, completion, play time, rosaries and shell shards"),
                )
                .subcommand(
                    clap::SubCommand::with_name("flags")
                        .about("Dump the scene flag index")
                        .arg(clap::Arg::from_usage(
                            "-s --scene [scene] 'Only show flags of this scene'",
                        )),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("decode")
                .about("Decrypt the save file and print its JSON")
                .arg(clap::Arg::from_usage(
                    "-o --out [file] 'Write the JSON to a file instead of stdout'",
                )),
        )
        .subcommand(
            clap::SubCommand::with_name("check")
                .about("Resolve configured items against the save")
                .arg(
                    clap::Arg::from_usage("-i --items <items> 'Path to an item config JSON file'")
                        .required(true),
                ),
        )
        .get_matches()
}
