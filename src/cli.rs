use clap::{value_parser, Arg, ArgAction, Command};
use pollkit::image::AspectRatio;

pub fn build_cli() -> Command {
    Command::new("pollkit")
        .about("Front-end helpers for the electoral statistics site")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .global(true)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("optimize")
                .about("Print the delivery-optimized URL for an image")
                .arg(Arg::new("url").required(true))
                .arg(
                    Arg::new("width")
                        .long("width")
                        .short('w')
                        .num_args(1)
                        .value_parser(value_parser!(u32))
                        .help("Target pixel width"),
                ),
        )
        .subcommand(
            Command::new("srcset")
                .about("Print a responsive srcset for an image")
                .arg(Arg::new("url").required(true)),
        )
        .subcommand(
            Command::new("placeholder")
                .about("Print the placeholder data URI for an aspect ratio")
                .arg(
                    Arg::new("kind")
                        .value_parser(|s: &str| s.parse::<AspectRatio>())
                        .help("square, video (default) or wide"),
                ),
        )
        .subcommand(
            Command::new("subscribe")
                .about("Subscribe an address to the newsletter")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .num_args(1)
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .num_args(1)
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("debounce")
                .about("Echo stdin lines that survive debouncing")
                .arg(
                    Arg::new("wait-ms")
                        .long("wait-ms")
                        .num_args(1)
                        .required(true)
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("throttle")
                .about("Echo the leading stdin line of each throttle window")
                .arg(
                    Arg::new("limit-ms")
                        .long("limit-ms")
                        .num_args(1)
                        .required(true)
                        .value_parser(value_parser!(u64)),
                ),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level wins over RUST_LOG; default is info. Output goes to stderr.
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.init();
}
