// SPDX-License-Identifier: MPL-2.0
use emotion_lens::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
const LOG_ENV: &str = "EMOTION_LENS_LOG";
const DEFAULT_LOG_FILTER: &str = "emotion_lens=info";

const HELP: &str = "\
EmotionLens - facial emotion detection

USAGE:
  emotion_lens [OPTIONS] [IMAGE]

OPTIONS:
  --lang <TAG>         Interface language (e.g. en-US, fr)
  --config-dir <DIR>   Directory holding settings.toml
  --endpoint <URL>     Classifier endpoint for this run
  -h, --help           Print this help
";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let endpoint = args.opt_value_from_str("--endpoint")?;
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Some(Flags {
        lang,
        file_path,
        endpoint,
        config_dir,
    }))
}

fn main() -> iced::Result {
    init_logging();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    tracing::debug!(?flags, "starting");

    app::run(flags)
}
