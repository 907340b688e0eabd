// SPDX-License-Identifier: MPL-2.0
use plant_doctor::app::{self, Flags};
use std::path::PathBuf;

const HELP: &str = "\
PlantDoctor - plant disease checker

USAGE:
  plant_doctor [OPTIONS] [IMAGE]

OPTIONS:
  -h, --help                 Print this help and exit
  --lang <LOCALE>            Interface language (e.g. en-US, fr)
  --i18n-dir <DIR>           Directory with extra .ftl translations
  --config-dir <DIR>         Directory holding settings.toml
  --data-dir <DIR>           Directory holding state.cbor
  --diagnostics-out <FILE>   Write the diagnostics log as JSON on exit

ARGS:
  <IMAGE>                    Image to preselect on startup
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let lang = args.opt_value_from_str("--lang")?;
    let i18n_dir = args.opt_value_from_str("--i18n-dir")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let diagnostics_out: Option<PathBuf> = args.opt_value_from_str("--diagnostics-out")?;

    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Flags {
        lang,
        file_path,
        i18n_dir,
        data_dir,
        config_dir,
        diagnostics_out,
    })
}
