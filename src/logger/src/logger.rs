use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use log::Level;
use env_logger::{Builder, Env, fmt::Color};
use std::io::Write;
use once_cell::sync::OnceCell;

/// Environment variable overriding the command line verbosity (e.g. `HEREDITY_LOG=inference=trace`)
pub const LOG_ENV_VAR: &str = "HEREDITY_LOG";

static INSTANCE: OnceCell<Logger> = OnceCell::new();

/// Global logger. Log records are routed through a shared `MultiProgress`, so that the
/// enumeration progress bars do not get clobbered by log lines.
#[derive(Debug)]
pub struct Logger {
    multi_pg: MultiProgress,
}

impl Logger {

    /// Initialize the global logger.
    /// # Arguments
    /// - `verbosity`: 0 = Error | 1 = Warn | 2 = Info | 3 = Debug | 4+ = Trace
    ///
    /// Subsequent calls only update the maximum log level.
    pub fn init(verbosity: u8) {
        let log_level = Self::u8_to_loglevel(verbosity);
        if INSTANCE.get().is_some() {
            Self::set_level(verbosity);
            return
        }

        let env = Env::default()
            .filter(LOG_ENV_VAR);

        let logger = Builder::new().filter_level(log_level)
            .format(|buf, record| {
                // ---- Errors carry the location they were logged from, in bold.
                let (traceback, set_intensity) = match record.level() {
                    Level::Error => {
                        let traceback = format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0));
                        (traceback, true)
                    },
                    _ => (String::new(), false),
                };

                let mut arg_style = buf.style();
                arg_style.set_intense(set_intensity);

                let mut level_style = buf.style();
                let color = match record.level() {
                    Level::Error => Color::Red,
                    Level::Warn  => Color::Yellow,
                    Level::Info  => Color::Green,
                    Level::Debug => Color::Blue,
                    Level::Trace => Color::Cyan
                };
                level_style.set_color(color).set_bold(true);

                writeln!(
                    buf,
                    "[{} {: <5} {}] {traceback}{}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    level_style.value(record.level()),
                    record.target(),
                    arg_style.value(record.args())
                )
            })
            .parse_env(env)
            .build();
        let max_level = logger.filter();

        let multi_pg = MultiProgress::new();
        if let Err(e) = LogWrapper::new(multi_pg.clone(), logger).try_init() {
            eprintln!("Failed to initialize logger: {e}");
            return
        }
        log::set_max_level(max_level);
        let _ = INSTANCE.set(Self{multi_pg});
    }

    fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
        match verbosity {
            0            => LevelFilter::Error,
            1            => LevelFilter::Warn,
            2            => LevelFilter::Info,
            3            => LevelFilter::Debug,
            4..= u8::MAX => LevelFilter::Trace
        }
    }

    pub fn set_level(verbosity: u8) {
        log::set_max_level(Self::u8_to_loglevel(verbosity));
    }

    /// Access the shared `MultiProgress`, if the logger was initialized.
    pub fn multi() -> Option<&'static MultiProgress> {
        INSTANCE.get().map(|logger| &logger.multi_pg)
    }
}
