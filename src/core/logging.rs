use std::ops::Add;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::FmtSubscriber;

/// How chatty the diagnostics on stderr are, relative to warnings.
///
/// Each `v` raises it by one, each `q` lowers it by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(i32);

impl Verbosity {
    pub fn new(offset: i32) -> Self {
        Verbosity(offset)
    }

    /// From the number of `-v` and `-q` flags.
    pub fn from_counts(verbose: u64, quiet: u64) -> Self {
        let clamp = |n: u64| n.min(i32::max_value() as u64) as i32;
        Verbosity(clamp(verbose)) + Verbosity(-clamp(quiet))
    }

    pub fn offset(self) -> i32 {
        self.0
    }

    /// The most detailed level that is still shown.
    ///
    /// ```
    /// # use sphere::Verbosity;
    /// use tracing::level_filters::LevelFilter;
    /// assert_eq!(Verbosity::default().level(), LevelFilter::WARN);
    /// assert_eq!("vv".parse::<Verbosity>().unwrap().level(), LevelFilter::DEBUG);
    /// assert_eq!("qq".parse::<Verbosity>().unwrap().level(), LevelFilter::OFF);
    /// ```
    pub fn level(self) -> LevelFilter {
        match self.0 {
            i32::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

impl Add for Verbosity {
    type Output = Verbosity;

    fn add(self, other: Verbosity) -> Verbosity {
        Verbosity(self.0.saturating_add(other.0))
    }
}

/// A word of `v` and `q` characters, e.g. `vv`.
impl FromStr for Verbosity {
    type Err = failure::Error;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        word.chars().try_fold(Verbosity::default(), |verbosity, c| {
            Ok(verbosity
                + match c {
                    'v' | 'V' => Verbosity(1),
                    'q' | 'Q' => Verbosity(-1),
                    _ => bail!("verbosity may only contain `v` and `q`, got: {:?}", word),
                })
        })
    }
}

/// Where and how much to log.
///
/// Diagnostics always go to stderr,
/// so that stdout only ever carries the result line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    verbosity: Verbosity,
    ansi: bool,
}

impl LogConfig {
    pub fn new(verbosity: Verbosity) -> Self {
        LogConfig {
            verbosity,
            ansi: false,
        }
    }

    /// Colorize the output, e.g. when stderr is a terminal.
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        FmtSubscriber::builder()
            .with_max_level(self.verbosity.level())
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(self.ansi)
            .finish()
    }

    /// Run `f` with this configuration as the active subscriber.
    /// Nothing is installed globally.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::subscriber::with_default(self.subscriber(), f)
    }
}
