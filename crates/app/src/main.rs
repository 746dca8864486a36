use std::fmt;
use std::sync::Arc;

use quiz_core::model::{QuestionBudget, QuizCatalog};
use quiz_core::{CatalogError, CatalogVariant};
use services::QuizSession;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod game;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBudget { raw: String },
    InvalidSeed { raw: String },
    InvalidCatalog { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBudget { raw } => {
                write!(f, "invalid --budget value: {raw} (must be a positive integer)")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidCatalog { raw } => {
                write!(f, "invalid --catalog value: {raw} (expected classic or extended)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play    [--catalog <classic|extended>] [--catalog-file <path>]");
    eprintln!("                              [--budget <n>] [--seed <u64>]");
    eprintln!("  cargo run -p app -- catalog [--catalog <classic|extended>] [--catalog-file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --catalog extended");
    eprintln!("  --budget 8");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG, QUIZ_CATALOG_FILE, QUIZ_BUDGET, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Catalog,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "catalog" => Some(Self::Catalog),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    variant: CatalogVariant,
    catalog_file: Option<String>,
    budget: QuestionBudget,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut variant = match std::env::var("QUIZ_CATALOG") {
            Ok(raw) => parse_variant(raw)?,
            Err(_) => CatalogVariant::default(),
        };
        let mut catalog_file = std::env::var("QUIZ_CATALOG_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty());
        let mut budget = match std::env::var("QUIZ_BUDGET") {
            Ok(raw) => parse_budget(raw)?,
            Err(_) => QuestionBudget::DEFAULT,
        };
        let mut seed = match std::env::var("QUIZ_SEED") {
            Ok(raw) => Some(parse_seed(raw)?),
            Err(_) => None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => variant = parse_variant(require_value(args, "--catalog")?)?,
                "--catalog-file" => catalog_file = Some(require_value(args, "--catalog-file")?),
                "--budget" => budget = parse_budget(require_value(args, "--budget")?)?,
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            variant,
            catalog_file,
            budget,
            seed,
        })
    }

    fn load_catalog(&self) -> Result<QuizCatalog, Box<dyn std::error::Error>> {
        match &self.catalog_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let catalog = QuizCatalog::from_json(&raw)?;
                info!(path = %path, sequences = catalog.sequences().len(), "loaded catalog file");
                Ok(catalog)
            }
            None => Ok(self.variant.build()?),
        }
    }

    /// Names where the catalog came from, for logs.
    fn catalog_source(&self) -> String {
        match &self.catalog_file {
            Some(path) => format!("file:{path}"),
            None => self.variant.to_string(),
        }
    }

    fn build_session(&self, catalog: Arc<QuizCatalog>) -> QuizSession {
        match self.seed {
            Some(seed) => QuizSession::with_seed(catalog, self.budget, seed),
            None => QuizSession::new(catalog, self.budget),
        }
    }
}

fn parse_variant(raw: String) -> Result<CatalogVariant, ArgsError> {
    raw.parse()
        .map_err(|_: CatalogError| ArgsError::InvalidCatalog { raw })
}

fn parse_budget(raw: String) -> Result<QuestionBudget, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|limit| QuestionBudget::new(limit).ok())
        .ok_or(ArgsError::InvalidBudget { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the game transcript.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let catalog = Arc::new(parsed.load_catalog()?);

    match cmd {
        Command::Play => {
            info!(
                catalog = %parsed.catalog_source(),
                budget = %parsed.budget,
                seeded = parsed.seed.is_some(),
                "starting quiz"
            );
            let mut session = parsed.build_session(catalog);

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            game::run(&mut session, stdin.lock(), stdout.lock())?;
            Ok(())
        }
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(catalog.as_ref())?);
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(catalog_file: Option<&str>, seed: Option<u64>) -> Args {
        Args {
            variant: CatalogVariant::Classic,
            catalog_file: catalog_file.map(str::to_owned),
            budget: QuestionBudget::new(3).unwrap(),
            seed,
        }
    }

    #[test]
    fn catalog_source_prefers_the_file() {
        assert_eq!(args(None, None).catalog_source(), CatalogVariant::Classic.to_string());
        assert_eq!(
            args(Some("custom.json"), None).catalog_source(),
            "file:custom.json"
        );
    }

    #[test]
    fn seeded_sessions_pick_the_same_sequence() {
        let parsed = args(None, Some(42));
        let catalog = Arc::new(parsed.load_catalog().unwrap());
        let mut first = parsed.build_session(Arc::clone(&catalog));
        let mut second = parsed.build_session(catalog);

        let a = first.start_round().unwrap().name().to_owned();
        let b = second.start_round().unwrap().name().to_owned();
        assert_eq!(a, b);
        assert_eq!(first.budget(), QuestionBudget::new(3).unwrap());
    }

    #[test]
    fn budget_and_seed_flags_are_parsed() {
        let mut argv = ["--budget", "5", "--seed", "7", "--catalog", "classic"]
            .into_iter()
            .map(str::to_owned);
        let parsed = Args::parse(&mut argv).unwrap();
        assert_eq!(parsed.budget, QuestionBudget::new(5).unwrap());
        assert_eq!(parsed.seed, Some(7));
        assert_eq!(parsed.variant, CatalogVariant::Classic);
    }

    #[test]
    fn zero_budget_flag_is_rejected() {
        let mut argv = ["--budget", "0"].into_iter().map(str::to_owned);
        assert!(matches!(
            Args::parse(&mut argv),
            Err(ArgsError::InvalidBudget { .. })
        ));
    }
}
