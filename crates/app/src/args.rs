use std::fmt;
use std::path::{Path, PathBuf};

use flash_core::filter::StrengthFilter;
use flash_core::quiz::DEFAULT_TIMER_SECONDS;

pub const DEFAULT_DB_URL: &str = "sqlite://flashcards.sqlite3";
pub const MEMORY_DB_URL: &str = "sqlite::memory:";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFlag { flag: &'static str, command: Command },
    UnknownArg(String),
    UnexpectedFlag { flag: String, command: Command },
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidFilter { raw: String },
    InvalidSeconds { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { flag, command } => {
                write!(f, "{command} requires {flag}")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnexpectedFlag { flag, command } => {
                write!(f, "{flag} is not accepted by {command}")
            }
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidFilter { raw } => {
                write!(f, "invalid --filter value: {raw} (expected all, strong or weak)")
            }
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --seconds value: {raw}"),
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

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app quiz   [--db <url>] [--subject <id>] [--chapter <id>] [--filter all|strong|weak]");
    eprintln!("             [--timer] [--seconds <n>]");
    eprintln!("  app study  [--db <url>] [--subject <id>] [--chapter <id>] [--filter all|strong|weak]");
    eprintln!("  app list   [--db <url>] [--subject <id>] [--chapter <id>] [--filter all|strong|weak]");
    eprintln!("  app create [--db <url>] --subject <id> --chapter <id> --question <text> --answer <text>");
    eprintln!("  app stats  [--db <url>]");
    eprintln!("  app seed   [--db <url>] [--force]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --seconds {DEFAULT_TIMER_SECONDS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASH_DB_URL, FLASH_QUIZ_SECONDS, FLASH_LOG (default: warn)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quiz,
    Study,
    List,
    Create,
    Stats,
    Seed,
}

impl Command {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "study" => Some(Self::Study),
            "list" => Some(Self::List),
            "create" => Some(Self::Create),
            "stats" => Some(Self::Stats),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Study => "study",
            Self::List => "list",
            Self::Create => "create",
            Self::Stats => "stats",
            Self::Seed => "seed",
        }
    }

    fn accepts(self, flag: &str) -> bool {
        match flag {
            "--db" => true,
            "--subject" | "--chapter" => !matches!(self, Self::Stats | Self::Seed),
            "--filter" => matches!(self, Self::Quiz | Self::Study | Self::List),
            "--timer" | "--seconds" => self == Self::Quiz,
            "--question" | "--answer" => self == Self::Create,
            "--force" => self == Self::Seed,
            _ => false,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub db_url: String,
    pub subject: Option<String>,
    pub chapter: Option<String>,
    pub filter: StrengthFilter,
    pub timer: bool,
    pub seconds: u32,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub force: bool,
}

impl Args {
    /// Parse the arguments following the subcommand. `env` looks up
    /// environment fallbacks.
    pub fn parse(
        command: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("FLASH_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut seconds = match env("FLASH_QUIZ_SECONDS") {
            Some(raw) => parse_seconds(raw)?,
            None => DEFAULT_TIMER_SECONDS,
        };
        let mut parsed = Self {
            command,
            db_url: String::new(),
            subject: None,
            chapter: None,
            filter: StrengthFilter::All,
            timer: false,
            seconds: 0,
            question: None,
            answer: None,
            force: false,
        };

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                print_usage();
                std::process::exit(0);
            }
            if !command.accepts(&arg) {
                if Command::Quiz.accepts(&arg)
                    || Command::Create.accepts(&arg)
                    || Command::Seed.accepts(&arg)
                {
                    return Err(ArgsError::UnexpectedFlag { flag: arg, command });
                }
                return Err(ArgsError::UnknownArg(arg));
            }
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--subject" => parsed.subject = Some(require_value(args, "--subject")?),
                "--chapter" => parsed.chapter = Some(require_value(args, "--chapter")?),
                "--filter" => {
                    let value = require_value(args, "--filter")?;
                    parsed.filter = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidFilter { raw: value.clone() })?;
                }
                "--timer" => parsed.timer = true,
                "--seconds" => seconds = parse_seconds(require_value(args, "--seconds")?)?,
                "--question" => parsed.question = Some(require_value(args, "--question")?),
                "--answer" => parsed.answer = Some(require_value(args, "--answer")?),
                "--force" => parsed.force = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if command == Command::Create {
            for (flag, value) in [
                ("--subject", &parsed.subject),
                ("--chapter", &parsed.chapter),
                ("--question", &parsed.question),
                ("--answer", &parsed.answer),
            ] {
                if value.is_none() {
                    return Err(ArgsError::MissingFlag { flag, command });
                }
            }
        }

        parsed.db_url = db_url;
        parsed.seconds = seconds;
        Ok(parsed)
    }
}

fn parse_seconds(raw: String) -> Result<u32, ArgsError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ArgsError::InvalidSeconds { raw }),
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == MEMORY_DB_URL || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist so the pool can open it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == MEMORY_DB_URL {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
