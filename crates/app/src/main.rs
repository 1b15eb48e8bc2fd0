use std::io::Write;

use flash_core::filter::{CardSelection, filter_cards};
use flash_core::model::{CardDraft, CardError, ChapterId, Subject, SubjectId};
use flash_core::quiz::{QuizConfig, QuizStats};
use services::{AppServices, CardStoreError, Clock, ProfileStats};
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod args;
mod quiz_screen;
mod render;
mod study_screen;

use args::{Args, ArgsError, Command, MEMORY_DB_URL, prepare_sqlite_file, print_usage};

fn init_logging() {
    let filter = EnvFilter::try_from_env("FLASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn selection_for(args: &Args, subjects: &[Subject]) -> CardSelection {
    let mut selection = CardSelection::all().with_strength(args.filter);
    selection.select_subject(args.subject.clone().map(SubjectId::new));
    if let Some(chapter) = &args.chapter {
        selection.select_chapter(subjects, ChapterId::new(chapter.clone()));
    }
    selection
}

async fn open_services(db_url: &str) -> Result<AppServices, Box<dyn std::error::Error>> {
    let clock = Clock::system();
    // Every pooled connection would get its own private in-memory database.
    if db_url == MEMORY_DB_URL {
        return Ok(AppServices::in_memory(clock));
    }
    prepare_sqlite_file(db_url)?;
    let services = AppServices::new_sqlite(db_url, clock).await?;
    info!(db = db_url, "storage ready");
    Ok(services)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // A bare flag list runs the quiz.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Quiz,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Quiz,
        Some(first) => {
            let cmd = Command::from_arg(first).ok_or_else(|| {
                print_usage();
                ArgsError::UnknownCommand(first.to_string())
            })?;
            argv.remove(0);
            cmd
        }
    };
    debug!(command = %cmd, "starting");

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = open_services(&parsed.db_url).await?;
    let store = services.card_store();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Quiz => {
            let mut library = store.load_all().await?;
            let selection = selection_for(&parsed, &library.subjects);
            let config = QuizConfig {
                timer_enabled: parsed.timer,
                timer_seconds: parsed.seconds,
            };
            let input = BufReader::new(tokio::io::stdin());
            quiz_screen::run_quiz(
                &services.quiz_loop(),
                &mut library,
                &selection,
                config,
                input,
                &mut out,
            )
            .await
        }
        Command::Study => {
            let mut library = store.load_all().await?;
            let selection = selection_for(&parsed, &library.subjects);
            let input = BufReader::new(tokio::io::stdin());
            study_screen::run_study(&services.study(), &mut library, &selection, input, &mut out)
                .await
        }
        Command::List => {
            let library = store.load_all().await?;
            let selection = selection_for(&parsed, &library.subjects);
            let cards = filter_cards(&library.cards, &selection, &library.strong_topics);
            render::card_list(&mut out, &library, &cards, &selection)?;
            Ok(())
        }
        Command::Create => {
            let mut library = store.load_all().await?;
            let draft = CardDraft::new(
                parsed.question.clone().unwrap_or_default(),
                parsed.answer.clone().unwrap_or_default(),
                SubjectId::new(parsed.subject.clone().unwrap_or_default()),
                ChapterId::new(parsed.chapter.clone().unwrap_or_default()),
            );
            match store.create(&mut library, draft).await {
                Ok(card) => {
                    writeln!(out, "Flashcard created successfully ({})", card.id)?;
                    Ok(())
                }
                Err(CardStoreError::Card(err)) => {
                    if matches!(err, CardError::EmptyQuestion | CardError::EmptyAnswer) {
                        writeln!(out, "Please fill out all fields")?;
                    }
                    Err(err.into())
                }
                Err(err) => Err(err.into()),
            }
        }
        Command::Stats => {
            let library = store.load_all().await?;
            let stats = ProfileStats::from_parts(&library, &QuizStats::default());
            render::profile(&mut out, &stats, library.cards.len())?;
            Ok(())
        }
        Command::Seed => {
            if store.seed_defaults(parsed.force).await? {
                writeln!(out, "seeded default flashcards into {}", parsed.db_url)?;
            } else {
                writeln!(
                    out,
                    "{} already has data; pass --force to overwrite",
                    parsed.db_url
                )?;
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
