//! Terminal front end for QuduratPrep.
//!
//! Talks to a running `qudurat-prep` server by default, or calls the model
//! directly with `--embedded`.

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::{Arc, Mutex},
};

use clap::{Parser, Subcommand};
use qudurat_prep::{
    app_state::AppState,
    client::{
        dashboard::RECENT_HISTORY_LEN, Advance, CancelToken, Dashboard, HttpPrepClient,
        LessonViewer, LocalBackend, Mode, PrepBackend, QuizResult,
    },
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{settings::DEFAULT_QUESTION_COUNT, Category, Difficulty, LessonItem},
    repositories::{HistoryRepository, JsonFileStore, KeyValueStore, SettingsRepository},
};

/// Practice for the verbal section of the Qudurat exam.
#[derive(Parser, Debug)]
#[command(name = "qudurat")]
#[command(version, about, long_about = None)]
struct Args {
    /// Call the model in-process instead of going through the HTTP server
    #[arg(long, global = true)]
    embedded: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show recent results, the current difficulty and the categories
    Dashboard,
    /// Take a generated quiz
    Quiz {
        /// Category label or slug, e.g. "analogy" or "odd-one-out"
        #[arg(value_parser = parse_category)]
        category: Category,

        /// Number of questions (5, 10, 15 or 20)
        #[arg(short = 'n', long, default_value_t = DEFAULT_QUESTION_COUNT)]
        count: u32,
    },
    /// Read a lesson and work through its practice questions
    Lesson {
        #[arg(value_parser = parse_category)]
        category: Category,
    },
    /// Show or change the stored difficulty
    Settings {
        /// "High School", "College" or "Academic"
        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
    },
}

fn parse_category(value: &str) -> Result<Category, String> {
    let wanted = value.trim().to_ascii_lowercase();
    Category::ALL
        .into_iter()
        .find(|c| {
            let label = c.label().to_ascii_lowercase();
            label == wanted || label.replace(' ', "-") == wanted
        })
        .ok_or_else(|| {
            let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
            format!("expected one of: {}", labels.join(", "))
        })
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    let wanted = value.trim();
    Difficulty::ALL
        .into_iter()
        .find(|d| d.label().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();
            format!("expected one of: {}", labels.join(", "))
        })
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Cancelled) => {
            eprintln!("Cancelled.");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> AppResult<()> {
    let config = Config::from_env();

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.data_dir)?);
    log::debug!("Using local store in {}", config.data_dir.display());
    let history = HistoryRepository::new(store.clone(), config.history_limit);
    let settings = SettingsRepository::new(store);
    let mut dashboard = Dashboard::mount(history, settings)?;

    match args.command {
        Command::Dashboard => {
            print_dashboard(&dashboard);
            Ok(())
        }
        Command::Settings { difficulty } => {
            if let Some(difficulty) = difficulty {
                dashboard.save_difficulty(difficulty)?;
            }
            println!("Difficulty: {}", dashboard.difficulty());
            Ok(())
        }
        Command::Quiz { category, count } => {
            let backend = backend(&config, args.embedded)?;
            let interrupts = InterruptGuard::new();
            interrupts.install();
            run_quiz(&mut dashboard, backend.as_ref(), &interrupts, category, count).await
        }
        Command::Lesson { category } => {
            let backend = backend(&config, args.embedded)?;
            let interrupts = InterruptGuard::new();
            interrupts.install();
            run_lesson(backend.as_ref(), &interrupts, category).await
        }
    }
}

fn backend(config: &Config, embedded: bool) -> AppResult<Box<dyn PrepBackend>> {
    if embedded {
        config.validate()?;
        let state = AppState::new(config.clone());
        return Ok(Box::new(LocalBackend::from(&state)));
    }
    Ok(Box::new(HttpPrepClient::new(
        config.api_url.clone(),
        config.client_timeout(),
    )?))
}

/// Routes Ctrl-C. During a fetch it cancels that fetch; at any other time
/// it exits the process.
#[derive(Clone, Default)]
struct InterruptGuard {
    active: Arc<Mutex<Option<CancelToken>>>,
}

impl InterruptGuard {
    fn new() -> Self {
        Self::default()
    }

    fn install(&self) {
        let guard = self.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if !guard.interrupt() {
                    eprintln!("\nInterrupted.");
                    std::process::exit(130);
                }
            }
        });
    }

    /// Token for a fetch that is about to start.
    fn begin_fetch(&self) -> CancelToken {
        let token = CancelToken::new();
        *self.slot() = Some(token.clone());
        token
    }

    fn end_fetch(&self) {
        self.slot().take();
    }

    /// Cancels the running fetch. False when nothing was in flight.
    fn interrupt(&self) -> bool {
        match self.slot().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<CancelToken>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("Difficulty: {}\n", dashboard.difficulty());

    println!("Recent results (last {RECENT_HISTORY_LEN}):");
    if dashboard.recent().is_empty() {
        println!("  none yet");
    }
    for item in dashboard.recent() {
        println!(
            "  {}  {:<18} {}/{} ({}%)",
            item.date.format("%Y-%m-%d %H:%M"),
            item.category,
            item.score,
            item.total,
            item.percentage()
        );
    }

    for (mode, heading) in [(Mode::Quiz, "Quizzes"), (Mode::Teach, "Lessons")] {
        println!("\n{heading}:");
        for card in dashboard.category_cards(mode) {
            println!("  {:<18} {}", card.title, card.description);
        }
    }
}

async fn run_quiz(
    dashboard: &mut Dashboard,
    backend: &dyn PrepBackend,
    interrupts: &InterruptGuard,
    category: Category,
    count: u32,
) -> AppResult<()> {
    let mut session = dashboard.start_quiz(category, count)?;

    println!(
        "Generating {count} {category} questions at {} level...",
        session.difficulty()
    );
    let cancel = interrupts.begin_fetch();
    let loaded = session.load(backend, &cancel).await;
    interrupts.end_fetch();
    loaded?;

    loop {
        let Some(question) = session.current_question().cloned() else {
            return Ok(());
        };
        let (position, total) = session.progress();

        println!("\nQuestion {position} of {total}  [{category}]");
        if let Some(context) = &question.context {
            println!("{context}");
        }
        println!("{}", question.question_text);

        let Some(answer) = read_option(&question.options)? else {
            println!("Quiz abandoned. Nothing was recorded.");
            return Ok(());
        };
        session.select_answer(&answer)?;

        if let Advance::Finished(result) = session.advance(dashboard.history())? {
            print_result(&result);
            if !result.recorded {
                eprintln!("Warning: this result could not be saved to your history.");
            }
            if !confirm("Retry the same questions?")? {
                return Ok(());
            }
            session.retry()?;
        }
    }
}

fn print_result(result: &QuizResult) {
    println!(
        "\nScore: {}/{} ({}%)\n",
        result.score, result.total, result.percentage
    );
    for (i, entry) in result.review.iter().enumerate() {
        let mark = if entry.is_correct { "correct" } else { "wrong" };
        println!("{}. {} [{mark}]", i + 1, entry.question_text);
        println!(
            "   Your answer: {}",
            entry.user_answer.as_deref().unwrap_or("-")
        );
        if !entry.is_correct {
            println!("   Correct answer: {}", entry.correct_answer);
        }
        println!("   {}", entry.explanation);
    }
}

async fn run_lesson(
    backend: &dyn PrepBackend,
    interrupts: &InterruptGuard,
    category: Category,
) -> AppResult<()> {
    let mut viewer = LessonViewer::new();

    println!("Loading the {category} lesson...");
    let cancel = interrupts.begin_fetch();
    let opened = viewer.open(category, backend, &cancel).await;
    interrupts.end_fetch();
    let lesson = opened?;

    println!("\n{}\n", lesson.explanation);
    if !lesson.common_tricks.is_empty() {
        println!("Common tricks:");
        for trick in &lesson.common_tricks {
            println!("  - {trick}");
        }
    }
    for (i, example) in lesson.examples.iter().enumerate() {
        println!("\nExample {}", i + 1);
        print_item(example);
        println!("Answer: {}", example.correct_answer);
        println!("{}", example.explanation);
    }

    let practice = match viewer.practice_mut() {
        Ok(practice) => practice,
        Err(AppError::NotFound(message)) => {
            println!("\n{message}");
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    println!("\nPractice ({} questions, q to stop)", practice.len());
    loop {
        println!("\nPractice {} of {}", practice.index() + 1, practice.len());
        print_item(practice.current());

        let options = practice.current().options.clone();
        let Some(answer) = read_option(&options)? else {
            return Ok(());
        };
        let feedback = practice.select(&answer)?;
        if feedback.is_correct {
            println!("Correct!");
        } else {
            println!("Not quite. The answer is {}.", feedback.correct_answer);
        }
        println!("{}", feedback.explanation);
        practice.advance();
    }
}

fn print_item(item: &LessonItem) {
    if let Some(stimulus) = item.stimulus() {
        println!("{stimulus}");
    }
    println!("{}", item.prompt());
}

/// Lists `options` and reads a choice. `None` means the user quit.
fn read_option(options: &[String]) -> AppResult<Option<String>> {
    for (i, option) in options.iter().enumerate() {
        println!("  {}) {option}", i + 1);
    }
    loop {
        let Some(line) = prompt(&format!("Answer [1-{}, q to quit]: ", options.len()))? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1].clone())),
            _ => println!("Please enter a number between 1 and {}.", options.len()),
        }
    }
}

fn confirm(question: &str) -> AppResult<bool> {
    Ok(prompt(&format!("{question} [y/N]: "))?
        .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
}

/// Reads one trimmed line. `None` on end of input.
fn prompt(text: &str) -> AppResult<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty_accepts_labels_in_any_case() {
        assert_eq!(parse_difficulty("academic"), Ok(Difficulty::Academic));
        assert_eq!(parse_difficulty("High School"), Ok(Difficulty::HighSchool));
        assert_eq!(parse_difficulty("COLLEGE"), Ok(Difficulty::College));
    }

    #[test]
    fn test_parse_difficulty_rejects_unknown_level() {
        let err = parse_difficulty("phd").unwrap_err();
        assert_eq!(err, "expected one of: High School, College, Academic");
    }

    #[test]
    fn test_settings_rejects_unknown_difficulty() {
        let result = Args::try_parse_from(["qudurat", "settings", "--difficulty", "phd"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["qudurat", "settings", "-d", "academic"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Settings {
                difficulty: Some(Difficulty::Academic)
            }
        ));
    }

    #[test]
    fn test_parse_category_accepts_label_or_slug() {
        assert_eq!(parse_category("odd-one-out"), Ok(Category::OddOneOut));
        assert_eq!(parse_category("Paragraph Meaning"), Ok(Category::ParagraphMeaning));
        assert!(parse_category("synonyms").is_err());
    }

    #[test]
    fn test_interrupt_outside_fetch_is_not_absorbed() {
        let interrupts = InterruptGuard::new();
        assert!(!interrupts.interrupt());

        let token = interrupts.begin_fetch();
        interrupts.end_fetch();
        assert!(!interrupts.interrupt());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_interrupt_during_fetch_cancels_it_once() {
        let interrupts = InterruptGuard::new();
        let token = interrupts.begin_fetch();

        assert!(interrupts.interrupt());
        assert!(token.is_cancelled());
        assert!(!interrupts.interrupt());
    }
}
