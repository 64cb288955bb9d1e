use clap::{Args, Parser, Subcommand};
use services::{AppServices, Clock};
use swim_core::model::{CoachId, Day, Gender, LessonId, StudentDraft, StudentId};
use swim_core::query::LessonFilter;
use swim_core::timetable::WeekBoundaryMode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "swim-school", version, about = "Swim school lesson timetable")]
struct Cli {
    /// SQLite database URL; `sqlite::memory:` keeps everything in memory
    #[arg(
        long,
        env = "SWIM_DB_URL",
        default_value = "sqlite:swim.sqlite3",
        global = true
    )]
    db: String,

    /// Seed for coach selection when a new term is generated
    #[arg(long, env = "SWIM_SEED", global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the week-segmented timetable, optionally filtered
    Timetable(TimetableArgs),
    /// Show a single lesson
    Lesson { id: LessonId },
    /// List the coach roster
    Coaches,
    /// List enrolled students
    Students,
    /// Look up an enrolled student by id
    Login { id: StudentId },
    /// Enroll a new student
    Register(RegisterArgs),
    /// Seed roster, students and term, then report what exists
    Seed,
}

#[derive(Debug, Default, Args)]
struct TimetableArgs {
    #[arg(long, conflicts_with_all = ["coach", "grade", "today"])]
    day: Option<Day>,

    #[arg(long, conflicts_with_all = ["grade", "today"])]
    coach: Option<CoachId>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5), conflicts_with = "today")]
    grade: Option<u8>,

    /// Only lessons on today's weekday
    #[arg(long)]
    today: bool,

    /// Name the real week for every header, even across several empty weeks
    #[arg(long)]
    exact_weeks: bool,

    /// Emit the selected lessons as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    gender: Gender,
    #[arg(long)]
    age: u8,
    /// Emergency contact number
    #[arg(long)]
    contact: String,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    grade: u8,
}

impl TimetableArgs {
    fn filter(&self, clock: &Clock) -> Option<LessonFilter> {
        if self.today {
            return clock.lesson_day().map(LessonFilter::Day);
        }
        Some(match (self.day, self.coach, self.grade) {
            (Some(day), _, _) => LessonFilter::Day(day),
            (_, Some(coach), _) => LessonFilter::Coach(coach),
            (_, _, Some(grade)) => LessonFilter::Grade(grade),
            _ => LessonFilter::All,
        })
    }

    fn mode(&self) -> WeekBoundaryMode {
        if self.exact_weeks {
            WeekBoundaryMode::Exact
        } else {
            WeekBoundaryMode::Legacy
        }
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.contains("mode=memory")
    {
        return raw.to_string();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}?mode=rwc", absolute.display())
}

fn timetable(
    app: &AppServices,
    args: &TimetableArgs,
    clock: &Clock,
) -> Result<String, Box<dyn std::error::Error>> {
    let Some(filter) = args.filter(clock) else {
        return Ok("No lessons run today.\n".to_string());
    };
    debug!(?filter, exact = args.exact_weeks, "rendering timetable");

    if args.json {
        let selected = app.lessons().select(filter);
        return Ok(serde_json::to_string_pretty(&selected)? + "\n");
    }
    Ok(app.lessons().render(filter, args.mode())?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let clock = Clock::default_clock();
    let db_url = normalize_sqlite_url(&cli.db);
    let app = AppServices::new_sqlite(&db_url, clock, cli.seed).await?;

    match cli.command.unwrap_or(Command::Timetable(TimetableArgs::default())) {
        Command::Timetable(args) => {
            print!("{}", timetable(&app, &args, &clock)?);
        }
        Command::Lesson { id } => match app.lessons().lesson(id) {
            Some(lesson) => println!("{lesson}"),
            None => println!("No lesson with id {id}."),
        },
        Command::Coaches => {
            for coach in app.roster().roster().await? {
                let taught = app.lessons().for_coach(coach.id()).len();
                println!("{coach}: {taught} lessons");
            }
        }
        Command::Students => {
            for student in app.students().list().await? {
                println!("{student}");
            }
        }
        Command::Login { id } => match app.students().login(id).await? {
            Some(student) => println!("Welcome back, {}.\n{student}", student.name()),
            None => println!("No student with id {id}."),
        },
        Command::Register(args) => {
            let student = app
                .students()
                .register(StudentDraft {
                    name: args.name,
                    gender: args.gender,
                    age: args.age,
                    emergency_contact: args.contact,
                    grade_rank: args.grade,
                })
                .await?;
            println!("Registration complete.\n{student}");
        }
        Command::Seed => {
            println!(
                "coaches: {}, students: {}, lessons: {}",
                app.roster().roster().await?.len(),
                app.students().list().await?.len(),
                app.lessons().len()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
