use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classroom::filters::StatusFilter;
use classroom::grading::{self, GradeTier, LetterGrade};
use classroom::services::{
    AssignmentService, GradebookService, MessagingService, RosterService, StudentOverview,
    TeacherOverview, message_time_label,
};
use classroom::{AppError, ClassroomApi, ClientConfig, HttpClassroomApi};

#[derive(Parser)]
#[command(name = "classroom", about = "Classroom client: assignments, grades and messages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the backend is reachable
    Health,
    /// List your assignments
    Assignments {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show your graded work and statistics
    Grades {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Submit answers for an assignment, one option index per question
    Submit {
        student_assignment_id: String,
        #[arg(required = true)]
        answers: Vec<usize>,
    },
    /// Show the teacher gradebook
    Gradebook {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show the dashboard summary
    Overview {
        #[arg(long)]
        student: bool,
    },
    /// List students
    Students {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List conversations
    Conversations {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show the message thread with a contact
    Thread { contact_id: String },
    /// Send a message
    Send {
        recipient_id: String,
        content: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "classroom=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = ClientConfig::new_from_env()?;
    let user_id = config.user_id.clone().unwrap_or_default();
    let api: Arc<dyn ClassroomApi> = Arc::new(HttpClassroomApi::new(config)?);

    match cli.command {
        Command::Health => {
            let health = api.health().await?;
            println!("{}", health.status);
        }
        Command::Assignments { search, status } => {
            let mut service = AssignmentService::new(api);
            service.refresh().await?;
            for a in service.filtered(&search, status) {
                let state = match a.graded_score() {
                    Some(score) => format!("{}%", grading::round_percent(score)),
                    None if a.completed => "submitted".to_string(),
                    None => "pending".to_string(),
                };
                println!(
                    "{}  {} ({}, {} questions)  {}",
                    a.student_assignment_id,
                    a.assignment.title,
                    a.assignment.subject,
                    a.assignment.question_count(),
                    state
                );
            }
        }
        Command::Grades { search } => {
            let mut service = AssignmentService::new(api);
            service.refresh().await?;
            let summary = service.summary();
            println!(
                "completed {}  average {}%  highest {}  lowest {}",
                summary.count,
                summary.average,
                percent_or_na(summary.highest),
                percent_or_na(summary.lowest)
            );
            println!("{}", grading::performance_message(summary.average));
            for a in service.grades(&search) {
                if let Some(score) = a.graded_score() {
                    println!(
                        "{}  {}%  {} [{}]",
                        LetterGrade::from_score(score),
                        grading::round_percent(score),
                        a.assignment.title,
                        GradeTier::from_score(score).as_str()
                    );
                }
            }
        }
        Command::Submit {
            student_assignment_id,
            answers,
        } => {
            let mut service = AssignmentService::new(api);
            let mut session = service.open(&student_assignment_id).await?;
            for (question, option) in answers.into_iter().enumerate() {
                session.select(question, option)?;
            }
            let outcome = session.submit().await?;
            println!(
                "Assignment submitted! Score: {}%",
                grading::round_percent(outcome.result.score)
            );
        }
        Command::Gradebook { search } => {
            let mut service = GradebookService::new(api);
            service.refresh().await?;
            let stats = service.stats();
            println!(
                "students {}  submissions {}  average {}%  completion {}%",
                stats.total_students, stats.total_submissions, stats.average, stats.completion_rate
            );
            for record in service.filtered(&search) {
                println!(
                    "{}  {} submitted  average {}%",
                    record.student.full_name(),
                    record.assignments.len(),
                    grading::student_average(&record.assignments)
                );
            }
        }
        Command::Overview { student } => {
            if student {
                let mut service = AssignmentService::new(api);
                service.refresh().await?;
                let overview = StudentOverview::build(service.assignments());
                println!(
                    "assignments {}  completed {}  pending {}  average {}%",
                    overview.total_assignments,
                    overview.completed_assignments,
                    overview.pending_assignments,
                    overview.average
                );
                for a in &overview.upcoming {
                    println!("pending: {}", a.assignment.title);
                }
            } else {
                let overview = TeacherOverview::load(api.as_ref()).await?;
                println!(
                    "students {}  assignments {}  completed {}  average {}%",
                    overview.total_students,
                    overview.total_assignments,
                    overview.completed_assignments,
                    overview.average
                );
                for activity in &overview.recent_activity {
                    println!(
                        "{} submitted {} ({})",
                        activity.student_name,
                        activity.assignment_title,
                        percent_or_na(activity.score)
                    );
                }
            }
        }
        Command::Students { search } => {
            let mut roster = RosterService::new(api);
            roster.refresh().await?;
            for s in roster.filtered(&search) {
                println!("{}  {}  @{}", s.id, s.full_name(), s.username);
            }
            let (week, month) = roster.recently_added(Utc::now());
            println!("added this week {}  this month {}", week, month);
        }
        Command::Conversations { search } => {
            let mut messaging = MessagingService::new(api, user_id);
            messaging.refresh_conversations().await?;
            let now = Utc::now();
            for c in messaging.filtered(&search) {
                match &c.last_message {
                    Some(m) => println!(
                        "{}  {}  [{}] {}",
                        c.contact.id,
                        c.contact.name,
                        message_time_label(m.sent_at, now, &Local),
                        m.content
                    ),
                    None => println!("{}  {}  (no messages)", c.contact.id, c.contact.name),
                }
            }
        }
        Command::Thread { contact_id } => {
            let mut messaging = MessagingService::new(api, user_id);
            messaging.open(&contact_id).await?;
            print_thread(&messaging);
        }
        Command::Send {
            recipient_id,
            content,
        } => {
            let mut messaging = MessagingService::new(api, user_id);
            messaging.open(&recipient_id).await?;
            let written = messaging.send(&content).await?;
            if !written.refreshed {
                eprintln!("Message sent, but the thread could not be reloaded");
            }
            print_thread(&messaging);
        }
    }

    Ok(())
}

fn percent_or_na(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{}%", grading::round_percent(s)),
        None => "N/A".to_string(),
    }
}

fn print_thread(messaging: &MessagingService) {
    let now = Utc::now();
    for m in messaging.thread() {
        let who = if messaging.is_sent(m) { "you" } else { "them" };
        println!("[{}] {}: {}", message_time_label(m.sent_at, now, &Local), who, m.content);
    }
}
