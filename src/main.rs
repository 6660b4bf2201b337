use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod config;
mod demo;
mod session;
mod shutdown;
mod store;
mod worker;

use crate::session::{Route, Session};
use crate::shutdown::ShutdownCoordinator;
use crate::store::forms::{JobPostingForm, UploadForm};
use crate::store::models::{MatchDecision, MatchStatus};
use crate::store::skills::{score_distribution, top_skills};
use crate::store::AppStore;
use crate::worker::{Submission, UploadWorker};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config::Config {
        upload_delay_ms,
        posting_delay_ms,
        log_dir,
        seed_demo_data,
    } = config::Config::from_env().expect("Failed to load configuration");

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(&log_dir).expect("Failed to create logs directory");

    // File-based logging with daily rotation, plus console output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .init();

    info!("Starting match-minds");
    info!("Configuration loaded successfully:");
    info!("  - Simulated CV processing delay: {} ms", upload_delay_ms);
    info!("  - Simulated posting delay: {} ms", posting_delay_ms);
    info!("  - Seed demo data: {}", seed_demo_data);

    // The store is constructor-injected everywhere, never a global
    let store = Arc::new(AppStore::new(Box::new(demo::MockEngine)));
    if seed_demo_data {
        demo::seed(&store);
    }

    // Shutdown channel doubles as the cancellation signal for in-flight
    // simulated processing
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (queue_tx, queue_rx) = mpsc::channel(16);

    let worker_store = store.clone();
    let worker_shutdown_rx = shutdown_rx.clone();
    let handle = tokio::spawn(async move {
        let worker = UploadWorker::new(
            worker_store,
            Duration::from_millis(upload_delay_ms),
            Duration::from_millis(posting_delay_ms),
        );
        worker.run(queue_rx, worker_shutdown_rx).await;
    });
    info!("Spawned submission worker");

    // Walk the screens the way a browser session would; CTRL+C cancels
    // whatever simulated processing is still pending
    tokio::select! {
        _ = run_demo_session(store.clone(), queue_tx) => {
            info!("Demo session complete");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received CTRL+C, cancelling pending submissions...");
        }
    }

    let coordinator = ShutdownCoordinator::new(shutdown_tx, vec![handle]);
    coordinator.shutdown().await;
}

/// Scripted walk through every screen: log in, upload a CV, post a job,
/// act on a match, then render the dashboard and job-detail snapshots.
async fn run_demo_session(store: Arc<AppStore>, queue: mpsc::Sender<Submission>) {
    let mut session = Session::new();

    // Gated routes bounce to login until the OTP dance is done
    if let Some(requested) = Route::from_path("/dashboard") {
        info!(
            "GET {} -> {}",
            requested.path(),
            session.resolve(requested).path()
        );
    }
    if let Err(e) = session.request_otp("+1 (555) 010-4477") {
        error!("OTP request failed: {}", e);
        return;
    }
    if let Err(e) = session.verify_otp("000000") {
        error!("OTP verification failed: {}", e);
        return;
    }
    info!(
        "Logged in; {} now resolves to {}",
        Route::Login.path(),
        session.resolve(Route::Login).path()
    );

    let mut revisions = store.subscribe();

    // Seeker side: upload a CV
    let upload = UploadForm {
        position: "Data Scientist".to_string(),
        university: "Stanford".to_string(),
        expected_salary: "120000".to_string(),
        file_name: "cv.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
    };
    let resumes_before = store.resumes().len();
    if queue.send(Submission::Resume(upload)).await.is_err() {
        error!("Submission queue closed");
        return;
    }
    wait_until(&store, &mut revisions, |s| s.resumes().len() > resumes_before).await;

    // Recruiter side: post a job
    let posting = JobPostingForm {
        title: "Backend Engineer".to_string(),
        salary_min: 90_000,
        salary_max: 140_000,
        description: "Design and run the APIs behind the matching screens.".to_string(),
        requirements: "Rust or Go, SQL, 3+ years backend experience.".to_string(),
        responsibilities: "Own services end to end.".to_string(),
        cv_file_name: None,
    };
    let jobs_before = store.jobs().len();
    if queue.send(Submission::Posting(posting)).await.is_err() {
        error!("Submission queue closed");
        return;
    }
    wait_until(&store, &mut revisions, |s| s.jobs().len() > jobs_before).await;

    // Dashboard snapshot
    let resumes = store.resumes();
    info!("Dashboard: {} resume(s) on file", resumes.len());
    for resume in &resumes {
        info!(
            "  {} ({}): ATS {} | university rank {} | {} matches | {} rejections",
            resume.position,
            resume.university,
            resume.ats_score,
            resume.university_rank,
            resume.matches.len(),
            resume.rejections.len()
        );
    }

    // Matches screen: apply to the first pending match
    let pending = resumes.iter().find_map(|resume| {
        resume
            .matches
            .iter()
            .find(|m| m.status == MatchStatus::Pending)
            .map(|m| (resume.id, m.id, m.position.clone()))
    });
    if let Some((resume_id, match_id, position)) = pending {
        match store.update_match_status(resume_id, match_id, MatchDecision::Apply) {
            Ok(status) => info!("Applied to '{}': status={:?}", position, status),
            Err(e) => error!("Could not apply: {}", e),
        }
    }

    // Job detail: analytics tab data
    for job in store.jobs() {
        info!(
            "Job '{}' (${} - ${}): {} candidate(s)",
            job.title,
            job.salary_min,
            job.salary_max,
            job.candidates.len()
        );
        match serde_json::to_string(&top_skills(&job.candidates)) {
            Ok(json) => info!("  Top skills: {}", json),
            Err(e) => error!("Failed to serialize skill tally: {}", e),
        }
        for bucket in score_distribution(&job.candidates) {
            info!("  {}: {} candidate(s)", bucket.label, bucket.count);
        }
    }

    session.log_out();
    info!(
        "Logged out; {} resolves to {} again",
        Route::Matches.path(),
        session.resolve(Route::Matches).path()
    );
}

/// Block until the store snapshot satisfies the predicate, re-checking on
/// every revision bump
async fn wait_until<F>(store: &AppStore, revisions: &mut watch::Receiver<u64>, done: F)
where
    F: Fn(&AppStore) -> bool,
{
    while !done(store) {
        if revisions.changed().await.is_err() {
            return;
        }
        revisions.borrow_and_update();
    }
}
