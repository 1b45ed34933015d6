use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use hiring_ai::config::AppConfig;
use hiring_ai::error::AppError;
use hiring_ai::telemetry;
use hiring_ai::workflows::hiring::{
    hiring_router, AlertError, AlertPublisher, AnswerValue, AssessmentAlert,
    AssessmentRepository, Band, Decision, DecisionPayload, DeclineCategory, FundingSource,
    HiringAssessmentService, IntakeGuard, OpeningId, OpeningIntake, OpeningRecord, PanelMember,
    QuestionId, Rating, RepositoryError, ReviewerId, ReviewerRole, RiskScorer, ScoreComponent,
    SubmissionId, SubmissionRecord,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Hiring Assessment Orchestrator",
    about = "Run the role-based hiring assessment service or a seeded demo panel",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Seed a representative review panel and print the assessment outcome
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Emit the results view as pretty-printed JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = Arc::new(HiringAssessmentService::new(repository, alerts));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/hiring/score", post(score_preview_endpoint))
        .with_state(state)
        .merge(hiring_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hiring assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
struct ScorePreviewRequest {
    role: ReviewerRole,
    decision: Decision,
    #[serde(default)]
    decline_category: Option<DeclineCategory>,
    #[serde(default)]
    answers: BTreeMap<QuestionId, AnswerValue>,
}

#[derive(Debug, Serialize)]
struct ScorePreviewResponse {
    role: ReviewerRole,
    role_label: &'static str,
    level: u8,
    level_label: &'static str,
    risk_level: &'static str,
    total_score: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    decline_category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corrective_guidance: Option<Vec<&'static str>>,
    components: Vec<ScoreComponent>,
}

/// Stateless scoring preview: screens and scores a payload without storing a
/// submission, so reviewers can sanity-check an assessment before filing it.
async fn score_preview_endpoint(
    Json(request): Json<ScorePreviewRequest>,
) -> Result<Json<ScorePreviewResponse>, AppError> {
    let ScorePreviewRequest {
        role,
        decision,
        decline_category,
        answers,
    } = request;

    let member = PanelMember {
        reviewer: ReviewerId("preview".to_string()),
        role,
    };
    let payload = DecisionPayload {
        reviewer: member.reviewer.clone(),
        decision,
        decline_reason: None,
        decline_category,
        answers,
    };

    let screened = IntakeGuard.screen_submission(&member, payload)?;
    let outcome = RiskScorer.score(
        role.level(),
        &screened.answers,
        screened.decision,
        screened.declared_category,
    );

    Ok(Json(ScorePreviewResponse {
        role,
        role_label: role.label(),
        level: role.level().index(),
        level_label: role.level().label(),
        risk_level: outcome.risk_level.label(),
        total_score: outcome.total_score,
        decline_category: outcome.decline_category.map(|category| category.key()),
        corrective_guidance: outcome.guidance.map(|steps| steps.to_vec()),
        components: outcome.components,
    }))
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = HiringAssessmentService::new(repository, alerts.clone());

    let opening = service.open(demo_opening())?;

    for payload in demo_responses() {
        service.submit(&opening.opening.id, payload)?;
    }

    let results = service.results(&opening.opening.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Hiring assessment demo");
    println!(
        "Opening: {} ({}), status {}",
        results.title, results.opening_id.0, results.status
    );
    println!("Panel progress: {:.1}%", results.progress_percent);

    for section in &results.sections {
        if section.submissions.is_empty() {
            continue;
        }
        println!("\n{}", section.level_label);
        for view in &section.submissions {
            let category_note = match view.decline_category {
                Some(category) => format!(" [{category}]"),
                None => String::new(),
            };
            println!(
                "- {} ({}): {}, risk {} (score {}){}",
                view.reviewer,
                view.role_label,
                view.decision,
                view.risk_level,
                view.total_score,
                category_note
            );
            for step in &view.corrective_guidance {
                println!("    guidance: {step}");
            }
        }
    }

    println!("\nOverall risk: {}", results.overall_risk.label());
    println!(
        "Recommendation: {} ({})",
        results.recommendation.decision, results.recommendation.conditions
    );

    let events = alerts.events();
    println!("\nAlerts published: {}", events.len());
    for event in events {
        println!("- {} for {}", event.template, event.opening_id.0);
    }

    Ok(())
}

fn demo_opening() -> OpeningIntake {
    let founder = PanelMember {
        reviewer: ReviewerId("avery".to_string()),
        role: ReviewerRole::Founder,
    };

    OpeningIntake {
        title: "Senior Backend Engineer".to_string(),
        department: "Engineering".to_string(),
        description: "Own the billing and reporting services.".to_string(),
        required_skills: "Rust, PostgreSQL, distributed systems".to_string(),
        experience_level: "Senior (5+ years)".to_string(),
        budget_range: "$140k-$170k".to_string(),
        urgency: Band::High,
        opened_by: founder.clone(),
        panel: vec![
            founder,
            PanelMember {
                reviewer: ReviewerId("blair".to_string()),
                role: ReviewerRole::CoFounder,
            },
            PanelMember {
                reviewer: ReviewerId("casey".to_string()),
                role: ReviewerRole::Cfo,
            },
            PanelMember {
                reviewer: ReviewerId("drew".to_string()),
                role: ReviewerRole::Cto,
            },
            PanelMember {
                reviewer: ReviewerId("emerson".to_string()),
                role: ReviewerRole::ProjectHead,
            },
            PanelMember {
                reviewer: ReviewerId("finley".to_string()),
                role: ReviewerRole::HrManager,
            },
        ],
    }
}

fn demo_responses() -> Vec<DecisionPayload> {
    let rating = |value: u8| AnswerValue::Rating(Rating::new(value).expect("demo rating in range"));

    vec![
        DecisionPayload {
            reviewer: ReviewerId("avery".to_string()),
            decision: Decision::Approve,
            decline_reason: None,
            decline_category: None,
            answers: BTreeMap::from([
                (QuestionId::BudgetApproval, AnswerValue::Flag(true)),
                (QuestionId::BusinessAlignment, rating(4)),
                (QuestionId::FinancialRisk, rating(2)),
                (QuestionId::LongTermImpact, rating(4)),
                (QuestionId::StrategicPriority, AnswerValue::Band(Band::High)),
            ]),
        },
        DecisionPayload {
            reviewer: ReviewerId("blair".to_string()),
            decision: Decision::Approve,
            decline_reason: None,
            decline_category: None,
            answers: BTreeMap::from([
                (QuestionId::BudgetApproval, AnswerValue::Flag(true)),
                (QuestionId::BusinessAlignment, rating(5)),
                (QuestionId::FinancialRisk, rating(3)),
                (QuestionId::LongTermImpact, rating(5)),
                (QuestionId::StrategicPriority, AnswerValue::Band(Band::Medium)),
            ]),
        },
        DecisionPayload {
            reviewer: ReviewerId("casey".to_string()),
            decision: Decision::Approve,
            decline_reason: None,
            decline_category: None,
            answers: BTreeMap::from([
                (QuestionId::SkillAvailability, AnswerValue::Band(Band::Medium)),
                (QuestionId::TimelineRisk, AnswerValue::Band(Band::Low)),
                (QuestionId::MentorAvailable, AnswerValue::Flag(true)),
                (QuestionId::TeamDependency, rating(2)),
                (QuestionId::ExecutionFeasibility, rating(4)),
                (QuestionId::RoiProjection, rating(4)),
                (QuestionId::CashFlowImpact, rating(3)),
                (QuestionId::BudgetAlignment, AnswerValue::Flag(true)),
                (
                    QuestionId::FundingSource,
                    AnswerValue::Funding(FundingSource::Operational),
                ),
            ]),
        },
        DecisionPayload {
            reviewer: ReviewerId("drew".to_string()),
            decision: Decision::Decline,
            decline_reason: Some("Timeline too aggressive for current roadmap".to_string()),
            decline_category: None,
            answers: BTreeMap::from([
                (QuestionId::SkillAvailability, AnswerValue::Band(Band::Low)),
                (QuestionId::TimelineRisk, AnswerValue::Band(Band::High)),
                (QuestionId::MentorAvailable, AnswerValue::Flag(false)),
                (QuestionId::TeamDependency, rating(3)),
                (QuestionId::ExecutionFeasibility, rating(3)),
            ]),
        },
        DecisionPayload {
            reviewer: ReviewerId("emerson".to_string()),
            decision: Decision::Approve,
            decline_reason: None,
            decline_category: None,
            answers: BTreeMap::from([
                (QuestionId::SkillAvailability, AnswerValue::Band(Band::Medium)),
                (QuestionId::TimelineRisk, AnswerValue::Band(Band::Medium)),
                (QuestionId::MentorAvailable, AnswerValue::Flag(true)),
                (QuestionId::TeamDependency, rating(3)),
                (QuestionId::ExecutionFeasibility, rating(3)),
            ]),
        },
        DecisionPayload {
            reviewer: ReviewerId("finley".to_string()),
            decision: Decision::Approve,
            decline_reason: None,
            decline_category: None,
            answers: BTreeMap::from([
                (QuestionId::TalentAvailability, AnswerValue::Band(Band::Medium)),
                (QuestionId::CostValidation, AnswerValue::Flag(true)),
                (QuestionId::ProcessReadiness, rating(4)),
                (QuestionId::OnboardingCapacity, AnswerValue::Flag(true)),
                (QuestionId::MarketCompetition, AnswerValue::Band(Band::High)),
            ]),
        },
    ]
}

#[derive(Default, Clone)]
struct InMemoryAssessmentRepository {
    openings: Arc<Mutex<HashMap<OpeningId, OpeningRecord>>>,
    submissions: Arc<Mutex<HashMap<SubmissionId, SubmissionRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert_opening(&self, record: OpeningRecord) -> Result<OpeningRecord, RepositoryError> {
        let mut guard = self.openings.lock().expect("opening mutex poisoned");
        if guard.contains_key(&record.opening.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.opening.id.clone(), record.clone());
        Ok(record)
    }

    fn update_opening(&self, record: OpeningRecord) -> Result<(), RepositoryError> {
        let mut guard = self.openings.lock().expect("opening mutex poisoned");
        if guard.contains_key(&record.opening.id) {
            guard.insert(record.opening.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_opening(&self, id: &OpeningId) -> Result<Option<OpeningRecord>, RepositoryError> {
        let guard = self.openings.lock().expect("opening mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_submission(
        &self,
        record: SubmissionRecord,
    ) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.opening_id == record.opening_id
                && existing.submission.reviewer.reviewer == record.submission.reviewer.reviewer
        });
        if duplicate || guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let guard = self.submissions.lock().expect("submission mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn submissions_for(
        &self,
        opening: &OpeningId,
    ) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let guard = self.submissions.lock().expect("submission mutex poisoned");
        let mut records: Vec<SubmissionRecord> = guard
            .values()
            .filter(|record| &record.opening_id == opening)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(records)
    }
}

#[derive(Default, Clone)]
struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<AssessmentAlert>>>,
}

impl InMemoryAlertPublisher {
    fn events(&self) -> Vec<AssessmentAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: AssessmentAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}
