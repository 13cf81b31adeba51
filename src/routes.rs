use chrono::Utc;
use serde::{Serialize, Deserialize};

use crate::adaptive::{classify, classify_plan, rebalance_with, RebalanceOutcome, Status};
use crate::analytics::{compute_overview, PlanOverview};
use crate::catalog::Level;
use crate::error::{PersistenceError, PlannerError};
use crate::history::{plan_id, HistoryRecord};
use crate::plan::{allocate, toggle, Plan, ProgressUpdate};
use crate::state::app::{ActivePlan, AppState};
use crate::sync::SyncMessage;

/// A completed local change plus the outcome of handing it to storage.
/// `sync_error` is advisory; the local change already happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synced<T> {
    pub value: T,
    pub sync_error: Option<PersistenceError>,
}

impl<T> Synced<T> {
    fn new(value: T, results: Vec<Result<(), PlannerError>>) -> Self {
        let sync_error = results.into_iter().find_map(|r| match r {
            Err(PlannerError::Persistence(e)) => Some(e),
            _ => None,
        });
        Synced { value, sync_error }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub subject: String,
    pub level: Level,
    pub days: Option<u32>,
    pub hours_per_day: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanView {
    pub id: String,
    pub plan: Plan,
    pub overview: PlanOverview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicToggled {
    pub update: ProgressUpdate,
    pub day_status: Status,
    pub overall: Status,
}

/// Allocate a new plan, make it the active one, and record it in history.
pub fn generate_plan(state: &AppState, request: GenerateRequest) -> Result<Synced<PlanView>, PlannerError> {
    let days = request.days.unwrap_or(state.config.default_days);
    let hours_per_day = request.hours_per_day.unwrap_or(state.config.default_hours_per_day);

    let plan = {
        let catalog = state.catalog.read();
        let topics = catalog.lookup(&request.subject, request.level)?;
        allocate(&request.subject, request.level, topics, days, hours_per_day)?
    };

    let created_at = Utc::now();
    let id = plan_id(&plan, &state.user, created_at);
    let record = HistoryRecord::from_plan(id.clone(), &plan, created_at);

    *state.active_plan.write() = Some(ActivePlan { id: id.clone(), plan: plan.clone() });
    state.metrics.record_plan_generated();
    tracing::info!(
        plan_id = %id,
        subject = %plan.subject,
        level = %plan.level,
        days = plan.days.len(),
        "Generated study plan"
    );

    let results = vec![
        state.dispatch(SyncMessage::PlanSnapshot {
            user: state.user.clone(),
            plan_id: id.clone(),
            plan: plan.clone(),
        }),
        state.dispatch(SyncMessage::History { user: state.user.clone(), record }),
    ];

    let overview = compute_overview(&plan);
    Ok(Synced::new(PlanView { id, plan, overview }, results))
}

/// Flip a topic's completion on the active plan and sync it.
pub fn toggle_topic(state: &AppState, day: u32, topic: &str) -> Result<Synced<TopicToggled>, PlannerError> {
    let (plan_id, toggled) = {
        let mut guard = state.active_plan.write();
        let active = guard.as_mut().ok_or(PlannerError::NoActivePlan)?;
        let update = toggle(&mut active.plan, day, topic)?;
        let day_status = active
            .plan
            .day(day)
            .map(|d| classify(&d.assignments))
            .ok_or(PlannerError::DayNotFound(day))?;
        let overall = classify_plan(&active.plan);
        (active.id.clone(), TopicToggled { update, day_status, overall })
    };
    state.metrics.record_toggle();

    let result = state.dispatch(SyncMessage::Progress {
        user: state.user.clone(),
        plan_id,
        update: toggled.update.clone(),
    });
    Ok(Synced::new(toggled, vec![result]))
}

/// Rebalance one day of the active plan against its hours-per-day budget.
pub fn smart_adjust(state: &AppState, day: u32) -> Result<Synced<RebalanceOutcome>, PlannerError> {
    let (plan_id, plan, outcome) = {
        let mut guard = state.active_plan.write();
        let active = guard.as_mut().ok_or(PlannerError::NoActivePlan)?;
        let baseline = active.plan.hours_per_day;
        let plan_day = active
            .plan
            .day_mut(day)
            .ok_or(PlannerError::DayNotFound(day))?;
        let outcome = rebalance_with(plan_day, baseline, &state.config.rebalance);
        (active.id.clone(), active.plan.clone(), outcome)
    };
    state.metrics.record_rebalance();

    let result = state.dispatch(SyncMessage::PlanSnapshot {
        user: state.user.clone(),
        plan_id,
        plan,
    });
    Ok(Synced::new(outcome, vec![result]))
}

/// Register a custom subject from raw per-level text and persist the registry.
pub fn define_subject<I, S>(state: &AppState, subject: &str, level_texts: I) -> Result<Synced<Vec<String>>, PlannerError>
where
    I: IntoIterator<Item = (Level, S)>,
    S: AsRef<str>,
{
    let (subjects, custom) = {
        let mut catalog = state.catalog.write();
        catalog.define(subject, level_texts)?;
        (catalog.subjects(), catalog.custom_subjects())
    };
    state.metrics.record_subject_defined();

    let result = state.dispatch(SyncMessage::Catalog {
        user: state.user.clone(),
        subjects: custom,
    });
    Ok(Synced::new(subjects, vec![result]))
}

pub fn list_subjects(state: &AppState) -> Vec<String> {
    state.catalog.read().subjects()
}

pub fn get_plan_overview(state: &AppState) -> Result<PlanOverview, PlannerError> {
    let guard = state.active_plan.read();
    let active = guard.as_ref().ok_or(PlannerError::NoActivePlan)?;
    Ok(compute_overview(&active.plan))
}

/// History for display, most recent first. Waits for queued writes first.
pub async fn get_history(state: &AppState) -> Result<Vec<HistoryRecord>, PlannerError> {
    state.flush().await?;
    Ok(state.stores.history.load(&state.user).await?)
}

/// Write the active plan's current completion back onto its history record.
pub async fn refresh_history_completion(state: &AppState) -> Result<HistoryRecord, PlannerError> {
    let (id, percentage) = {
        let guard = state.active_plan.read();
        let active = guard.as_ref().ok_or(PlannerError::NoActivePlan)?;
        (active.id.clone(), classify_plan(&active.plan).percentage)
    };
    state.flush().await?;
    Ok(state
        .stores
        .history
        .refresh_completion(&state.user, &id, percentage)
        .await?)
}
