use crate::errors::AppError;
use crate::goal::GoalInput;
use crate::models::{GenerateForm, GenerateRequest, ToggleRequest, TrackerSummary};
use crate::state::AppState;
use crate::storage::save_tracker;
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_index(&session.tracker.summary()))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<TrackerSummary>, AppError> {
    let session = state.session.lock().await;
    Ok(Json(session.tracker.summary()))
}

pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<TrackerSummary>, AppError> {
    let Json(payload) = payload?;
    let goal = payload.goal.resolve()?;
    let response = apply_generate(&state, goal).await?;
    Ok(Json(response))
}

pub async fn generate_form(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Redirect, AppError> {
    let goal = GoalInput::Text(form.goal).resolve()?;
    apply_generate(&state, goal).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle(
    State(state): State<AppState>,
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<TrackerSummary>, AppError> {
    let Json(payload) = payload?;
    let index = usize::try_from(payload.index)
        .map_err(|_| AppError::bad_request("index must not be negative"))?;
    let response = apply_toggle(&state, index).await?;
    Ok(Json(response))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, index).await?;
    Ok(Redirect::to("/"))
}

pub async fn clear(State(state): State<AppState>) -> Result<Json<TrackerSummary>, AppError> {
    let response = apply_clear(&state).await?;
    Ok(Json(response))
}

pub async fn clear_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_clear(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_generate(state: &AppState, goal: u32) -> Result<TrackerSummary, AppError> {
    let summary = mutate(state, |tracker| {
        tracker.regenerate(i64::from(goal), &mut rand::thread_rng())
    })
    .await?;
    info!(goal, "generated new allocation");
    Ok(summary)
}

async fn apply_toggle(state: &AppState, index: usize) -> Result<TrackerSummary, AppError> {
    let mut now_selected = false;
    let summary = mutate(state, |tracker| {
        now_selected = tracker.toggle(index)?;
        Ok(())
    })
    .await?;
    info!(index, now_selected, saved_total = summary.saved_total, "toggled day");
    Ok(summary)
}

async fn apply_clear(state: &AppState) -> Result<TrackerSummary, AppError> {
    let summary = mutate(state, |tracker| {
        tracker.clear_selection();
        Ok(())
    })
    .await?;
    info!("cleared selection");
    Ok(summary)
}

/// Applies `change` to a copy of the tracker and swaps it in only once the
/// result is on disk. On any failure both the tracker and the store entries
/// are left as they were.
async fn mutate<F>(state: &AppState, change: F) -> Result<TrackerSummary, AppError>
where
    F: FnOnce(&mut Tracker) -> Result<(), AppError>,
{
    let mut guard = state.session.lock().await;
    let session = &mut *guard;

    let mut next = session.tracker.clone();
    change(&mut next)?;

    let previous = session.store.clone();
    let persisted = match save_tracker(&mut session.store, &next) {
        Ok(()) => session.store.flush().await,
        Err(err) => Err(err),
    };
    if let Err(err) = persisted {
        session.store = previous;
        return Err(err);
    }

    session.tracker = next;
    Ok(session.tracker.summary())
}
