use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future};

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::geometry::{CircleData, DomeData, ShapeParams, circle_grid};
use crate::state::{PlannerState, ShapeKind};

/// Runs backend fetches off the main schedule and feeds results back into
/// [`PlannerState`], keeping only the latest request generation.
pub struct FetchPlugin;

impl Plugin for FetchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveFetch>()
            .add_systems(Update, (dispatch_requests, poll_fetch).chain());
    }
}

enum FetchOutcome {
    Circle(CircleData),
    Dome(DomeData),
}

struct InFlight {
    generation: u64,
    params: ShapeParams,
    task: Task<Result<FetchOutcome, ApiError>>,
}

/// At most one tracked fetch; replacing it drops (and thereby cancels) the
/// superseded task.
#[derive(Resource, Default)]
struct ActiveFetch(Option<InFlight>);

fn dispatch_requests(
    mut state: ResMut<PlannerState>,
    mut active: ResMut<ActiveFetch>,
    config: Res<AppConfig>,
) {
    let Some(kind) = state.pending.take() else {
        return;
    };
    let generation = state.begin_request();
    let params = match kind {
        ShapeKind::Circle => state.circle_params,
        ShapeKind::Dome => state.dome_params,
    };
    let client = ApiClient::new(config.api_base.clone());

    info!(?kind, radius = params.radius, "dispatching generate request");
    let task = AsyncComputeTaskPool::get().spawn(async move {
        match kind {
            ShapeKind::Circle => client.fetch_circle(&params).map(FetchOutcome::Circle),
            ShapeKind::Dome => client.fetch_dome(&params).map(FetchOutcome::Dome),
        }
    });

    if active
        .0
        .replace(InFlight {
            generation,
            params,
            task,
        })
        .is_some()
    {
        debug!("superseded an in-flight request");
    }
}

fn poll_fetch(mut state: ResMut<PlannerState>, mut active: ResMut<ActiveFetch>) {
    let Some(inflight) = active.0.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(&mut inflight.task)) else {
        return;
    };
    let generation = inflight.generation;
    let params = inflight.params;
    active.0 = None;

    match result {
        Ok(FetchOutcome::Circle(data)) => {
            verify_circle(&params, &data);
            if !state.apply_circle(generation, data) {
                debug!(generation, "discarded stale circle response");
            }
        }
        Ok(FetchOutcome::Dome(data)) => {
            if !state.apply_dome(generation, data) {
                debug!(generation, "discarded stale dome response");
            }
        }
        Err(err) => {
            warn!(generation, "generate failed: {err}");
            state.fail_request(generation, format!("Generate failed: {err}"));
        }
    }
}

/// The backend and the local geometry engine implement the same band
/// predicate; a divergence means one of them drifted. Checked only for
/// small grids to keep the comparison cheap.
fn verify_circle(params: &ShapeParams, data: &CircleData) {
    if params.radius > 64 {
        return;
    }
    let local = circle_grid(params.radius, params.filled, params.thickness);
    if local.grid != data.grid || local.block_count != data.block_count {
        warn!(
            radius = params.radius,
            "backend circle diverges from the local shell predicate"
        );
    }
}
