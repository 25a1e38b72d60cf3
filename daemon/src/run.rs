//! One-tick replay over a genesis snapshot.

use anyhow::Context;
use std::path::Path;

use verity_nullables::{GenesisState, NullWorld};
use verity_settlement::{Collaborators, SettlementEngine, TickReport};
use verity_store::{ExpirationQueue, ParamStore, QueueKind};
use verity_store_lmdb::LmdbEnvironment;
use verity_types::{SettlementParams, Timestamp};

pub fn read_genesis(path: &Path) -> anyhow::Result<GenesisState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading genesis {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing genesis {}", path.display()))
}

pub fn write_genesis(path: &Path, genesis: &GenesisState) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(genesis)?;
    std::fs::write(path, json).with_context(|| format!("writing genesis {}", path.display()))
}

/// Settle one tick at `now` and return the report with the post-tick state.
///
/// With `lmdb`, the expiration queues and params are read from the persisted
/// store instead of the snapshot. An aborted tick restores both persisted
/// queues to their pre-tick contents before the error is returned.
pub fn run_tick(
    mut genesis: GenesisState,
    now: Timestamp,
    params: Option<SettlementParams>,
    lmdb: Option<&LmdbEnvironment>,
) -> anyhow::Result<(TickReport, GenesisState)> {
    if let Some(params) = params {
        genesis.params = params;
    }
    let world = NullWorld::from_genesis(genesis).context("importing genesis")?;

    let Some(env) = lmdb else {
        let report = SettlementEngine::new(collaborators(
            &world,
            &world.params,
            &world.claim_queue,
            &world.stake_queue,
        ))
        .run_end_of_tick_settlement(now)?;
        return Ok((report, world.export_genesis()));
    };

    let claim_queue = env.expiration_queue(QueueKind::ClaimExpiration);
    let stake_queue = env.expiration_queue(QueueKind::StakeExpiration);
    let param_store = env.param_store();
    let claim_snapshot = claim_queue.ids()?;
    let stake_snapshot = stake_queue.ids()?;

    let result = SettlementEngine::new(collaborators(
        &world,
        &param_store,
        &claim_queue,
        &stake_queue,
    ))
    .run_end_of_tick_settlement(now);

    match result {
        Ok(report) => {
            let mut post = world.export_genesis();
            post.params = param_store.get_params()?;
            post.claim_queue = claim_queue.ids()?;
            post.stake_queue = stake_queue.ids()?;
            Ok((report, post))
        }
        Err(e) => {
            claim_queue.replace(&claim_snapshot)?;
            stake_queue.replace(&stake_snapshot)?;
            tracing::warn!(
                claim_queue = claim_snapshot.len(),
                stake_queue = stake_snapshot.len(),
                "restored persisted queues after aborted tick"
            );
            Err(e.into())
        }
    }
}

/// Seed the persisted queues and params from a snapshot.
pub fn load_queues(
    mut genesis: GenesisState,
    params: Option<SettlementParams>,
    env: &LmdbEnvironment,
) -> anyhow::Result<()> {
    if let Some(params) = params {
        genesis.params = params;
    }
    // validates params and that every queued id exists
    let world = NullWorld::from_genesis(genesis).context("importing genesis")?;
    let state = world.export_genesis();

    env.param_store().put_params(&state.params)?;
    env.expiration_queue(QueueKind::ClaimExpiration)
        .replace(&state.claim_queue)?;
    env.expiration_queue(QueueKind::StakeExpiration)
        .replace(&state.stake_queue)?;
    tracing::info!(
        claims = state.claim_queue.len(),
        stakes = state.stake_queue.len(),
        "loaded expiration queues"
    );
    Ok(())
}

fn collaborators<'a>(
    world: &'a NullWorld,
    params: &'a dyn ParamStore,
    claim_queue: &'a dyn ExpirationQueue,
    stake_queue: &'a dyn ExpirationQueue,
) -> Collaborators<'a> {
    Collaborators {
        ledger: &world.ledger,
        claims: &world.claims,
        stakes: &world.stakes,
        params,
        pool: &world.pool,
        claim_queue,
        stake_queue,
    }
}
