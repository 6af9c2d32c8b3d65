//! # Workload Generator
//!
//! Submits random values for keys drawn uniformly from a fixed set, at a
//! fixed rate, until the configured duration elapses.

use crate::domain::{SchedulerError, WorkloadConfig};
use crate::ports::TransactionSink;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{info, warn};

/// Spawn a workload task seeded from OS entropy.
///
/// The task resolves to the number of transactions submitted.
pub fn run_workload<S>(sink: S, config: WorkloadConfig) -> Result<JoinHandle<u64>, SchedulerError>
where
    S: TransactionSink + 'static,
{
    run_workload_with_rng(sink, config, StdRng::from_entropy())
}

/// Spawn a workload task with a caller-supplied generator.
pub fn run_workload_with_rng<S>(
    sink: S,
    config: WorkloadConfig,
    mut rng: StdRng,
) -> Result<JoinHandle<u64>, SchedulerError>
where
    S: TransactionSink + 'static,
{
    config.validate()?;

    Ok(tokio::spawn(async move {
        let mut ticker = interval(config.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = sleep(config.duration);
        tokio::pin!(deadline);

        info!(
            "[sc-03] Workload started: {} keys, {} tx/s for {:?}",
            config.keys.len(),
            config.rate_per_sec,
            config.duration
        );

        let mut submitted = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => break,
                _ = ticker.tick() => {
                    let key = config.keys[rng.gen_range(0..config.keys.len())].as_bytes().to_vec();
                    let mut value = vec![0u8; config.value_size];
                    rng.fill_bytes(&mut value);
                    if let Err(e) = sink.submit(key, value).await {
                        warn!("[sc-03] Workload stopped early: {}", e);
                        break;
                    }
                    submitted += 1;
                }
            }
        }

        info!("[sc-03] Workload finished: {} transactions submitted", submitted);
        submitted
    }))
}
