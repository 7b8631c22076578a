/*!
 * Scenarios
 *
 * Fixed workloads that start a subset of role loops against a fresh
 * coordinator, observe the monitor after a time window, then shut down and
 * check the expected end state.
 */

use super::worker::RoleWorker;
use crate::core::limits::{EVEN_PRODUCE_LIMIT, FULL_MIX_CAPACITY};
use crate::monitor::{Coordinator, MonitorSnapshot, Role, RoleTable, StatsSnapshot};
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, instrument};

/// Workload definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Capacity 11, even producer alone: fills to ten evens and blocks
    EvenProducerOnly,
    /// Capacity 1, odd producer alone: never admitted
    OddProducerOnly,
    /// Capacity 1, even consumer alone: never admitted
    EvenConsumerOnly,
    /// Capacity 1, odd consumer alone: never admitted
    OddConsumerOnly,
    /// Capacity 21, both producers: ten evens and ten odds
    BothProducers,
    /// All four roles: invariants hold and consumers make progress
    FullMix,
}

/// Outcome of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub capacity: usize,
    pub roles: Vec<Role>,
    pub observation_ms: u64,
    /// Monitor state at the end of the observation window
    pub snapshot: MonitorSnapshot,
    pub stats: StatsSnapshot,
    /// Operations completed by each role's worker
    pub completed: RoleTable<u64>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::EvenProducerOnly,
        Scenario::OddProducerOnly,
        Scenario::EvenConsumerOnly,
        Scenario::OddConsumerOnly,
        Scenario::BothProducers,
        Scenario::FullMix,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Scenario::EvenProducerOnly => "even-producer-only",
            Scenario::OddProducerOnly => "odd-producer-only",
            Scenario::EvenConsumerOnly => "even-consumer-only",
            Scenario::OddConsumerOnly => "odd-consumer-only",
            Scenario::BothProducers => "both-producers",
            Scenario::FullMix => "full-mix",
        }
    }

    pub const fn capacity(self) -> usize {
        match self {
            Scenario::EvenProducerOnly => 11,
            Scenario::OddProducerOnly
            | Scenario::EvenConsumerOnly
            | Scenario::OddConsumerOnly => 1,
            Scenario::BothProducers => 21,
            Scenario::FullMix => FULL_MIX_CAPACITY,
        }
    }

    pub const fn roles(self) -> &'static [Role] {
        match self {
            Scenario::EvenProducerOnly => &[Role::ProducerEven],
            Scenario::OddProducerOnly => &[Role::ProducerOdd],
            Scenario::EvenConsumerOnly => &[Role::ConsumerEven],
            Scenario::OddConsumerOnly => &[Role::ConsumerOdd],
            Scenario::BothProducers => &[Role::ProducerEven, Role::ProducerOdd],
            Scenario::FullMix => &Role::PRIORITY,
        }
    }

    /// Check the observed state against this scenario's expectation
    pub fn check(self, snapshot: &MonitorSnapshot, stats: &StatsSnapshot) -> Result<(), String> {
        let buffer = &snapshot.buffer;
        if buffer.occupancy > buffer.capacity {
            return Err(format!(
                "occupancy {} exceeds capacity {}",
                buffer.occupancy, buffer.capacity
            ));
        }
        if buffer.even_count + buffer.odd_count != buffer.occupancy {
            return Err(format!(
                "parity counts {} + {} do not add up to occupancy {}",
                buffer.even_count, buffer.odd_count, buffer.occupancy
            ));
        }
        if stats.handoff_violations > 0 {
            return Err(format!("{} hand-off violations", stats.handoff_violations));
        }

        match self {
            Scenario::EvenProducerOnly => {
                if buffer.occupancy != EVEN_PRODUCE_LIMIT || buffer.even_count != EVEN_PRODUCE_LIMIT
                {
                    return Err(format!(
                        "expected {EVEN_PRODUCE_LIMIT} even values, found occupancy {} with {} even",
                        buffer.occupancy, buffer.even_count
                    ));
                }
            }
            Scenario::OddProducerOnly | Scenario::EvenConsumerOnly | Scenario::OddConsumerOnly => {
                if buffer.occupancy != 0 {
                    return Err(format!("expected empty buffer, found {}", buffer.occupancy));
                }
            }
            Scenario::BothProducers => {
                let expected = 2 * EVEN_PRODUCE_LIMIT;
                if buffer.occupancy != expected {
                    return Err(format!("{} != {expected}", buffer.occupancy));
                }
                if snapshot.admissible[Role::ProducerEven] || snapshot.admissible[Role::ProducerOdd]
                {
                    return Err("a producer is still admissible at the fixed point".to_string());
                }
            }
            Scenario::FullMix => {
                let consumed =
                    stats.admitted[Role::ConsumerEven] + stats.admitted[Role::ConsumerOdd];
                if consumed == 0 {
                    return Err("consumers made no progress".to_string());
                }
            }
        }
        Ok(())
    }

    /// Run the workload for `observation`, then shut it down and report
    #[instrument(skip_all, fields(scenario = self.name()))]
    pub fn run(self, observation: Duration) -> anyhow::Result<ScenarioReport> {
        let coordinator = Arc::new(Coordinator::with_capacity(self.capacity())?);

        let mut workers = Vec::with_capacity(self.roles().len());
        for (id, &role) in self.roles().iter().enumerate() {
            match RoleWorker::spawn(role, coordinator.clone(), id) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    coordinator.shutdown();
                    return Err(e).with_context(|| format!("failed to spawn {role} worker"));
                }
            }
        }

        thread::sleep(observation);
        let snapshot = coordinator.snapshot();
        coordinator.shutdown();

        let mut completed = RoleTable::default();
        for worker in workers {
            let role = worker.role();
            completed[role] += worker.join()?;
        }

        let stats = coordinator.stats();
        let failure = self.check(&snapshot, &stats).err();

        info!(
            passed = failure.is_none(),
            occupancy = snapshot.occupancy(),
            admitted = stats.total_admitted(),
            "scenario finished"
        );

        Ok(ScenarioReport {
            scenario: self,
            capacity: self.capacity(),
            roles: self.roles().to_vec(),
            observation_ms: observation.as_millis() as u64,
            snapshot,
            stats,
            completed,
            passed: failure.is_none(),
            failure,
        })
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
