//! Batch simulation of contract generation on the standard map.
//!
//! Each trial seats one player on the two ends of a random plains route,
//! generates their starting contract, a private offer batch, and a market
//! contract, and records the outcome of every step. Trials are independent
//! and seeded per index, so a fixed seed gives the same report regardless of
//! thread count.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::GenerationConfig;
use crate::contract::draw::pick_uniform;
use crate::contract::generate::{generate_market_contract, generate_private_contract_offers, generate_starting_contract};
use crate::contract::model::Contract;
use crate::error::GenerationFailure;
use crate::map::{cities_connected_to, no_mountains, standard_map, GameMap, Route};
use crate::protocol::snapshot::{encode_contract, ContractJson};
use crate::state::{GameState, Player, PlayerId};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of independent trials.
    pub trials: usize,
    /// Worker threads; 1 runs on the calling thread.
    pub threads: usize,
    /// Base seed (0 = use entropy).
    pub seed: u64,
    /// Suppress progress lines on stderr.
    pub quiet: bool,
    pub generation: GenerationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: 1000,
            threads: 4,
            seed: 0,
            quiet: false,
            generation: GenerationConfig::default(),
        }
    }
}

/// The generation step a record or tally belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Starting = 0,
    Offer = 1,
    Market = 2,
}

pub const ALL_OPERATIONS: [Operation; 3] = [Operation::Starting, Operation::Offer, Operation::Market];

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Operation::Starting => "starting",
            Operation::Offer => "offer",
            Operation::Market => "market",
        }
    }
}

/// One generated contract with its rewards, as written to JSONL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRecord {
    pub trial: usize,
    pub operation: Operation,
    pub contract: ContractJson,
    pub money: u32,
    pub ties: u8,
}

/// Successes and failures of one operation, failures keyed by variant name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationTally {
    pub successes: usize,
    pub failures: BTreeMap<&'static str, usize>,
}

impl OperationTally {
    pub fn failure_count(&self) -> usize {
        self.failures.values().sum()
    }
}

/// Everything one trial produced.
#[derive(Debug, Clone, Default)]
pub struct TrialOutcome {
    pub records: Vec<ContractRecord>,
    pub failures: Vec<(Operation, GenerationFailure)>,
    /// Offers missing from the private batch.
    pub offer_shortfall: usize,
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub trials: usize,
    pub tallies: [OperationTally; 3],
    pub total_money: u64,
    /// Contracts by tie reward, index 0 = 1 tie.
    pub tie_counts: [usize; 4],
    pub offer_shortfall: usize,
    pub records: Vec<ContractRecord>,
}

impl SimulationReport {
    pub fn tally(&self, op: Operation) -> &OperationTally {
        &self.tallies[op as usize]
    }

    pub fn contract_count(&self) -> usize {
        self.records.len()
    }

    pub fn mean_money(&self) -> f64 {
        self.total_money as f64 / self.records.len().max(1) as f64
    }

    /// Returns the number of `NoMarketCommodity` failures seen.
    pub fn unexpected_failures(&self) -> usize {
        self.tallies
            .iter()
            .filter_map(|t| t.failures.get("no_market_commodity"))
            .sum()
    }

    fn absorb(&mut self, outcome: TrialOutcome) {
        self.trials += 1;
        self.offer_shortfall += outcome.offer_shortfall;
        for (op, failure) in outcome.failures {
            *self.tallies[op as usize].failures.entry(failure.name()).or_default() += 1;
        }
        for record in outcome.records {
            self.tallies[record.operation as usize].successes += 1;
            self.total_money += u64::from(record.money);
            if (1..=4).contains(&record.ties) {
                self.tie_counts[record.ties as usize - 1] += 1;
            }
            self.records.push(record);
        }
    }
}

/// Builds a record for a generated contract, or None if its rewards are undefined.
fn record(map: &GameMap, trial: usize, operation: Operation, contract: &Contract) -> Option<ContractRecord> {
    let Some(reward) = contract.spec().reward(map) else {
        log::warn!(
            "no reward for {} to {}",
            map.commodity_key(contract.commodity),
            map.city_key(contract.destination)
        );
        return None;
    };
    Some(ContractRecord {
        trial,
        operation,
        contract: encode_contract(map, contract),
        money: reward.money,
        ties: reward.ties,
    })
}

/// Plays one trial on `map`.
///
/// Odd trials give the player a hub on their first city; every third trial
/// adds a regional office in their second city's region, so upgraded offer
/// batches are exercised too.
pub fn run_trial(map: &GameMap, config: &GenerationConfig, trial: usize, rng: &mut SmallRng) -> TrialOutcome {
    let mut outcome = TrialOutcome::default();
    let starts = starting_routes(map, config);
    let Some(route) = pick_uniform(&starts, rng) else {
        log::warn!("trial {}: map has no plains route with a reachable city", trial);
        return outcome;
    };
    let starting = route.cities;
    let id = PlayerId(format!("p{trial}"));

    let mut player = Player::new(id.clone(), starting.to_vec());
    if trial % 2 == 1 {
        player.hub_city = Some(starting[0]);
    }
    if trial % 3 == 2 {
        player.regional_office = map.city(starting[1]).map(|c| c.region);
    }
    let mut state = GameState::new(vec![player.clone()], Vec::new());
    let created_at = trial as u64;

    let push = |outcome: &mut TrialOutcome, op: Operation, contract: &Contract| {
        if let Some(r) = record(map, trial, op, contract) {
            outcome.records.push(r);
        }
    };

    match generate_starting_contract(map, &state, &starting, config, rng) {
        Ok(spec) => {
            let contract = Contract::private(spec, id.clone(), created_at);
            push(&mut outcome, Operation::Starting, &contract);
            state.contracts.push(contract);
        }
        Err(e) => outcome.failures.push((Operation::Starting, e)),
    }

    let batch = generate_private_contract_offers(map, &state, &player, config, rng);
    outcome.offer_shortfall = batch.shortfall();
    for spec in &batch.offers {
        push(&mut outcome, Operation::Offer, &Contract::private(*spec, id.clone(), created_at));
    }

    match generate_market_contract(map, &state, config, rng) {
        Ok(spec) => push(&mut outcome, Operation::Market, &Contract::market(spec, created_at)),
        Err(e) => outcome.failures.push((Operation::Market, e)),
    }

    outcome
}

/// Plains routes with at least one other city within `candidate_hops` over
/// plains, so a starting contract has somewhere to go.
pub fn starting_routes<'a>(map: &'a GameMap, config: &GenerationConfig) -> Vec<&'a Route> {
    map.routes()
        .iter()
        .filter(|r| !r.mountainous)
        .filter(|r| !cities_connected_to(map, &r.cities, config.candidate_hops, no_mountains, false).is_empty())
        .collect()
}

/// Counts finished trials across worker threads.
struct Progress {
    completed: AtomicUsize,
    total: usize,
    step: usize,
    quiet: bool,
}

impl Progress {
    fn new(config: &SimulationConfig) -> Self {
        Progress {
            completed: AtomicUsize::new(0),
            total: config.trials,
            step: (config.trials / 10).max(1),
            quiet: config.quiet,
        }
    }

    /// Marks one trial finished. Returns a progress line every tenth of the
    /// run and on the last trial, unless quiet.
    fn tick(&self, outcome: &TrialOutcome) -> Option<String> {
        let n = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.quiet || (n % self.step != 0 && n != self.total) {
            return None;
        }
        Some(format!(
            "Trial {}/{}: {} contracts, {} failed",
            n,
            self.total,
            outcome.records.len(),
            outcome.failures.len()
        ))
    }
}

fn run_one(map: &GameMap, config: &SimulationConfig, progress: &Progress, i: usize) -> TrialOutcome {
    let outcome = run_trial(map, &config.generation, i, &mut trial_rng(config.seed, i));
    if let Some(line) = progress.tick(&outcome) {
        eprintln!("{}", line);
    }
    outcome
}

fn trial_rng(seed: u64, trial: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(trial as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn run_sequential(map: &GameMap, config: &SimulationConfig, progress: &Progress) -> Vec<TrialOutcome> {
    (0..config.trials).map(|i| run_one(map, config, progress, i)).collect()
}

/// Runs every trial and aggregates the outcomes in trial order.
///
/// When `config.threads > 1`, trials run on a rayon pool of that size.
/// Progress goes to stderr unless `config.quiet` is set.
pub fn run_simulation(config: &SimulationConfig) -> SimulationReport {
    use rayon::prelude::*;

    let map = standard_map();
    let progress = Progress::new(config);
    let outcomes: Vec<TrialOutcome> = if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
            Ok(pool) => pool.install(|| {
                (0..config.trials)
                    .into_par_iter()
                    .map(|i| run_one(map, config, &progress, i))
                    .collect::<Vec<_>>()
            }),
            Err(e) => {
                log::warn!("falling back to one thread: {}", e);
                run_sequential(map, config, &progress)
            }
        }
    } else {
        run_sequential(map, config, &progress)
    };

    let mut report = SimulationReport::default();
    for outcome in outcomes {
        report.absorb(outcome);
    }
    report
}

/// Writes contract records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[ContractRecord], out: &mut W) -> std::io::Result<()> {
    for r in records {
        serde_json::to_writer(&mut *out, r)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of a simulation run to stderr.
pub fn print_summary(report: &SimulationReport) {
    eprintln!("=== Simulation Summary ===");
    eprintln!("Trials: {}", report.trials);
    eprintln!("Contracts: {}", report.contract_count());
    eprintln!("Mean money: {:.0}", report.mean_money());
    eprintln!("Offer shortfall: {}", report.offer_shortfall);
    for op in ALL_OPERATIONS {
        let t = report.tally(op);
        eprintln!("{:>9}: {} ok, {} failed", op.name(), t.successes, t.failure_count());
        for (name, n) in &t.failures {
            eprintln!("           {}: {}", name, n);
        }
    }
    eprintln!("Tie distribution:");
    let total = report.tie_counts.iter().sum::<usize>().max(1);
    for (i, &n) in report.tie_counts.iter().enumerate() {
        eprintln!("  {} ties: {} ({:.1}%)", i + 1, n, 100.0 * n as f64 / total as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(threads: usize) -> SimulationConfig {
        SimulationConfig {
            trials: 40,
            threads,
            seed: 17,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn report_is_consistent() {
        let report = run_simulation(&small(1));
        assert_eq!(report.trials, 40);
        let successes: usize = ALL_OPERATIONS.iter().map(|op| report.tally(*op).successes).sum();
        assert_eq!(successes, report.contract_count());
        assert_eq!(report.tie_counts.iter().sum::<usize>(), report.contract_count());
        for r in &report.records {
            assert_eq!(r.money % 3000, 0);
            assert!((1..=4).contains(&r.ties));
        }
        assert!(report.tally(Operation::Starting).successes > 0);
        assert_eq!(report.unexpected_failures(), 0);
        assert_eq!(report.tally(Operation::Starting).failures.get("no_candidates"), None);
    }

    #[test]
    fn seeded_runs_match_across_thread_counts() {
        let a = run_simulation(&small(1));
        let b = run_simulation(&small(3));
        assert_eq!(a.records, b.records);
        assert_eq!(a.tallies, b.tallies);
    }

    #[test]
    fn jsonl_has_one_line_per_record() {
        let report = run_simulation(&small(1));
        let mut buf = Vec::new();
        write_jsonl(&report.records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), report.records.len());
        if let Some(first) = text.lines().next() {
            let v: serde_json::Value = serde_json::from_str(first).unwrap();
            assert!(v["contract"]["commodity"].is_string());
            assert!(v["money"].is_u64());
        }
    }

    #[test]
    fn progress_respects_quiet() {
        let quiet = Progress::new(&small(1));
        let outcome = TrialOutcome::default();
        for _ in 0..40 {
            assert_eq!(quiet.tick(&outcome), None);
        }
        assert_eq!(quiet.completed.load(Ordering::Relaxed), 40);

        let loud = Progress::new(&SimulationConfig { quiet: false, ..small(1) });
        let lines: Vec<String> = (0..40).filter_map(|_| loud.tick(&outcome)).collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Trial 4/40: 0 contracts, 0 failed");
        assert_eq!(lines[9], "Trial 40/40: 0 contracts, 0 failed");
    }

    #[test]
    fn every_standard_starting_route_has_candidates() {
        let map = standard_map();
        let config = GenerationConfig::default();
        let starts = starting_routes(map, &config);
        let plains = map.routes().iter().filter(|r| !r.mountainous).count();
        assert_eq!(starts.len(), plains);
    }

    #[test]
    fn isolated_plains_route_is_not_a_start() {
        use crate::map::{CityDefinition, GameMapBuilder, Region};

        let map = GameMapBuilder::new()
            .city(CityDefinition::new("a", Region::NorthWest, 47.0, -122.0).supplying(&["fish"]))
            .city(CityDefinition::new("b", Region::NorthWest, 45.0, -122.0).supplying(&["lumber"]))
            .city(CityDefinition::new("c", Region::NorthWest, 46.0, -117.0))
            .city(CityDefinition::new("d", Region::NorthCentral, 46.0, -108.0))
            .city(CityDefinition::new("e", Region::NorthCentral, 45.0, -100.0).supplying(&["wheat"]))
            .route("a", "b", false)
            .route("a", "c", true)
            .route("b", "c", true)
            .route("c", "d", false)
            .route("d", "e", false)
            .build()
            .unwrap();
        let config = GenerationConfig::default();
        let keys: Vec<[&str; 2]> = starting_routes(&map, &config)
            .iter()
            .map(|r| [map.city_key(r.cities[0]), map.city_key(r.cities[1])])
            .collect();
        assert_eq!(keys, vec![["c", "d"], ["d", "e"]]);

        for trial in 0..20 {
            let mut rng = SmallRng::seed_from_u64(trial);
            let outcome = run_trial(&map, &config, trial as usize, &mut rng);
            assert!(
                outcome.failures.iter().all(|(_, e)| e.name() != "no_candidates"),
                "{:?}",
                outcome.failures
            );
        }
    }

    #[test]
    fn empty_run() {
        let report = run_simulation(&SimulationConfig {
            trials: 0,
            threads: 1,
            ..Default::default()
        });
        assert_eq!(report.trials, 0);
        assert_eq!(report.mean_money(), 0.0);
    }
}
