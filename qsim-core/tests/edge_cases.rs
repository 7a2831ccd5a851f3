//! Boundary behavior: empty runs, invalid parameters, custom collaborators.

use qsim_core::{
    run, run_with_config, ArrivalPattern, FixedSequence, PoissonArrivals, Server, ServicePolicy,
    SimError, Simulation, SimulationConfig, WaitingLine,
};

#[test]
fn zero_horizon_gives_empty_results() {
    for policy in [ServicePolicy::Stochastic, ServicePolicy::Deterministic] {
        let results = run(0.5, 1.0, 0.0, policy).unwrap();
        assert!(results.queue_waits.is_empty());
        assert!(results.service_times.is_empty());
        assert!(results.system_times.is_empty());
        assert!(results.running_mean.is_empty());
        assert_eq!(results.mean_queue_wait(), 0.0);
        assert_eq!(results.mean_service_time(), 0.0);
        assert_eq!(results.mean_system_time(), 0.0);
    }
}

#[test]
fn tiny_horizon_before_first_arrival() {
    // With u = 0.5 the first gap is ln 2 / lambda = 0.693..., past the horizon.
    let arrivals = PoissonArrivals::new(1.0, FixedSequence::new(vec![0.5])).unwrap();
    let server =
        Server::new(ServicePolicy::Deterministic, 1.0, FixedSequence::new(vec![0.0])).unwrap();
    let results = Simulation::from_parts(arrivals, server, WaitingLine::new(), 0.5)
        .unwrap()
        .run()
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(results.summary.arrivals, 0);
}

#[test]
fn invalid_parameters_are_rejected_up_front() {
    let cases = [
        (0.0, 1.0, 10.0),
        (-0.5, 1.0, 10.0),
        (0.5, 0.0, 10.0),
        (0.5, f64::INFINITY, 10.0),
        (0.5, 1.0, -5.0),
        (0.5, 1.0, f64::INFINITY),
    ];
    for (lambda, mu, horizon) in cases {
        let err = run(lambda, mu, horizon, ServicePolicy::Stochastic).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)), "{lambda} {mu} {horizon}: {err}");
    }
}

#[test]
fn rates_without_a_finite_mean_are_rejected() {
    // 1 / rate overflows for subnormal rates, so every sample would be infinite.
    let config = SimulationConfig::mm1(1e-310, 1.0, 10.0);
    assert!(matches!(config.validate(), Err(SimError::Configuration(_))));

    let cases = [
        (1e-310, 1.0, 10.0, ServicePolicy::Stochastic),
        (1e-311, 1e-310, 1e6, ServicePolicy::Deterministic),
        (0.5, 1e-320, 10.0, ServicePolicy::Stochastic),
    ];
    for (lambda, mu, horizon, policy) in cases {
        let err = run(lambda, mu, horizon, policy).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)), "{lambda} {mu}: {err}");
    }
}

#[test]
fn smallest_normal_rate_never_panics() {
    // Gaps reach ~1e307 or overflow; either way nothing arrives before the horizon.
    for seed in 0..64 {
        let config = SimulationConfig::md1(f64::MIN_POSITIVE, 1.0, 10.0).with_seed(seed);
        match run_with_config(&config) {
            Ok(results) => assert!(results.is_empty()),
            Err(err) => assert!(matches!(err, SimError::Event(_)), "seed {seed}: {err}"),
        }
    }
}

#[test]
fn entity_in_service_at_horizon_is_excluded() {
    // One arrival at 1.0 whose service (100.0) runs past the horizon.
    struct Once(bool);
    impl ArrivalPattern for Once {
        fn next_inter_arrival(&mut self) -> f64 {
            if std::mem::replace(&mut self.0, true) {
                1_000.0
            } else {
                1.0
            }
        }
    }
    let server =
        Server::new(ServicePolicy::Deterministic, 0.01, FixedSequence::new(vec![0.0])).unwrap();
    let results = Simulation::from_parts(Once(false), server, WaitingLine::new(), 10.0)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(results.summary.arrivals, 1);
    assert_eq!(results.summary.departures, 0);
    assert_eq!(results.summary.left_in_system, 1);
    assert_eq!(results.service_times.len(), 1);
    assert!((results.service_times[0] - 100.0).abs() < 1e-9);
    assert!(results.queue_waits.is_empty());
}

#[test]
fn config_defaults_match_documented_values() {
    let config = SimulationConfig::default();
    assert_eq!(config.arrival_rate, 0.5);
    assert_eq!(config.service_rate, 1.0);
    assert_eq!(config.horizon, 10_000.0);
    assert_eq!(config.service_policy, ServicePolicy::Stochastic);
    assert_eq!(config.seed, None);
}
