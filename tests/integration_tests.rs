use approx::assert_relative_eq;
use fx_bond_risk::config::RiskConfig;
use fx_bond_risk::core::error::RiskError;
use fx_bond_risk::core::portfolio::{Exposure, Portfolio};
use fx_bond_risk::pricing::bond::price_bond;
use fx_bond_risk::scenario::engine::{simulate_scenarios, ScenarioConfig, ScenarioEngine};
use fx_bond_risk::sensitivity::calculator::{bond_dv01, fx_delta, portfolio_risk_summary};
use fx_bond_risk::simulation::monte_carlo::{
    monte_carlo_var, portfolio_var, MonteCarloConfig, MonteCarloEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// z such that P(Z <= -z) = 5% for a standard normal.
const Z_95: f64 = 1.6448536269514722;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Full pipeline: pricing → sensitivities → scenarios → Monte Carlo.
#[test]
fn full_pipeline_reference_book() {
    init_logging();

    let pv = price_bond(1_000.0, 0.04, 5, 0.05, 1).unwrap();
    assert_relative_eq!(pv, 956.71, epsilon = 0.01);

    let dv01 = bond_dv01(1_000.0, 0.04, 5, 0.05).unwrap();
    assert!(dv01 > 0.41 && dv01 < 0.43, "dv01 {}", dv01);

    let sens = portfolio_risk_summary(10_000.0, 1.25, 1_000.0).unwrap();
    assert!(sens.fx_delta < 0.0, "curve delta must be negative: {}", sens.fx_delta);
    assert_relative_eq!(sens.fx_delta, -49.7512, epsilon = 1e-4);
    assert_eq!(sens.bond_dv01, dv01);

    let scenarios = simulate_scenarios(10_000.0, 1.25, 1_000.0, 0.05).unwrap();
    assert_eq!(scenarios.len(), 6);
    let severe_neg = &scenarios[5];
    assert_eq!(severe_neg.name, "Severe_Neg");
    // -10% FX on a negative delta gains; +2% yield loses on the bond.
    assert!(severe_neg.fx_pnl > Decimal::ZERO);
    assert!(severe_neg.bond_pnl < Decimal::ZERO);
    assert_eq!(severe_neg.fx_pnl, dec!(497.51));
    assert_eq!(severe_neg.bond_pnl, dec!(-84.17));
    assert_eq!(severe_neg.total_pnl, dec!(413.34));

    let config = MonteCarloConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let (summary, pnl) = monte_carlo_var(
        config.n_sims,
        10_000.0,
        1.25,
        1_000.0,
        0.05,
        config.fx_vol,
        config.rate_vol,
        config.confidence,
        &mut rng,
    )
    .unwrap();
    assert!(summary.var > 0.0);
    assert!(summary.worst_loss <= summary.var_threshold());
    assert!(summary.worst_loss <= summary.expected_loss);
    let cutoff = pnl.percentile(config.tail_percentile()).unwrap();
    assert_eq!(cutoff, -summary.var);
    assert_relative_eq!(pnl.percentile(5.0).unwrap(), cutoff, epsilon = 1e-6);
}

#[test]
fn fx_curve_zero_move_is_exactly_zero() {
    for rate in [0.5, 1.1, 1.25, 1.3371, 150.7] {
        let curve = fx_delta(12_345.67, rate).unwrap();
        assert_eq!(curve.value_at(0.0).unwrap(), 0.0, "rate {}", rate);
    }
}

#[test]
fn scenarios_are_bit_identical_on_repeat() {
    let a = simulate_scenarios(10_000.0, 1.25, 1_000.0, 0.05).unwrap();
    let b = simulate_scenarios(10_000.0, 1.25, 1_000.0, 0.05).unwrap();
    assert_eq!(a, b);
}

#[test]
fn engines_agree_in_sign_with_equal_exposure() {
    let portfolio = Portfolio::default();
    for exposure in [Exposure::Long, Exposure::Short] {
        let scenario = ScenarioEngine::new(ScenarioConfig {
            exposure,
            ..Default::default()
        })
        .run(&portfolio)
        .unwrap();
        let (summary, _) = MonteCarloEngine::new(MonteCarloConfig {
            exposure,
            n_sims: 100,
            ..Default::default()
        })
        .run(&portfolio)
        .unwrap();

        let scenario_delta = exposure.orient(scenario.sensitivities().fx_delta);
        assert_eq!(scenario_delta.signum(), summary.fx_delta.signum());
        assert_eq!(scenario_delta, summary.fx_delta);

        // Mild_Positive is a +1% FX move: its FX P&L carries the delta's sign.
        let mild = scenario.get("Mild_Positive").unwrap();
        assert_eq!(mild.fx_pnl > Decimal::ZERO, summary.fx_delta > 0.0);
    }
}

#[test]
fn default_engines_take_opposite_fx_views() {
    let portfolio = Portfolio::default();
    let scenario = ScenarioEngine::default().run(&portfolio).unwrap();
    let (summary, _) = MonteCarloEngine::default().run(&portfolio).unwrap();
    assert_eq!(scenario.exposure(), Exposure::Long);
    assert_eq!(summary.fx_delta, -scenario.sensitivities().fx_delta);
}

#[test]
fn monte_carlo_var_converges_to_analytic_quantile() {
    init_logging();
    let portfolio = Portfolio::default();
    let config = MonteCarloConfig {
        n_sims: 1_000_000,
        seed: 2024,
        ..Default::default()
    };
    let (summary, _) = MonteCarloEngine::new(config.clone()).run(&portfolio).unwrap();

    let fx_sigma = summary.fx_delta * config.fx_vol * 100.0;
    let bond_sigma = summary.bond_dv01 * config.rate_vol * 10_000.0;
    let analytic = Z_95 * (fx_sigma.powi(2) + bond_sigma.powi(2)).sqrt();

    assert_relative_eq!(summary.var, analytic, max_relative = 0.02);
    assert!(summary.expected_loss.abs() < 0.5, "mean {}", summary.expected_loss);
}

#[test]
fn injected_generators_do_not_share_state() {
    let portfolio = Portfolio::default();
    let config = MonteCarloConfig {
        n_sims: 2_000,
        ..Default::default()
    };
    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let (_, first_a) = portfolio_var(&portfolio, &config, &mut rng_a).unwrap();
    let (_, first_b) = portfolio_var(&portfolio, &config, &mut rng_b).unwrap();
    assert_eq!(first_a, first_b);

    // Advancing one generator does not affect the other.
    let (_, second_a) = portfolio_var(&portfolio, &config, &mut rng_a).unwrap();
    assert_ne!(first_a, second_a);
    let (_, second_b) = portfolio_var(&portfolio, &config, &mut rng_b).unwrap();
    assert_eq!(second_a, second_b);
}

#[test]
fn concurrent_runs_match_sequential() {
    let portfolio = Portfolio::default();
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let portfolio = portfolio.clone();
            std::thread::spawn(move || {
                MonteCarloEngine::new(MonteCarloConfig {
                    seed,
                    n_sims: 5_000,
                    ..Default::default()
                })
                .run(&portfolio)
                .unwrap()
                .0
            })
        })
        .collect();
    for (seed, handle) in handles.into_iter().enumerate() {
        let threaded = handle.join().unwrap();
        let sequential = MonteCarloEngine::new(MonteCarloConfig {
            seed: seed as u64,
            n_sims: 5_000,
            ..Default::default()
        })
        .run(&portfolio)
        .unwrap()
        .0;
        assert_eq!(threaded, sequential);
    }
}

#[test]
fn configuration_drives_both_engines() {
    init_logging();
    let config = RiskConfig::from_json_str(
        r#"{
            "portfolio": { "fx_position": 20000 },
            "scenarios": { "exposure": "short" },
            "monte_carlo": { "n_sims": 5000, "confidence": 0.99, "seed": 1 }
        }"#,
    )
    .unwrap();

    let scenarios = ScenarioEngine::new(config.scenarios.clone())
        .run(&config.portfolio)
        .unwrap();
    let (summary, _) = MonteCarloEngine::new(config.monte_carlo.clone())
        .run(&config.portfolio)
        .unwrap();

    // Doubling the position doubles the FX delta.
    assert_relative_eq!(scenarios.sensitivities().fx_delta, -99.5025, epsilon = 1e-3);
    assert_eq!(summary.confidence, 0.99);
    assert_eq!(summary.simulations, 5_000);
}

#[test]
fn errors_surface_at_the_boundary() {
    assert!(matches!(
        fx_delta(10_000.0, 0.0),
        Err(RiskError::DivisionByZero { .. })
    ));
    assert!(matches!(
        bond_dv01(1_000.0, 0.04, 5, 0.0),
        Err(RiskError::DivisionByZero { .. })
    ));
    let zero_sims = MonteCarloEngine::new(MonteCarloConfig {
        n_sims: 0,
        ..Default::default()
    })
    .run(&Portfolio::default());
    assert!(matches!(
        zero_sims,
        Err(RiskError::InvalidParameter { name: "n_sims", .. })
    ));
}
