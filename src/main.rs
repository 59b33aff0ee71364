//! fx-bond-risk CLI
//!
//! Run sensitivity, scenario and Monte Carlo VaR analysis from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full report on the reference book
//! fx-bond-risk report
//!
//! # Scenario table for a custom book, as JSON
//! fx-bond-risk scenarios --config book.json --format json
//!
//! # VaR with more paths and a different seed
//! fx-bond-risk var --sims 100000 --seed 7
//!
//! # Simulate a daily FX path
//! fx-bond-risk fx-path --days 250
//! ```

use fx_bond_risk::config::RiskConfig;
use fx_bond_risk::core::error::RiskError;
use fx_bond_risk::pricing::bond::{macaulay_duration, modified_duration, DiscountedCashFlow};
use fx_bond_risk::scenario::engine::ScenarioEngine;
use fx_bond_risk::sensitivity::calculator::portfolio_sensitivities;
use fx_bond_risk::simulation::fx_path::simulate_fx_path;
use fx_bond_risk::simulation::monte_carlo::MonteCarloEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fx-bond-risk — FX delta, DV01, stress scenarios and Monte Carlo VaR

USAGE:
    fx-bond-risk <COMMAND> [OPTIONS]

COMMANDS:
    report      Sensitivities, duration, scenarios and VaR
    scenarios   Apply the stress scenario catalogue
    var         Monte Carlo Value-at-Risk
    fx-path     Simulate a daily FX rate path
    help        Show this message

OPTIONS:
    --config <FILE>     JSON configuration (defaults to the reference book)
    --format <FORMAT>   Output format: text (default) or json
    --sims <N>          Override the number of Monte Carlo paths
    --seed <N>          Override the random seed
    --confidence <C>    Override the VaR confidence level
    --days <N>          Override the FX path length

EXAMPLES:
    fx-bond-risk report
    fx-bond-risk scenarios --config book.json --format json
    fx-bond-risk var --sims 100000 --confidence 0.99
    fx-bond-risk fx-path --days 250 --seed 3"#
    );
}

#[derive(Debug)]
struct Options {
    config: RiskConfig,
    json: bool,
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("{} requires a number", flag);
            process::exit(1);
        })
}

fn parse_options(args: &[String]) -> Options {
    let mut config_path = None;
    let mut format = "text".to_string();
    let mut sims: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut days: Option<usize> = None;
    let mut confidence: Option<f64> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--sims" => {
                i += 1;
                sims = Some(parse_number(args, i, "--sims"));
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_number(args, i, "--seed"));
            }
            "--days" => {
                i += 1;
                days = Some(parse_number(args, i, "--days"));
            }
            "--confidence" => {
                i += 1;
                confidence = Some(parse_number(args, i, "--confidence"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => RiskConfig::load(&path).unwrap_or_else(|e| fail(&e)),
        None => RiskConfig::default(),
    };
    if let Some(n) = sims {
        config.monte_carlo.n_sims = n;
    }
    if let Some(s) = seed {
        config.monte_carlo.seed = s;
    }
    if let Some(d) = days {
        config.fx_path.days = d;
    }
    if let Some(c) = confidence {
        config.monte_carlo.confidence = c;
    }
    if let Err(e) = config.validate() {
        fail(&e);
    }

    Options {
        config,
        json: format == "json",
    }
}

fn fail(err: &RiskError) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&RiskError::Config(e)),
    }
}

fn cmd_scenarios(opts: &Options) {
    let report = ScenarioEngine::new(opts.config.scenarios.clone())
        .run(&opts.config.portfolio)
        .unwrap_or_else(|e| fail(&e));
    if opts.json {
        print_json(&report);
    } else {
        println!("{}", report.sensitivities());
        println!("{}", report);
        if let Some(worst) = report.worst() {
            println!("Worst scenario: {} ({})", worst.name, worst.total_pnl);
        }
    }
}

fn cmd_var(opts: &Options) {
    let (summary, _) = MonteCarloEngine::new(opts.config.monte_carlo.clone())
        .run(&opts.config.portfolio)
        .unwrap_or_else(|e| fail(&e));
    if opts.json {
        print_json(&summary);
    } else {
        println!("{}", summary);
    }
}

#[derive(Serialize)]
struct FxPathOutput {
    pair: String,
    start_rate: f64,
    final_rate: f64,
    realised_pnl: f64,
    estimated_daily_vol: Option<f64>,
    annualised_vol: Option<f64>,
    rates: Vec<f64>,
}

fn cmd_fx_path(opts: &Options) {
    let config = &opts.config;
    let mut rng = StdRng::seed_from_u64(config.monte_carlo.seed);
    let path = simulate_fx_path(&config.fx_path, &mut rng).unwrap_or_else(|e| fail(&e));
    let realised = path
        .realised_pnl(config.portfolio.fx_position)
        .unwrap_or_else(|e| fail(&e));

    if opts.json {
        print_json(&FxPathOutput {
            pair: path.pair().to_string(),
            start_rate: path.start_rate(),
            final_rate: path.final_rate(),
            realised_pnl: realised,
            estimated_daily_vol: path.estimated_daily_vol(),
            annualised_vol: path.annualised_vol(),
            rates: path.rates().collect(),
        });
    } else {
        println!("=== Simulated {} Path ({} days) ===", path.pair(), path.days());
        println!("Start rate:          {:.5}", path.start_rate());
        println!("Final rate:          {:.5}", path.final_rate());
        println!("Realised P&L:        {:.2}", realised);
        if let Some(vol) = path.estimated_daily_vol() {
            println!("Daily vol (sample):  {:.4}%", vol * 100.0);
        }
        if let Some(vol) = path.annualised_vol() {
            println!("Annualised vol:      {:.2}%", vol * 100.0);
        }
    }
}

fn cmd_report(opts: &Options) {
    let config = &opts.config;
    let portfolio = &config.portfolio;
    let bond = &portfolio.bond;

    if opts.json {
        #[derive(Serialize)]
        struct ReportOutput<'a> {
            fx_delta: f64,
            bond_dv01: f64,
            macaulay_duration: f64,
            modified_duration: f64,
            scenarios: &'a fx_bond_risk::scenario::engine::ScenarioReport,
            var: fx_bond_risk::simulation::monte_carlo::RiskSummary,
        }
        let sens = portfolio_sensitivities(&DiscountedCashFlow, portfolio, &config.scenarios.fx_grid)
            .unwrap_or_else(|e| fail(&e));
        let scenarios = ScenarioEngine::new(config.scenarios.clone())
            .run(portfolio)
            .unwrap_or_else(|e| fail(&e));
        let (var, _) = MonteCarloEngine::new(config.monte_carlo.clone())
            .run(portfolio)
            .unwrap_or_else(|e| fail(&e));
        print_json(&ReportOutput {
            fx_delta: sens.fx_delta,
            bond_dv01: sens.bond_dv01,
            macaulay_duration: macaulay_duration(bond, portfolio.base_yield)
                .unwrap_or_else(|e| fail(&e)),
            modified_duration: modified_duration(bond, portfolio.base_yield)
                .unwrap_or_else(|e| fail(&e)),
            scenarios: &scenarios,
            var,
        });
        return;
    }

    println!("=== Portfolio ===");
    println!(
        "FX position:         {:.2} {} at {}",
        portfolio.fx_position,
        portfolio.pair.base,
        portfolio.fx_quote().unwrap_or_else(|e| fail(&e))
    );
    println!(
        "Bond:                {:.2} face, {:.2}% coupon, {}y, yield {:.2}%",
        bond.face_value,
        bond.coupon_rate * 100.0,
        bond.maturity_years,
        portfolio.base_yield * 100.0
    );
    println!(
        "Macaulay duration:   {:.4}",
        macaulay_duration(bond, portfolio.base_yield).unwrap_or_else(|e| fail(&e))
    );
    println!(
        "Modified duration:   {:.4}",
        modified_duration(bond, portfolio.base_yield).unwrap_or_else(|e| fail(&e))
    );
    println!();
    cmd_scenarios(opts);
    println!();
    cmd_var(opts);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(&parse_options(rest)),
        "scenarios" => cmd_scenarios(&parse_options(rest)),
        "var" => cmd_var(&parse_options(rest)),
        "fx-path" => cmd_fx_path(&parse_options(rest)),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
