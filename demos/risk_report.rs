//! Walk-through of the risk engine on the reference book.
//!
//! Prices the bond, builds the FX and DV01 curves, runs the stress
//! catalogue and a Monte Carlo VaR. Pass a JSON configuration path as the
//! first argument to analyse a different book.

use fx_bond_risk::config::RiskConfig;
use fx_bond_risk::pricing::bond::{
    macaulay_duration, modified_duration, rate_sensitivity, DiscountedCashFlow,
};
use fx_bond_risk::scenario::engine::ScenarioEngine;
use fx_bond_risk::sensitivity::calculator::{dv01_curve, fx_sensitivity_curve};
use fx_bond_risk::simulation::fx_path::simulate_fx_path;
use fx_bond_risk::simulation::monte_carlo::MonteCarloEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RiskConfig::load(path)?,
        None => RiskConfig::default(),
    };
    let portfolio = &config.portfolio;
    let bond = &portfolio.bond;

    println!("╔══════════════════════════════════════════╗");
    println!("║  fx-bond-risk: Portfolio Risk Report     ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Step 1: Bond pricing ---
    println!("━━━ Step 1: Bond Pricing ━━━\n");

    let price = rate_sensitivity(&DiscountedCashFlow, bond, 0.01, 0.05, 50)?;
    for point in price.iter().step_by(7) {
        println!(
            "  yield {:>5.2}%  price {:>9.2}",
            point.market_rate * 100.0,
            point.price
        );
    }
    println!(
        "\nMacaulay duration:  {:.4}",
        macaulay_duration(bond, portfolio.base_yield)?
    );
    println!(
        "Modified duration:  {:.4}\n",
        modified_duration(bond, portfolio.base_yield)?
    );

    // --- Step 2: Sensitivity curves ---
    println!("━━━ Step 2: Sensitivity Curves ━━━\n");

    let fx_curve = fx_sensitivity_curve(
        portfolio.fx_position,
        &portfolio.fx_quote()?,
        &config.scenarios.fx_grid,
    )?;
    println!("FX P&L by move ({}):", portfolio.pair);
    for point in fx_curve.points().iter().step_by(5) {
        println!("  {:>+6.2}%  {:>10.2}", point.shift, point.value);
    }

    let dv01 = dv01_curve(&DiscountedCashFlow, bond, portfolio.base_yield)?;
    println!("\nDV01 by yield shift:");
    for point in dv01.points().iter().step_by(5) {
        println!("  {:>+6.0}bp  {:>8.4}", point.shift, point.value);
    }
    println!();

    // --- Step 3: Stress scenarios ---
    println!("━━━ Step 3: Stress Scenarios ━━━\n");

    let report = ScenarioEngine::new(config.scenarios.clone()).run(portfolio)?;
    println!("{}", report.sensitivities());
    println!("{}", report);

    // --- Step 4: Monte Carlo VaR ---
    println!("━━━ Step 4: Monte Carlo VaR ━━━\n");

    let (summary, pnl) = MonteCarloEngine::new(config.monte_carlo.clone()).run(portfolio)?;
    println!("{}", summary);
    println!("Best path:           {:.2}\n", pnl.max());

    // --- Step 5: FX path ---
    println!("━━━ Step 5: Simulated FX Path ━━━\n");

    let mut rng = StdRng::seed_from_u64(config.monte_carlo.seed);
    let path = simulate_fx_path(&config.fx_path, &mut rng)?;
    println!("{} over {} days", path.pair(), path.days());
    println!("  {:.5} → {:.5}", path.start_rate(), path.final_rate());
    println!(
        "  realised P&L on position: {:.2}",
        path.realised_pnl(portfolio.fx_position)?
    );
    if let Some(vol) = path.annualised_vol() {
        println!("  annualised vol: {:.2}%", vol * 100.0);
    }

    Ok(())
}
