use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use broker_risk_desk::analytics::{self, analyze_roi, churn_sensitivity, BrokerProfile};
use broker_risk_desk::booking::{
    self, summarize, BatchSummary, BookingClassifier, BrokerPolicy, ClientDecision, RiskTolerance,
};
use broker_risk_desk::calculators::exposure::{portfolio_exposure, Holding};
use broker_risk_desk::calculators::lots::{LotType, PositionSide};
use broker_risk_desk::calculators::margin::{analyze_margin, MarginInput};
use broker_risk_desk::calculators::pip::{analyze_pip, PipInput};
use broker_risk_desk::calculators::position_sizing::{calculate_position_size, PositionSizeInput};
use broker_risk_desk::calculators::risk_reward::{analyze_trade, TradePlan};
use broker_risk_desk::calculators::swap::{analyze_swap, SwapInput};
use broker_risk_desk::calculators::var::{monte_carlo_var, VarInput};
use broker_risk_desk::config::Config;

#[derive(Parser)]
#[command(name = "broker-risk-desk", about = "Risk calculators and A/B-Book routing for FX brokers")]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Route clients from a JSON file of activity records to A-Book / B-Book / Hybrid
    Classify {
        #[arg(long)]
        input: PathBuf,
        /// Overrides RISK_TOLERANCE
        #[arg(long)]
        risk: Option<RiskTolerance>,
        /// Overrides LP_COMMISSION_COST_PER_LOT
        #[arg(long)]
        lp_cost: Option<f64>,
    },
    /// Size a position from account risk and stop distance
    PositionSize {
        #[arg(long)]
        balance: f64,
        #[arg(long, default_value = "2.0")]
        risk_pct: f64,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        target: f64,
    },
    /// Risk/reward and expected value for a trade with two targets
    RiskReward {
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        target1: f64,
        #[arg(long)]
        target2: f64,
        #[arg(long, default_value = "60")]
        win_rate: f64,
        #[arg(long, default_value = "100")]
        shares: f64,
        #[arg(long, default_value = "5.0")]
        commission: f64,
    },
    /// Portfolio weights from a JSON file of {symbol, shares, price} records
    Exposure {
        #[arg(long)]
        input: PathBuf,
    },
    /// Monte Carlo Value at Risk
    Var {
        #[arg(long)]
        portfolio_value: f64,
        #[arg(long, default_value = "2.0")]
        volatility_pct: f64,
        #[arg(long, default_value = "95")]
        confidence: f64,
        #[arg(long, default_value = "1")]
        horizon_days: u32,
    },
    /// Margin requirements and margin-call thresholds
    Margin {
        #[arg(long)]
        equity: f64,
        #[arg(long, default_value = "100")]
        leverage: f64,
        #[arg(long, default_value = "1.0")]
        lots: f64,
        #[arg(long, default_value = "standard")]
        lot_type: LotType,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "100")]
        margin_call_level: f64,
        #[arg(long, default_value = "50")]
        stop_out_level: f64,
    },
    /// Swap / rollover charges including triple-swap Wednesdays
    Swap {
        #[arg(long, default_value = "1.0")]
        lots: f64,
        #[arg(long, default_value = "standard")]
        lot_type: LotType,
        #[arg(long, default_value = "long")]
        side: PositionSide,
        #[arg(long, default_value = "-2.5", allow_hyphen_values = true)]
        long_rate: f64,
        #[arg(long, default_value = "0.8", allow_hyphen_values = true)]
        short_rate: f64,
        #[arg(long, default_value = "10")]
        markup_pct: f64,
        #[arg(long, default_value = "30")]
        days: u32,
    },
    /// Pip value, trading costs and broker revenue projection
    Pip {
        #[arg(long, default_value = "EUR/USD")]
        pair: String,
        #[arg(long, default_value = "USD")]
        account_currency: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "1.0")]
        lots: f64,
        #[arg(long, default_value = "standard")]
        lot_type: LotType,
        #[arg(long, default_value = "1.5")]
        spread: f64,
        #[arg(long, default_value = "7.0")]
        commission: f64,
        #[arg(long, default_value = "100")]
        monthly_volume: f64,
        #[arg(long, default_value = "50", allow_hyphen_values = true)]
        pips: f64,
    },
    /// Broker ROI from reduced churn and support load
    Roi {
        #[arg(long, default_value = "2000")]
        clients: f64,
        #[arg(long, default_value = "65")]
        churn_pct: f64,
        #[arg(long, default_value = "600")]
        cac: f64,
        #[arg(long, default_value = "240")]
        tickets: f64,
        #[arg(long, default_value = "15")]
        ticket_cost: f64,
    },
    /// Serve the calculators as a JSON API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "broker_risk_desk=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Classify {
            input,
            risk,
            lp_cost,
        } => {
            let mut policy = config.booking.default_policy;
            if let Some(risk) = risk {
                policy.risk_tolerance = risk;
            }
            if let Some(lp_cost) = lp_cost {
                policy.lp_commission_cost_per_lot = lp_cost;
            }

            let clients = booking::load_clients(&input)?;
            info!("📂 Loaded {} clients from {}", clients.len(), input.display());

            let classifier = BookingClassifier::new(config.booking.thresholds);
            let decisions = classifier.classify_batch(&clients, &policy);
            let summary = summarize(&decisions);

            if cli.json {
                print_json(&serde_json::json!({
                    "policy": policy,
                    "decisions": decisions,
                    "summary": summary,
                }))?;
            } else {
                print_booking_report(&policy, &decisions, &summary);
            }
        }
        Command::PositionSize {
            balance,
            risk_pct,
            entry,
            stop,
            target,
        } => {
            let result = calculate_position_size(&PositionSizeInput {
                account_balance: balance,
                risk_percentage: risk_pct,
                entry_price: entry,
                stop_loss: stop,
                target_price: target,
            });
            if cli.json {
                print_json(&result)?;
            } else {
                println!("📐 Position Size:   {:.2} units", result.position_size);
                println!("   Position Value:  ${:.2}", result.position_value);
                println!("   Risk Amount:     ${:.2}", result.risk_amount);
                println!("   R/R Ratio:       1:{:.2}", result.risk_reward_ratio);
            }
        }
        Command::RiskReward {
            entry,
            stop,
            target1,
            target2,
            win_rate,
            shares,
            commission,
        } => {
            let result = analyze_trade(&TradePlan {
                entry,
                stop,
                target_1: target1,
                target_2: target2,
                win_rate,
                shares,
                commission_per_trade: commission,
            });
            if cli.json {
                print_json(&result)?;
            } else {
                println!("⚖️  R/R (Target 1): 1:{:.2}", result.rr_ratio_1);
                println!("   R/R (Target 2): 1:{:.2}", result.rr_ratio_2);
                println!("   Max Loss:       ${:.2}", result.max_loss);
                println!("   Max Gain (T1):  ${:.2}", result.max_gain_1);
                println!("   Max Gain (T2):  ${:.2}", result.max_gain_2);
                println!("   Expected Value: ${:.2}", result.expected_value);
            }
        }
        Command::Exposure { input } => {
            let raw = std::fs::read_to_string(&input)?;
            let holdings: Vec<Holding> = serde_json::from_str(&raw)?;
            let result = portfolio_exposure(&holdings);
            if cli.json {
                print_json(&result)?;
            } else {
                println!("💼 Total Value: ${:.2} across {} positions", result.total_value, result.position_count);
                for h in &result.holdings {
                    println!("   {:<10} ${:>14.2} {:>6.2}%", h.symbol, h.value, h.weight_pct);
                }
                println!("   Largest Position: {:.1}%", result.largest_weight_pct);
            }
        }
        Command::Var {
            portfolio_value,
            volatility_pct,
            confidence,
            horizon_days,
        } => {
            let result = monte_carlo_var(
                &VarInput {
                    portfolio_value,
                    daily_volatility_pct: volatility_pct,
                    confidence_level: confidence,
                    time_horizon_days: horizon_days,
                },
                &config.simulation,
            )?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("📉 Value at Risk: ${:.2} ({:.2}% of portfolio)", result.var_amount, result.var_pct_of_portfolio);
                println!(
                    "   With {}% confidence, the portfolio will not lose more than ${:.2} over {} day(s)",
                    result.confidence_level, result.var_amount, result.time_horizon_days
                );
            }
        }
        Command::Margin {
            equity,
            leverage,
            lots,
            lot_type,
            price,
            margin_call_level,
            stop_out_level,
        } => {
            let result = analyze_margin(&MarginInput {
                account_equity: equity,
                leverage,
                margin_call_level,
                stop_out_level,
                position_lots: lots,
                lot_type,
                current_price: price,
            })?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("🏦 Required Margin: ${:.2}", result.required_margin);
                println!("   Free Margin:     ${:.2}", result.free_margin);
                println!("   Margin Level:    {:.1}%", result.margin_level);
                println!("   Max Lots:        {:.2}", result.max_lots);
                println!("   Margin Call At:  ${:.2}", result.margin_call_equity);
                println!("   Stop Out At:     ${:.2}", result.stop_out_equity);
                println!("   Status:          {:?}", result.status);
            }
        }
        Command::Swap {
            lots,
            lot_type,
            side,
            long_rate,
            short_rate,
            markup_pct,
            days,
        } => {
            let result = analyze_swap(&SwapInput {
                position_lots: lots,
                lot_type,
                side,
                long_swap_rate: long_rate,
                short_swap_rate: short_rate,
                broker_markup_pct: markup_pct,
                days_held: days,
            });
            if cli.json {
                print_json(&result)?;
            } else {
                println!("🔁 Daily Swap:        ${:.2}", result.daily_swap);
                println!("   Total ({} days):   ${:.2}", days, result.total_swap);
                println!("   Annual Projection: ${:.2}", result.annual_swap);
                println!("   Broker Revenue:    ${:.2}", result.broker_revenue_total);
                println!("   Includes {} triple-swap Wednesdays", result.wednesdays);
            }
        }
        Command::Pip {
            pair,
            account_currency,
            price,
            lots,
            lot_type,
            spread,
            commission,
            monthly_volume,
            pips,
        } => {
            let result = analyze_pip(&PipInput {
                currency_pair: pair,
                account_currency,
                current_price: price,
                position_lots: lots,
                lot_type,
                spread_pips: spread,
                commission_per_lot: commission,
                monthly_volume_lots: monthly_volume,
                pip_movement: pips,
            });
            if cli.json {
                print_json(&result)?;
            } else {
                println!("💱 Pip Value:        ${:.2}", result.pip_value);
                println!("   Total Trade Cost: ${:.2}", result.total_cost);
                println!("   Net P&L ({:+} pips): ${:.2}", pips, result.net_pnl);
                println!("   Break-even:       {:.1} pips", result.breakeven_pips);
                println!("   Monthly Revenue:  ${:.2}", result.monthly_total_revenue);
                println!("   Annual Revenue:   ${:.2}", result.annual_revenue);
            }
        }
        Command::Roi {
            clients,
            churn_pct,
            cac,
            tickets,
            ticket_cost,
        } => {
            let profile = BrokerProfile {
                active_clients: clients,
                baseline_churn_pct: churn_pct,
                client_acquisition_cost: cac,
                support_tickets_per_month: tickets,
                cost_per_ticket: ticket_cost,
            };
            let result = analyze_roi(&profile, &config.roi);
            if cli.json {
                print_json(&serde_json::json!({
                    "analysis": result,
                    "churn_sensitivity": churn_sensitivity(&profile, &config.roi),
                }))?;
            } else {
                println!("📈 Annual Value Delivered: ${:.0}", result.total_annual_value);
                println!("   Annual Platform Cost:   ${:.0}", result.platform_cost_annual);
                println!("   Net Benefit:            ${:.0}", result.net_benefit);
                println!("   ROI:                    {:.1}%", result.roi_pct);
            }
        }
        Command::Serve => {
            print_banner(&config);
            analytics::run_server(Arc::new(config)).await?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_booking_report(policy: &BrokerPolicy, decisions: &[ClientDecision], summary: &BatchSummary) {
    println!(
        "\n📋 Booking decisions ({} policy, LP cost ${:.2}/lot)",
        policy.risk_tolerance, policy.lp_commission_cost_per_lot
    );
    println!(
        "{:<12} {:>8} {:>6} {:<8} {:>12} {:>12}  Reason",
        "Client", "Win %", "Toxic", "Book", "A-Book $", "B-Book $"
    );
    for d in decisions {
        println!(
            "{:<12} {:>8.1} {:>6} {:<8} {:>12.2} {:>12.2}  {}",
            d.client_id,
            d.win_rate,
            if d.is_toxic { "⚠️" } else { "" },
            d.recommendation.to_string(),
            d.a_book_revenue,
            d.b_book_revenue,
            d.reason
        );
    }
    println!();
    println!("   A-Book: {:>4} clients  ${:.2}", summary.a_book_count, summary.a_book_total_revenue);
    println!("   B-Book: {:>4} clients  ${:.2}", summary.b_book_count, summary.b_book_total_revenue);
    println!("   Hybrid: {:>4} clients  (not included in revenue)", summary.hybrid_count);
    println!("   Projected Revenue: ${:.2}", summary.projected_total_revenue);
}

fn print_banner(config: &Config) {
    println!("\n╔═══════════════════════════════════════════════════════════╗");
    println!("║                  Broker Risk Desk API                     ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    let t = &config.booking.thresholds;
    println!("📊 Booking Thresholds:");
    println!("   • Toxic Win Rate: > {:.1}%", t.toxic_win_rate);
    println!("   • Toxic Trade Size: > {:.2} lots", t.toxic_trade_size);
    println!("   • Min Hold Time: {:.1} hours", t.min_hold_time_hours);
    println!("   • B-Book Win Rate: < {:.1}%", t.b_book_max_win_rate);
    println!("   • Max Trade Size: {:.2} lots", t.max_trade_size);
    println!(
        "🏦 Default Policy: {} (LP cost ${:.2}/lot)",
        config.booking.default_policy.risk_tolerance,
        config.booking.default_policy.lp_commission_cost_per_lot
    );
    println!(
        "🎲 VaR Simulations: {} (seed {})",
        config.simulation.num_simulations, config.simulation.seed
    );
    println!();
    println!("Press Ctrl+C to stop");
    println!("═══════════════════════════════════════════════════════════");
    println!();
}
