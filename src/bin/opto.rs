//! Interactive portfolio optimization CLI.
//!
//! A REPL for editing assets, sampling portfolios, and applying the
//! utility-maximizing allocation.
//!
//! Usage:
//!   cargo run --bin opto
//!   opto [seed]  (if installed via cargo install)

use opto::{AssetField, AssetRegistry, ParsePolicy, PortfolioCandidate, Session, SessionConfig};
use std::io::{self, BufRead, Write};

fn main() {
    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok());
    let config = SessionConfig {
        seed,
        ..Default::default()
    };
    let mut session = match Session::new(AssetRegistry::with_defaults(), config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Opto portfolio optimizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("opto> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|s| s.to_lowercase());

        match cmd.as_deref() {
            Some("help" | "h" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some("assets" | "a") => print_assets(session.registry()),
            Some("set") => handle_set(&mut session, &parts[1..]),
            Some("aversion" | "ra") => handle_aversion(&mut session, &parts[1..]),
            Some("optimize" | "o") => handle_optimize(&mut session),
            Some("current" | "c") => print_current(&session),
            Some("population" | "p") => handle_population(&mut session, &parts[1..]),
            Some("frontier" | "f") => handle_frontier(&mut session),
            Some("resample") => match session.resample() {
                Ok(pop) => println!("Drew {} new portfolios.", pop.len()),
                Err(e) => println!("Error: {e}"),
            },
            Some("strict") => {
                session.set_parse_policy(ParsePolicy::Strict);
                println!("Invalid numbers are now rejected.");
            }
            Some("lenient") => {
                session.set_parse_policy(ParsePolicy::Lenient);
                println!("Invalid numbers are now read as 0.");
            }
            Some("reset") => {
                session.reset();
                println!("Assets reset to defaults.");
            }
            Some(cmd) => println!("Unknown command: '{}'. Type 'help' for commands.", cmd),
            None => {}
        }
    }

    println!("Goodbye!");
}

fn print_help() {
    println!(
        r#"
Commands:
  assets                        Show assets and current weights
  set <index> <field> <value>   Edit an asset (field: name, return, risk)
  aversion [value]              Show or set risk aversion (1-10)
  optimize                      Apply the best sampled allocation
  current                       Show metrics of the current weights
  population [n]                Summarize the sample, list top n by utility
  frontier                      Show the sampled efficient frontier
  resample                      Draw a fresh population
  strict | lenient              Reject invalid numbers / read them as 0
  reset                         Restore the default assets
  help                          Show this help
  quit                          Exit

Examples:
  set 0 risk 0.22               Stock A risk = 22%
  set 2 name Treasuries         Rename asset 2
  aversion 6.5                  Penalize risk more heavily
  population 5                  Five best candidates at current aversion

Returns and risks are fractions (0.10 = 10%)
"#
    );
}

fn print_assets(registry: &AssetRegistry) {
    println!();
    println!(
        "  {:>3}  {:<20} {:>8} {:>8} {:>8}",
        "#", "Asset", "Return", "Risk", "Weight"
    );
    println!("  ─────────────────────────────────────────────────────");
    for (i, asset) in registry.assets().iter().enumerate() {
        let bar = "█".repeat((asset.weight.clamp(0.0, 1.0) * 20.0).round() as usize);
        println!(
            "  {:>3}  {:<20} {:>7.2}% {:>7.2}% {:>8.4}  {}",
            i,
            asset.name,
            asset.expected_return * 100.0,
            asset.risk * 100.0,
            asset.weight,
            bar
        );
    }
    println!();
}

fn handle_set(session: &mut Session, args: &[&str]) {
    if args.len() < 3 {
        println!("Usage: set <index> <name|return|risk> <value>");
        return;
    }

    let index: usize = match args[0].parse() {
        Ok(i) => i,
        Err(_) => {
            println!("Invalid index: '{}'", args[0]);
            return;
        }
    };

    let field: AssetField = match args[1].parse() {
        Ok(f) => f,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let value = args[2..].join(" ");
    match session.update_field(index, field, &value) {
        Ok(()) => {
            if let Some(asset) = session.registry().get(index) {
                println!(
                    "{}: return {:.2}%, risk {:.2}%",
                    asset.name,
                    asset.expected_return * 100.0,
                    asset.risk * 100.0
                );
            }
        }
        Err(e) => println!("Error: {e}"),
    }
}

fn handle_aversion(session: &mut Session, args: &[&str]) {
    let Some(raw) = args.first() else {
        println!("Risk aversion: {:.1}", session.risk_aversion());
        return;
    };

    match raw.parse::<f64>() {
        Ok(a) if a.is_finite() => {
            session.set_risk_aversion(a);
            println!("Risk aversion: {a:.1}");
        }
        _ => println!("Invalid risk aversion: '{raw}'"),
    }
}

fn handle_optimize(session: &mut Session) {
    match session.optimize() {
        Ok(result) => {
            println!();
            print!("{result}");
            print_assets(session.registry());
        }
        Err(e) => println!("Error: {e}"),
    }
}

fn print_current(session: &Session) {
    let point = session.current_point();
    let total: f64 = session.registry().weights().iter().sum();
    println!("Current portfolio: {point}");
    if (total - 1.0).abs() > 1e-9 {
        println!("  (weights sum to {total:.4})");
    }
}

fn handle_population(session: &mut Session, args: &[&str]) {
    let top: usize = match args.first().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            println!("Invalid count: '{}'", args[0]);
            return;
        }
        None => 0,
    };

    let aversion = session.risk_aversion();
    let pop = match session.population() {
        Ok(p) => p,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    let (mut min_risk, mut max_risk) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_ret, mut max_ret) = (f64::INFINITY, f64::NEG_INFINITY);
    for c in pop {
        min_risk = min_risk.min(c.risk);
        max_risk = max_risk.max(c.risk);
        min_ret = min_ret.min(c.expected_return);
        max_ret = max_ret.max(c.expected_return);
    }

    println!();
    println!("  POPULATION ({} portfolios)", pop.len());
    println!("  ──────────────────────────────────────────");
    println!(
        "  Risk:    {:>6.2}% .. {:>6.2}%",
        min_risk * 100.0,
        max_risk * 100.0
    );
    println!(
        "  Return:  {:>6.2}% .. {:>6.2}%",
        min_ret * 100.0,
        max_ret * 100.0
    );

    if top > 0 {
        let mut ranked: Vec<&PortfolioCandidate> = pop.iter().collect();
        ranked.sort_by(|a, b| {
            b.utility(aversion)
                .partial_cmp(&a.utility(aversion))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        println!();
        let shown = top.min(ranked.len());
        println!("  Top {shown} at risk aversion {aversion:.1}:");
        for c in ranked.into_iter().take(top) {
            println!("    {}  utility {:.4}", c.point(), c.utility(aversion));
        }
    }
    println!();
}

fn handle_frontier(session: &mut Session) {
    let frontier = match session.frontier() {
        Ok(f) => f,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    println!();
    println!("  EFFICIENT FRONTIER ({} portfolios)", frontier.len());
    println!("  ──────────────────────────────────────────");
    for c in frontier.iter().take(25) {
        println!("    {}", c.point());
    }
    if frontier.len() > 25 {
        println!("  ... and {} more", frontier.len() - 25);
    }
    println!();
}
