//! Wildfire Dilemmas
//!
//! Interactive console over the scenario catalog and the tutorial gate,
//! plus a read-only HTTP server for rendering views.

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wildfire_dilemmas::config::AppConfig;
use wildfire_dilemmas::gate::{GateTransition, MediaRequest, NavigationRequest, PlaybackStatus, TutorialGate};
use wildfire_dilemmas::scenario::{DecisionOption, Recommendation, ScenarioCatalog};
use wildfire_dilemmas::server::{run_server, AppState};

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wildfire_dilemmas=info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    let config = AppConfig::from_env();
    let catalog = match &config.data_path {
        Some(path) => ScenarioCatalog::from_path(path)
            .with_context(|| format!("Failed to load dataset '{}'", path.display()))?,
        None => ScenarioCatalog::builtin().context("Bundled dataset failed validation")?,
    };
    info!(scenarios = catalog.len(), "Catalog ready");

    println!("\n{}", "═".repeat(60));
    println!("🔥 Wildfire Dilemmas v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "═".repeat(60));
    println!(
        "📚 {} scenarios | {} options | {} authoring warnings",
        catalog.len(),
        catalog.report().options,
        catalog.report().warnings.len()
    );
    println!("{}\n", "═".repeat(60));
    print_help();

    loop {
        let Some(line) = prompt("🧭 > ")? else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else { continue };

        match (command.to_lowercase().as_str(), &parts[1..]) {
            ("quit" | "exit" | "q", _) => {
                println!("\n👋 Goodbye!\n");
                break;
            }
            ("help", _) => print_help(),
            ("list", _) => {
                for scenario in catalog.scenarios() {
                    println!("  [{}] {} ({} options)", scenario.id, scenario.title, scenario.options.len());
                }
            }
            ("show", [id]) => match parse_id(id).and_then(|id| Ok(catalog.get_scenario(id)?)) {
                Ok(scenario) => {
                    println!("\n{}\n{}\n", scenario.title, scenario.description);
                    for option in &scenario.options {
                        println!("  • {} [{}] {}", option.id, option.label, option.title);
                    }
                    println!();
                }
                Err(e) => println!("❌ {}", e),
            },
            ("option", [id, option_id]) => match parse_id(id).and_then(|id| Ok(catalog.get_option(id, option_id)?)) {
                Ok(option) => print_option(option),
                Err(e) => println!("❌ {}", e),
            },
            ("compare", [id, option_id]) => match parse_id(id).and_then(|id| Ok(catalog.get_option(id, option_id)?)) {
                Ok(option) => print_comparison(option),
                Err(e) => println!("❌ {}", e),
            },
            ("select", [id, option_id]) => match parse_id(id).and_then(|id| Ok(catalog.select(id, option_id)?)) {
                Ok(selection) => println!("✅ {}", serde_json::to_string(&selection)?),
                Err(e) => println!("❌ {}", e),
            },
            ("validate", [path]) => match ScenarioCatalog::from_path(path) {
                Ok(loaded) => {
                    let report = loaded.report();
                    println!("✅ {} scenarios, {} options", report.scenarios, report.options);
                    for w in &report.warnings {
                        println!("   ⚠️  scenario {} / {}: {}", w.scenario_id, w.option_id, w.message);
                    }
                }
                Err(e) => println!("❌ {}", e),
            },
            ("tutorial", _) => run_tutorial(TutorialGate::new(config.tutorial.clone()))?,
            ("serve", _) => {
                let state = AppState {
                    catalog: catalog.clone(),
                    tutorial: config.tutorial.clone(),
                };
                run_server(state, &config.bind_addr).await?;
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }

    Ok(())
}

fn print_help() {
    println!("💡 Commands:");
    println!("   list | show <id> | option <id> <option> | compare <id> <option>");
    println!("   select <id> <option> | validate <path> | tutorial | serve | quit\n");
}

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse().with_context(|| format!("'{}' is not a scenario id", raw))
}

fn print_option(option: &DecisionOption) {
    let impact = &option.impact;
    println!("\n{} [{}]", option.title, option.label);
    println!("{}\n", option.description);
    println!("  Lives saved: {} | Casualties: {}", impact.lives_saved, impact.human_casualties);
    for (name, delta) in impact.deltas() {
        println!("  {:<24} {:+}%", name, delta);
    }
    println!("\n  Risks:");
    for risk in &option.risk_info {
        println!("   • {}", risk);
    }
    println!("\n  Expert panel ({}/5 accept):", option.expert_opinions.accept_count());
    for (label, opinion) in option.expert_opinions.iter() {
        let mark = match opinion.recommendation {
            Recommendation::Accept => "✓",
            Recommendation::Reject => "✗",
        };
        println!("   {} {:<15} {}", mark, label, opinion.summary);
    }
    println!("\n  Radar:");
    for (axis, score) in option.radar_data.axes() {
        println!("   {:<22} {:>5.1}", axis, score);
    }
    println!();
}

fn print_comparison(option: &DecisionOption) {
    let cvr = &option.cvr_question;
    println!("\n{}\n{}\n❓ {}\n", cvr.description_tile, cvr.description, cvr.question);
    println!("{}", "─".repeat(60));
    for row in option.comparison_table_column_content.rows() {
        println!("{:<20} | {} || {}", row.label, row.first, row.second);
    }
    println!("{}\n", "─".repeat(60));
}

fn run_tutorial(mut gate: TutorialGate) -> Result<()> {
    let page = gate.page();
    println!("\n🎬 {}\n{}\n▶️  {}\n", page.heading, page.intro, page.embed_url);
    for point in page.learning_points {
        println!("   • {}", point);
    }
    println!("\n   ended | started | paused | msg <origin> <json> | replay | proceed | back\n");

    loop {
        println!("ℹ️  {}", gate.notice());
        let Some(line) = prompt("🎞️  > ")? else { return Ok(()) };
        let transition = match line.split_once(' ').unwrap_or((line.as_str(), "")) {
            ("back", _) => return Ok(()),
            ("ended", _) => gate.apply(PlaybackStatus::Ended),
            ("started", _) => gate.apply(PlaybackStatus::Started),
            ("paused", _) => gate.apply(PlaybackStatus::Paused),
            ("msg", rest) => {
                let (origin, raw) = rest.split_once(' ').unwrap_or((rest, ""));
                gate.handle_message(origin, raw)
            }
            ("replay", _) => {
                let MediaRequest::Reload { src } = gate.replay();
                println!("🔁 Reloading {}", src);
                GateTransition::Unchanged
            }
            ("proceed", _) => match gate.proceed() {
                Some(NavigationRequest::Proceed { target }) => {
                    println!("➡️  Navigating to {}\n", target);
                    return Ok(());
                }
                None => {
                    println!("🔒 Proceed is disabled until the video has been watched.");
                    GateTransition::Unchanged
                }
            },
            _ => {
                println!("Unknown tutorial command.");
                GateTransition::Unchanged
            }
        };

        if transition == GateTransition::Unlocked {
            println!("✅ Tutorial complete.");
        }
        println!("   state: {:?} | playing: {}", gate.state(), gate.is_playing());
    }
}
