use std::io::{self, Write};

use arborai::advisor::ChatSession;
use arborai::{AdvisorConfig, AdvisoryReport, AdvisoryService, GeminiClient, Purpose, RawInput};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = AdvisorConfig::from_env()?;

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("web") {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        arborai::web::run(config, port).await;
        return Ok(());
    }

    let raw = collect_user_input()?;

    if !raw.region.trim().is_empty() {
        println!("\nLooking up location to auto-detect pH and rainfall (this may take a few seconds)...");
    }

    let service = AdvisoryService::new(config.clone());
    let report = service.advise(&raw).await;

    for notice in &report.notices {
        println!("Note: {notice}");
    }
    print_report(&report);

    if config.has_remote_advisor() {
        chat_loop(&config, &report).await;
    }

    Ok(())
}

/// Prompt for one line of input, returning the fallback on empty input
fn prompt(label: &str, fallback: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(fallback.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn collect_user_input() -> io::Result<RawInput> {
    println!("Tree Advisor — enter the details (press Enter to skip/use defaults)\n");

    let tree = prompt("Tree name (e.g., Mango)", "Mango")?;
    let soil = prompt("Soil type (e.g., 'lal mati', 'sandy', 'loamy')", "loamy")?;
    let region = prompt(
        "Region/City (e.g., Pune, India) — used to auto-fetch pH/rainfall if possible",
        "",
    )?;
    let rainfall = prompt("Annual rainfall (mm or 'low'/'moderate'/'high')", "")?;
    let temperature = prompt("Average temperature (C) (optional)", "")?
        .parse::<f64>()
        .ok();
    let purpose = prompt("Purpose ('Personal' or 'Commercial')", "Personal")?
        .parse::<Purpose>()
        .unwrap_or_default();
    let land_size = prompt("Land size (sq meters or '2ac' for 2 acres)", "")?;

    Ok(RawInput {
        tree,
        soil,
        region,
        rainfall,
        temperature,
        purpose,
        land_size,
    })
}

fn print_report(report: &AdvisoryReport) {
    let features = &report.features;
    let rec = &report.recommendation;

    println!("\n==== Tree Advisor Result ====");
    println!("Tree: {}", features.tree);
    println!(
        "Soil (input): {} -> normalized: {}",
        features.soil_raw, features.soil
    );
    println!("Region: {}", features.region);
    println!("Estimated pH: {}", features.ph);
    println!("Estimated annual rainfall (mm): {}", features.rainfall_mm);
    println!("Average temp (C): {}", features.temperature_c);
    println!("Purpose: {}", features.purpose.as_str());
    println!("Land size (sq m): {}", features.land_size_sq_m);

    println!("\nPriority: {}", rec.priority.as_str());
    println!("Suitability: {}", rec.suitability.as_str());
    println!("Reason: {}", rec.reason);
    println!("\nRecommendations:");
    println!("{}", rec.recommendation);
    if !rec.commercial_advice.is_empty() {
        println!("\nCommercial advice:");
        println!("{}", rec.commercial_advice);
    }
    println!("=============================\n");
}

/// Sequential follow-up Q&A; ends when the user answers "no" or "exit"
async fn chat_loop(config: &AdvisorConfig, report: &AdvisoryReport) {
    let client = match GeminiClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Chat unavailable: {e}");
            return;
        }
    };

    let mut session = ChatSession::new(client, &report.features);
    println!("You can ask follow-up questions now (type 'no' to finish).");

    loop {
        let question = match prompt("Question", "no") {
            Ok(q) => q,
            Err(_) => break,
        };
        let lowered = question.to_lowercase();
        if lowered == "no" || lowered == "exit" || lowered == "quit" {
            break;
        }

        match session.ask(&question).await {
            Ok(answer) => println!("\n{answer}\n"),
            Err(e) => {
                println!("Could not get an answer right now ({e}). Try again or type 'no'.");
            }
        }
    }
}
