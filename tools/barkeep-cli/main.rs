use barkeep::prelude::*;
use clap::Parser;
use itertools::Itertools;
use std::fs;
use std::io::{self, Write};
use std::time::Duration;
use tokio::task::JoinHandle;

/// An interactive drink-mixing game over the barkeep engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an external recipe book JSON file (defaults to the house menu)
    #[arg(short, long)]
    recipes: Option<String>,

    /// Submit finished rounds to this form endpoint (reporting is off when
    /// not given)
    #[arg(long)]
    report_url: Option<String>,

    /// Place ingredients freely instead of answering the questions in order
    #[arg(short, long)]
    assembly: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let book = match &cli.recipes {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read recipe file '{}': {}", path, e))
            });
            RecipeBook::from_json(&json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to load recipe book '{}': {}", path, e))
            })
        }
        None => RecipeBook::house(),
    };
    println!("Loaded {} recipes.", book.len());

    let evaluator = Evaluator::new(book);
    let reporter = cli
        .report_url
        .as_ref()
        .map(|url| SessionReporter::new(ReportConfig::with_endpoint(url.clone())));

    // The runtime is single-threaded, so spawned report submissions only make
    // progress while this future is at an await point.
    let mut in_flight = Vec::new();
    loop {
        if let Some(handle) = run_round(&evaluator, reporter.as_ref(), cli.assembly) {
            in_flight.push(handle);
            tokio::task::yield_now().await;
        }
        let again = prompt_for_input("Make another? [y/N]", Some("n"));
        if !again.eq_ignore_ascii_case("y") {
            break;
        }
    }

    // Give pending report submissions a bounded window before the runtime
    // goes away; the game itself never waited on them.
    for handle in in_flight {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
}

/// One full round: identify, collect, serve, report. Returns the handle of
/// the spawned report submission, if one was started.
fn run_round(
    evaluator: &Evaluator,
    reporter: Option<&SessionReporter>,
    assembly: bool,
) -> Option<JoinHandle<()>> {
    let mut session = Session::new();

    loop {
        let user_id = prompt_for_input("Please enter your user number (e.g. 001)", None);
        match session.identify(&user_id) {
            Ok(()) => break,
            Err(e) => println!("{}", e),
        }
    }

    if assembly {
        collect_assembly(&mut session);
    } else {
        collect_sequential(&mut session);
    }

    println!("\nMixing your drink...");
    prompt_for_input("Press Enter to serve it to the customer", Some(""));

    let evaluation = match session.serve(evaluator) {
        Ok(evaluation) => evaluation.clone(),
        Err(e) => exit_with_error(&format!("Serving failed: {}", e)),
    };

    let satisfaction = if evaluation.outcome.stars == 0 {
        "Customer satisfaction: (furious)".to_string()
    } else {
        format!(
            "Customer satisfaction: {}",
            "*".repeat(evaluation.outcome.stars as usize)
        )
    };
    println!("\n{}", satisfaction);
    println!("You served: {}", evaluation.outcome.name);
    println!("  {}", session.selection().summary());
    println!("\"{}\"", evaluation.outcome.dialogue);

    reporter.and_then(|r| r.report(&session))
}

/// Sequential variant: one question per step, in fixed order.
fn collect_sequential(session: &mut Session) {
    while let Some(key) = session.current_key() {
        let options = key.options();
        println!("\n{}", question(key));
        for (index, option) in options.iter().enumerate() {
            println!("  {}: {}", index + 1, option);
        }
        let label = loop {
            let answer = prompt_for_input("Enter choice", Some("1"));
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => break options[n - 1],
                _ => println!(
                    "Invalid choice. Please enter a number between 1 and {}.",
                    options.len()
                ),
            }
        };
        if let Err(e) = session.choose(label) {
            exit_with_error(&format!("Choice rejected: {}", e));
        }
    }
}

/// Assembly variant: free placement with the step guard; earlier stages
/// cannot be revisited, and the glass can be poured out to start over.
fn collect_assembly(session: &mut Session) {
    println!("\nBuild the drink by placing ingredients: <key> <label>");
    println!(
        "Keys: {}",
        IngredientKey::ALL.iter().map(|k| k.as_str()).join(", ")
    );
    println!("Type 'pour' to empty the glass and start over.");

    while session.current_key().is_some() {
        let line = prompt_for_input("Place", None);
        if line.eq_ignore_ascii_case("pour") {
            if session.pour_out().is_ok() {
                println!("The glass is empty again.");
            }
            continue;
        }
        let Some((key_name, label)) = line.split_once(' ') else {
            println!("Expected '<key> <label>', e.g. 'base rum-family'.");
            continue;
        };
        let Some(key) = IngredientKey::parse(key_name.trim()) else {
            println!("Unknown key '{}'.", key_name.trim());
            continue;
        };
        match session.place(key, label.trim()) {
            Ok(()) => println!("Added {} to the glass.", label.trim()),
            // Transient warning, no state change
            Err(e) => println!("Warning: {}", e),
        }
    }
}

fn question(key: IngredientKey) -> &'static str {
    match key {
        IngredientKey::Base => "You look over the shelf. Which base spirit goes in?",
        IngredientKey::Acidity => "Should the drink be tart?",
        IngredientKey::Carbonation => "Should the drink have some fizz?",
        IngredientKey::Flavor => "Any special flavor to add?",
        IngredientKey::Garnish => "A garnish on top?",
        IngredientKey::Ice => "How should the ice be handled?",
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default
        .filter(|d| !d.is_empty())
        .map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    let _ = io::stdout().flush();

    if io::stdin().read_line(&mut line).is_err() {
        exit_with_error("Failed to read input");
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
