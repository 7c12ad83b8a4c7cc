use anyhow::Context;
use clap::Parser;
use spielerplus::utils::{logger, validation::Validate};
use spielerplus::{
    CliConfig, Endpoints, EventKey, HttpSessionClient, ParticipationStatus, ScrapeError, Scraper,
    UserParticipation,
};
use std::io::{self, Write};
use std::time::Duration;

const PASSWORD_ENV: &str = "SPIELERPLUS_PASSWORD";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }

    let endpoints = Endpoints::new(&config.base_url)?;
    let client = HttpSessionClient::new(Duration::from_secs(config.timeout_secs))?;
    let mut scraper =
        Scraper::new(client, endpoints).with_max_pagination_rounds(config.max_pagination_rounds);

    println!("============ spielerplus automation ============");
    println!("Log in first.");
    login_until_success(&mut scraper, config.email.as_deref()).await?;

    // A login can look successful yet yield a dead session; discovery is the
    // first call that notices, so retry the login from here.
    loop {
        println!("Loading all upcoming events, please wait...");
        match scraper.discover_all().await {
            Ok(()) => break,
            Err(ScrapeError::NotAuthenticated) => {
                eprintln!("You are not logged in. Please log in again.");
                login_until_success(&mut scraper, config.email.as_deref()).await?;
            }
            Err(e) => return Err(e).context("event discovery failed"),
        }
    }
    println!("Events loaded.\n");

    loop {
        print!(
            "What would you like to do?\n\
             j: Accept all events\n\
             p: Show your own responses\n\
             r: Refresh events\n\
             exit: Quit\n\
             Your choice: "
        );
        io::stdout().flush()?;
        let choice = read_line()?.to_lowercase();

        if choice.starts_with("exit") {
            println!("\nGoodbye.");
            break;
        } else if choice.starts_with('j') {
            accept_all(&mut scraper).await?;
        } else if choice.starts_with('p') {
            print_own_responses(&scraper);
        } else if choice.starts_with('r') {
            println!("Reloading events...");
            scraper
                .discover_all()
                .await
                .context("event discovery failed")?;
            println!("Events refreshed.\n");
        }
    }

    Ok(())
}

/// Prompt for credentials and retry until the server accepts them.
async fn login_until_success(
    scraper: &mut Scraper<HttpSessionClient>,
    email_flag: Option<&str>,
) -> anyhow::Result<()> {
    let mut use_presets = true;
    loop {
        let email = match email_flag.filter(|_| use_presets) {
            Some(e) => e.to_string(),
            None => prompt("Email address: ")?,
        };
        let password = match std::env::var(PASSWORD_ENV) {
            Ok(p) if use_presets && !p.is_empty() => p,
            _ => prompt("Password: ")?,
        };

        if scraper.login(email.trim(), &password).await? {
            println!("Login successful!");
            return Ok(());
        }
        println!("Login failed, try again.");
        // preset credentials were wrong; ask interactively from now on
        use_presets = false;
    }
}

async fn accept_all(scraper: &mut Scraper<HttpSessionClient>) -> anyhow::Result<()> {
    let keys: Vec<EventKey> = scraper
        .catalog()
        .ordered_by_start()
        .iter()
        .map(|e| e.key.clone())
        .collect();

    println!("\nAccepting:");
    println!("{:<20} Event", "Date");
    for key in keys {
        scraper.join(&key).await.context("join failed")?;
        if let Some(event) = scraper.catalog().get(&key) {
            println!("{:<20} {}", format_start(event.start), event.name);
        }
    }
    println!("\n");
    Ok(())
}

fn print_own_responses(scraper: &Scraper<HttpSessionClient>) {
    let Some(name) = scraper.display_name() else {
        println!("Own user is not known yet; refresh events first.\n");
        return;
    };

    println!("\nResponses:");
    println!("{:<20} {:<40} Response", "Date", "Event");
    for event in scraper.catalog().ordered_by_start() {
        let own = event.participations.iter().find(|p| p.user.name == name);
        let response = match own {
            Some(p) => describe(p),
            None => "Could not be determined".to_string(),
        };
        println!(
            "{:<20} {:<40} {}",
            format_start(event.start),
            event.name,
            response
        );
    }
    println!("\n");
}

fn describe(p: &UserParticipation) -> String {
    match p.status {
        ParticipationStatus::Unassigned => "Not yet answered".to_string(),
        ParticipationStatus::Going => format!("Accepted ({})", p.reason),
        ParticipationStatus::Unsafe => format!("Unsure ({})", p.reason),
        ParticipationStatus::Absent => format!("Declined ({})", p.reason),
        ParticipationStatus::NotNominated => "Not nominated".to_string(),
    }
}

fn format_start(start: Option<chrono::NaiveDateTime>) -> String {
    match start {
        Some(dt) => dt.format("%d-%m-%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    read_line()
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
