use clap::Parser;
use flight_finder::config::cli::{AirportsArgs, Command, LogFormat, SearchArgs};
use flight_finder::config::env_config::AIRPORTS_FILE_VAR;
use flight_finder::config::DatasetConfig;
use flight_finder::utils::error::ErrorSeverity;
use flight_finder::utils::{logger, validation::Validate};
use flight_finder::{
    AirportResolver, AmadeusClient, AppConfig, CliConfig, CsvAirports, FinderError, FlightSearch,
    Iso3166, SearchOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.command {
        Command::Airports(args) => run_airports(&cli, args),
        Command::Search(args) => run_search(&cli, args).await,
    };

    if let Err(e) = result {
        report_and_exit(e);
    }

    Ok(())
}

fn dataset_for(cli: &CliConfig, configured: &DatasetConfig) -> CsvAirports {
    let env_file = std::env::var(AIRPORTS_FILE_VAR).ok();
    let dataset = CsvAirports::select(
        cli.airports_file.as_deref(),
        configured.airports_file.as_deref(),
        env_file.as_deref(),
    );
    tracing::debug!("Airport dataset: {:?}", dataset);
    dataset
}

fn run_airports(cli: &CliConfig, args: &AirportsArgs) -> Result<(), FinderError> {
    // 只需要 [dataset] 區段，不要求 API 憑證
    let configured = match &cli.config {
        Some(path) => DatasetConfig::from_file(path)?,
        None => DatasetConfig::default(),
    };
    configured.validate()?;

    let resolver = AirportResolver::new(Iso3166, dataset_for(cli, &configured));

    match resolver.resolve(&args.city, &args.country) {
        Ok(airports) => {
            tracing::info!("Found {} airport(s)", airports.len());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&airports)?);
            } else {
                for airport in airports.iter() {
                    let iata = if airport.has_iata() { airport.iata.as_str() } else { "---" };
                    println!("{:<4} {:<5} {}", iata, airport.icao, airport.name);
                }
            }
            Ok(())
        }
        Err(failure) => {
            eprintln!("❌ {}", failure);
            std::process::exit(1);
        }
    }
}

async fn run_search(cli: &CliConfig, args: &SearchArgs) -> Result<(), FinderError> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    config.validate()?;
    tracing::debug!("App config: {:?}", config);

    let dataset = dataset_for(cli, &config.dataset);
    let resolver = AirportResolver::new(Iso3166, dataset);
    let client = AmadeusClient::new(config.api)?;
    let search = FlightSearch::new(resolver, client);

    let outcome = search.run(&args.to_trip()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    println!(
        "✈️  {} ({}) -> {} ({})",
        outcome.origin.iata, outcome.origin.name, outcome.destination.iata, outcome.destination.name
    );
    println!("📋 {} offer(s)", outcome.offers.count());

    for offer in &outcome.offers.data {
        let route: Vec<String> = offer
            .itineraries
            .iter()
            .map(|itinerary| {
                let flights: Vec<String> = itinerary
                    .segments
                    .iter()
                    .map(|s| format!("{}{}", s.carrier_code, s.number))
                    .collect();
                format!(
                    "{} ({} stop(s), {})",
                    flights.join(" "),
                    itinerary.stops(),
                    itinerary.duration.as_deref().unwrap_or("?")
                )
            })
            .collect();

        println!(
            "  #{:<3} {:>10} {}  {}",
            offer.id,
            offer.price.grand_total.as_deref().unwrap_or(&offer.price.total),
            offer.price.currency,
            route.join(" | ")
        );
    }

    if let Some(cheapest) = outcome.offers.cheapest() {
        println!(
            "💰 Cheapest: offer #{} at {} {}",
            cheapest.id,
            cheapest.price.grand_total.as_deref().unwrap_or(&cheapest.price.total),
            cheapest.price.currency
        );
    }
}

fn report_and_exit(e: FinderError) -> ! {
    tracing::error!(
        "❌ flight-finder failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
