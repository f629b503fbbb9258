use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use transit_trips::domain::RouteType;
use transit_trips::mbta::{MbtaClient, MbtaConfig};
use transit_trips::network::{SourceError, TransitNetwork};
use transit_trips::planner::find_trip;

const USAGE: &str = "\
Usage: transit-trips [OPTIONS] <COMMAND>

Commands:
  routes            List the routes in the network
  stats             Route and transfer-stop statistics
  stops             List every stop in the network
  trip <FROM> <TO>  Find a sequence of routes between two stops
  interactive       Prompt for trips repeatedly

Options:
  -t, --types <CODES>  Comma-separated GTFS route type codes to load
                       (default: 0,1 - light rail and subway; empty loads all)
  -a, --api-key <KEY>  MBTA API key; overrides the MBTA_API_KEY environment
                       variable. Anonymous requests work at a lower rate limit.
";

#[derive(Debug, PartialEq)]
enum Command {
    Routes,
    Stats,
    Stops,
    Trip { from: String, to: String },
    Interactive,
}

#[derive(Debug)]
struct Cli {
    api_key: Option<String>,
    route_types: Vec<RouteType>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut api_key = None;
    let mut route_types = None;
    let mut positionals: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-a" | "--api-key" => {
                let key = iter.next().ok_or("--api-key needs a value")?;
                api_key = Some(key.clone());
            }
            "-t" | "--types" => {
                let codes = iter.next().ok_or("--types needs a value")?;
                let mut parsed = Vec::new();
                for code in codes.split(',').filter(|c| !c.trim().is_empty()) {
                    let code: u16 = code
                        .trim()
                        .parse()
                        .map_err(|_| format!("invalid route type code `{code}`"))?;
                    parsed.push(RouteType::from_code(code));
                }
                route_types = Some(parsed);
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option `{flag}`")),
            positional => positionals.push(positional),
        }
    }

    let command = match positionals.as_slice() {
        ["routes"] => Command::Routes,
        ["stats"] => Command::Stats,
        ["stops"] => Command::Stops,
        ["trip", from, to] => Command::Trip {
            from: from.to_string(),
            to: to.to_string(),
        },
        ["trip", ..] => return Err("trip needs a starting stop and a destination stop".into()),
        ["interactive"] => Command::Interactive,
        [] => return Err("no command given".into()),
        [other, ..] => return Err(format!("unknown command `{other}`")),
    };

    Ok(Cli {
        api_key,
        // Default to the subway network: light rail and heavy rail.
        route_types: route_types.unwrap_or_else(|| vec![RouteType::LightRail, RouteType::Subway]),
        command,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {message}\n");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let api_key = cli.api_key.or_else(|| env::var("MBTA_API_KEY").ok());
    let mut config = MbtaConfig::new();
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    let client = match MbtaClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut network = TransitNetwork::new(client, cli.route_types);

    let result = match &cli.command {
        Command::Routes => cmd_routes(&mut network).await,
        Command::Stats => cmd_stats(&mut network).await,
        Command::Stops => cmd_stops(&mut network).await,
        Command::Trip { from, to } => cmd_trip(&mut network, from, to).await,
        Command::Interactive => cmd_interactive(&mut network).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn cmd_routes(network: &mut TransitNetwork<MbtaClient>) -> Result<(), SourceError> {
    let routes = network.routes().await?;
    if routes.is_empty() {
        println!("No known routes");
        return Ok(());
    }
    println!("Routes:");
    for route in routes {
        println!("  {route}");
    }
    Ok(())
}

async fn cmd_stops(network: &mut TransitNetwork<MbtaClient>) -> Result<(), SourceError> {
    let stops = network.stops().await?;
    if stops.is_empty() {
        println!("No known stops");
        return Ok(());
    }
    println!("Stops:");
    for stop in stops {
        println!("  {stop}");
    }
    Ok(())
}

async fn cmd_stats(network: &mut TransitNetwork<MbtaClient>) -> Result<(), SourceError> {
    let graph = network.graph().await?;
    let mut routes: Vec<_> = graph.routes().collect();
    if routes.is_empty() {
        println!("No known routes");
        return Ok(());
    }

    routes.sort_by_key(|r| r.stop_count());
    if let (Some(fewest), Some(most)) = (routes.first(), routes.last()) {
        println!("Route with the fewest stops: {fewest} ({})", fewest.stop_count());
        println!("Route with the most stops: {most} ({})", most.stop_count());
    }

    println!("Stops connecting multiple routes:");
    for stop in graph.stops().filter(|s| s.route_count() >= 2) {
        let names: Vec<String> = stop
            .route_ids()
            .filter_map(|id| graph.route_by_id(id))
            .map(|r| r.to_string())
            .collect();
        println!("  {stop}: {}", names.join(", "));
    }
    Ok(())
}

async fn cmd_trip(
    network: &mut TransitNetwork<MbtaClient>,
    from: &str,
    to: &str,
) -> Result<(), SourceError> {
    let graph = network.graph().await?;
    let Some(origin) = graph.stop(from) else {
        println!("Unable to find the stop \"{from}\"");
        return Ok(());
    };
    let Some(destination) = graph.stop(to) else {
        println!("Unable to find the stop \"{to}\"");
        return Ok(());
    };

    let trip = find_trip(graph, origin, destination);
    if trip.is_empty() {
        println!("No route connects {origin} to {destination}");
    } else {
        let names: Vec<String> = trip.iter().map(|r| r.to_string()).collect();
        println!("{origin} to {destination} -> {}", names.join(", "));
    }
    Ok(())
}

async fn cmd_interactive(network: &mut TransitNetwork<MbtaClient>) -> Result<(), SourceError> {
    // Populate before the first prompt so input feels immediate afterwards.
    network.graph().await?;
    let stdin = io::stdin();

    loop {
        print!("Enter the starting stop (blank to quit, `list` for stops): ");
        io::stdout().flush().ok();
        let Some(line) = read_line(&stdin) else { break };
        let start = line.trim().to_string();
        if start.is_empty() {
            break;
        }
        if start == "list" {
            cmd_stops(network).await?;
            continue;
        }
        if network.stop(&start).await?.is_none() {
            println!("Unable to find the stop \"{start}\"");
            continue;
        }

        print!("Enter the destination stop: ");
        io::stdout().flush().ok();
        let Some(line) = read_line(&stdin) else { break };
        let destination = line.trim().to_string();
        if destination.is_empty() {
            continue;
        }

        cmd_trip(network, &start, &destination).await?;
    }
    Ok(())
}

fn read_line(stdin: &io::Stdin) -> Option<String> {
    let mut buffer = String::new();
    match stdin.lock().read_line(&mut buffer) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buffer),
    }
}
