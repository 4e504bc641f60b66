use std::process;

use chrono::NaiveDate;
use clap::Parser;

use farelink::date::PartialDate;
use farelink::error::SearchError;
use farelink::search::{itinerary, roundtrip, ItinerarySearch, RoundtripSearch};

#[derive(Parser)]
#[command(
    name = "farelink",
    about = "Build Google Flights deep-link URLs from the terminal",
    version,
    after_help = "\
Examples:
  farelink roundtrip -f JFK -t JNB
  farelink roundtrip -f JFK,EWR -t JNB,CPT -d 2026-09-06 -r 2026-10-12
  farelink roundtrip -f JFK -t JNB -d 2026-09-06 --open
  farelink itinerary --leg \"JFK,EWR JNB 2026-09-05\" --leg \"CPT JFK,EWR 2026-09-09\"
  farelink itinerary --leg \"JFK LHR\" --leg \"LHR NRT\" --leg \"NRT JFK\" --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Build a round-trip search URL",
        after_help = "\
Examples:
  No dates:     farelink roundtrip -f JFK -t JNB
  With dates:   farelink roundtrip -f JFK -t JNB -d 2026-09-06 -r 2026-10-12
  Multi-origin: farelink roundtrip -f JFK,EWR,LGA,SWF -t JNB,CPT
  As itinerary: farelink roundtrip -f JFK -t JNB -d 2026-09-06 -r 2026-10-12 --as-itinerary"
    )]
    Roundtrip(RoundtripArgs),
    #[command(
        about = "Build a multi-leg itinerary search URL",
        after_help = "\
Examples:
  Round the world:  farelink itinerary --leg \"JFK LHR 2026-09-01\" --leg \"LHR NRT\" --leg \"NRT JFK\"
  Open return leg:  farelink itinerary --leg \"JFK,EWR JNB\" --leg \"JNB\"
  Open in browser:  farelink itinerary --leg \"JFK JNB 2026-09-05\" --open"
    )]
    Itinerary(ItineraryArgs),
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct RoundtripArgs {
    #[arg(
        short, long,
        value_name = "IATA",
        help = "Departure airport code(s), comma-separated",
        long_help = "Departure airport IATA code(s), comma-separated \
            (e.g. JFK or JFK,EWR,LGA). Duplicates are dropped, order is kept."
    )]
    from: String,

    #[arg(
        short, long,
        value_name = "IATA",
        help = "Return airport code(s), comma-separated",
        long_help = "Return airport IATA code(s), comma-separated \
            (e.g. JNB or JNB,CPT). Duplicates are dropped, order is kept."
    )]
    to: String,

    #[arg(
        short,
        long,
        value_name = "YYYY-MM-DD",
        help = "Departure date (omit to leave the date open)"
    )]
    depart: Option<String>,

    #[arg(
        short = 'r',
        long = "return",
        value_name = "YYYY-MM-DD",
        help = "Return date (omit to leave the date open)"
    )]
    return_date: Option<String>,

    #[arg(
        long,
        help = "Emit the two-leg itinerary form of this round trip",
        long_help = "Reshape the round trip as a two-leg itinerary URL: an \
            outbound leg, then a return leg with the airports mirrored."
    )]
    as_itinerary: bool,

    #[arg(long, help = "Open the URL in the default browser")]
    open: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Args)]
struct ItineraryArgs {
    #[arg(
        long,
        value_name = "\"FROM TO DATE\"",
        help = "Flight leg (repeatable, in travel order)",
        long_help = "Define a flight leg as \"FROM\", \"FROM TO\" or \
            \"FROM TO YYYY-MM-DD\", with comma-separated airport codes. \
            Repeat in travel order.\n\
            Example: --leg \"JFK,EWR JNB 2026-09-05\" --leg \"JNB JFK,EWR\"",
        num_args = 1,
        required = true
    )]
    leg: Vec<String>,

    #[arg(long, help = "Open the URL in the default browser")]
    open: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

fn error_code(err: &SearchError) -> i32 {
    match err {
        SearchError::InvalidDate(_) | SearchError::InvalidLeg(_) => 2,
        SearchError::Incomplete { .. } => 3,
    }
}

fn error_kind(err: &SearchError) -> &'static str {
    match err {
        SearchError::InvalidDate(_) => "invalid_date",
        SearchError::InvalidLeg(_) => "invalid_leg",
        SearchError::Incomplete { .. } => "incomplete_search",
    }
}

fn die(err: &SearchError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{}", serde_json::to_string(&json).unwrap());
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn parse_airports(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty())
        .collect()
}

fn parse_date(date: &str) -> Result<PartialDate, SearchError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(PartialDate::from)
        .map_err(|_| SearchError::InvalidDate(date.to_string()))
}

fn build_roundtrip(args: &RoundtripArgs) -> Result<RoundtripSearch, SearchError> {
    let depart = match args.depart.as_deref() {
        Some(date) => parse_date(date)?,
        None => PartialDate::default(),
    };
    let ret = match args.return_date.as_deref() {
        Some(date) => parse_date(date)?,
        None => PartialDate::default(),
    };
    Ok(roundtrip()
        .departing(parse_airports(&args.from), depart)
        .returning(parse_airports(&args.to), ret))
}

fn build_itinerary(legs: &[String]) -> Result<ItinerarySearch, SearchError> {
    let mut search = itinerary();
    for spec in legs {
        let parts: Vec<&str> = spec.split_whitespace().collect();
        let (from, to, date) = match parts.as_slice() {
            [from] => (*from, None, None),
            [from, to] => (*from, Some(*to), None),
            [from, to, date] => (*from, Some(*to), Some(*date)),
            _ => return Err(SearchError::InvalidLeg(spec.clone())),
        };
        let on = match date {
            Some(date) => parse_date(date)?,
            None => PartialDate::default(),
        };
        search = search.departing(parse_airports(from), on);
        if let Some(to) = to {
            search = search.arriving(parse_airports(to));
        }
    }
    Ok(search)
}

fn emit(url: &str, open_it: bool, json_mode: bool) {
    if open_it {
        println!("Opening: {url}");
        if let Err(e) = open::that(url) {
            eprintln!("error: failed to open browser: {e}");
            process::exit(1);
        }
        return;
    }
    if json_mode {
        let json = serde_json::json!({ "url": url });
        println!("{}", serde_json::to_string(&json).unwrap());
    } else {
        println!("{url}");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => farelink::mcp::run().await,
        Commands::Roundtrip(args) => {
            let search = match build_roundtrip(&args) {
                Ok(s) => s,
                Err(e) => die(&e, args.json),
            };
            if args.as_itinerary {
                match search.itinerary().url() {
                    Ok(url) => emit(&url, args.open, args.json),
                    Err(e) => die(&e, args.json),
                }
            } else {
                emit(&search.url(), args.open, args.json);
            }
        }
        Commands::Itinerary(args) => {
            let search = match build_itinerary(&args.leg) {
                Ok(s) => s,
                Err(e) => die(&e, args.json),
            };
            match search.url() {
                Ok(url) => emit(&url, args.open, args.json),
                Err(e) => die(&e, args.json),
            }
        }
    }
}
