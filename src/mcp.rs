use chrono::NaiveDate;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::date::PartialDate;
use crate::error::SearchError;
use crate::search::{itinerary, roundtrip, ItinerarySearch};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct RoundtripUrlArgs {
    #[schemars(
        description = "Departure airport IATA code(s), comma-separated. Examples: JFK or JFK,EWR,LGA"
    )]
    from: String,
    #[schemars(
        description = "Return airport IATA code(s), comma-separated. Examples: JNB or JNB,CPT"
    )]
    to: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Omit to leave the date open")]
    depart: Option<String>,
    #[schemars(description = "Return date in YYYY-MM-DD format. Omit to leave the date open")]
    return_date: Option<String>,
    #[schemars(
        description = "Emit the two-leg itinerary form of the round trip instead of the f/t form"
    )]
    as_itinerary: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ItineraryUrlArgs {
    #[schemars(
        description = "Flight legs in travel order, each as \"FROM\", \"FROM TO\" or \"FROM TO YYYY-MM-DD\" with comma-separated airport codes. Example: [\"JFK,EWR JNB 2026-09-05\", \"JNB JFK,EWR\"]"
    )]
    legs: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct OpenUrlArgs {
    #[schemars(description = "URL to open. Must start with http:// or https://")]
    url: String,
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

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

#[derive(Debug, Clone)]
struct FarelinkMcp {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FarelinkMcp {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Build a Google Flights deep-link URL for a round-trip search. Dates are optional; an omitted date leaves that direction's date open on the flights page. Returns the URL as text; pass it to open_url to show it in a browser. NEVER construct Google Flights fragment URLs manually -- always use this tool."
    )]
    async fn roundtrip_url(
        &self,
        Parameters(args): Parameters<RoundtripUrlArgs>,
    ) -> Result<CallToolResult, McpError> {
        let depart = match args.depart.as_deref().map(parse_date).transpose() {
            Ok(d) => d.unwrap_or_default(),
            Err(e) => return tool_error(e.to_string()),
        };
        let ret = match args.return_date.as_deref().map(parse_date).transpose() {
            Ok(d) => d.unwrap_or_default(),
            Err(e) => return tool_error(e.to_string()),
        };

        let search = roundtrip()
            .departing(parse_airports(&args.from), depart)
            .returning(parse_airports(&args.to), ret);

        if args.as_itinerary.unwrap_or(false) {
            match search.itinerary().url() {
                Ok(url) => Ok(CallToolResult::success(vec![Content::text(url)])),
                Err(e) => tool_error(e.to_string()),
            }
        } else {
            Ok(CallToolResult::success(vec![Content::text(search.url())]))
        }
    }

    #[tool(
        description = "Build a Google Flights deep-link URL for a multi-leg itinerary search. Give legs in travel order; a trailing leg may leave its arrival open. Every leg needs at least a departure airport. Returns the URL as text; pass it to open_url to show it in a browser."
    )]
    async fn itinerary_url(
        &self,
        Parameters(args): Parameters<ItineraryUrlArgs>,
    ) -> Result<CallToolResult, McpError> {
        if args.legs.is_empty() {
            return tool_error("at least one leg is required");
        }

        let search = match build_itinerary(&args.legs) {
            Ok(s) => s,
            Err(e) => return tool_error(e.to_string()),
        };

        match search.url() {
            Ok(url) => Ok(CallToolResult::success(vec![Content::text(url)])),
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Open a URL in the default web browser. To show a flight search, call roundtrip_url or itinerary_url first to get the URL, then pass that URL here."
    )]
    async fn open_url(
        &self,
        Parameters(args): Parameters<OpenUrlArgs>,
    ) -> Result<CallToolResult, McpError> {
        if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
            return tool_error("URL must start with http:// or https://");
        }

        match open::that(&args.url) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Opened: {}",
                args.url
            ))])),
            Err(e) => tool_error(format!("failed to open browser: {e}")),
        }
    }
}

#[tool_handler]
impl ServerHandler for FarelinkMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "farelink".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Google Flights deep-link builder. Workflow: (1) roundtrip_url or itinerary_url \
                 to build the search URL. (2) open_url with that URL to show it in a browser. \
                 NEVER construct the fragment URLs yourself -- the delimiter grammar is exacting."
                    .into(),
            ),
        }
    }
}

pub async fn run() {
    let service = FarelinkMcp::new()
        .serve(rmcp::transport::stdio())
        .await
        .expect("failed to start MCP server");
    service.waiting().await.expect("MCP server error");
}
