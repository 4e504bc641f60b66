/// Landing page every search fragment hangs off of.
pub const BASE_URL: &str = "https://www.google.com/flights/?f=0&gl=us";

/// Join ordered key/value pairs into the `search;` fragment grammar the
/// flights page expects. Pair order is preserved, never sorted. Airport
/// codes and ISO dates are already fragment-safe, so nothing is escaped.
pub fn assemble(params: &[(String, String)]) -> String {
    let joined: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{BASE_URL}#search;{}", joined.join(";"))
}
