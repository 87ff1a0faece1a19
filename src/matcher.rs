//! Intent matcher
//!
//! Pure keyword dispatcher mapping free-text input to a canned response.
//! Ordered, first-match-wins, case-insensitive substring tests; financial
//! wording pre-empts every other rule. Financial answers are computed from
//! a read-only snapshot supplied by the analytics feed.

use crate::models::FinancialSnapshot;

/// Keywords that route to the financial sub-matcher. Checked before every
/// other rule, so financial-adjacent wording always wins.
const FINANCIAL_KEYWORDS: &[&str] = &[
    "profit", "revenue", "expense", "financial", "money", "income",
];

pub const WEATHER_REPORT: &str = "The current weather at Air-Buddy Airport is partly cloudy with a temperature of 72°F. Wind speed is 8 mph from the southwest. Visibility is good at 10 miles. All flights are currently able to land and take off normally.";

pub const GREETING_REPLY: &str =
    "Hello! How can I assist you with Air-Buddy airport operations today?";

pub const FLIGHT_SEARCH_RESULT: &str = "I found 3 matching flights. Flight AB123 departing at 14:30 to New York, Flight AB456 departing at 15:45 to London, and Flight AB789 departing at 16:20 to Tokyo.";

pub const PASSENGER_LOOKUP_PROMPT: &str = "I found passenger information. Would you like to see details about check-in status, boarding status, or baggage information?";

pub const SEARCH_CAPABILITIES: &str = "I can search for flights, passengers, baggage, gates, and other airport information. Please specify what you're looking for.";

pub const GENERAL_CAPABILITIES: &str = "I'm here to help with questions about Air-Buddy airport operations, financial data, weather conditions, flights, and passenger information. How can I assist you today?";

pub const DATA_UNAVAILABLE: &str = "I don't have the latest financial data available. Please check the Analytics dashboard for up-to-date information.";

pub const FINANCIAL_CAPABILITIES: &str = "I can provide information about airport revenue, expenses, profit margins, and financial performance. Please ask a specific financial question.";

/// Intent matcher
pub struct IntentMatcher;

impl IntentMatcher {
    /// Map free-text input to a response. Pure: identical inputs with the
    /// same snapshot always produce the identical output. Always returns a
    /// non-empty string.
    pub fn respond(input: &str, snapshot: Option<&FinancialSnapshot>) -> String {
        let lower = input.to_lowercase();

        if FINANCIAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Self::financial_answer(&lower, snapshot);
        }

        if lower.contains("weather") {
            return WEATHER_REPORT.to_string();
        }

        if lower.contains("hello") || lower.contains("hi") {
            return GREETING_REPLY.to_string();
        }

        if lower.contains("search") || lower.contains("find") {
            if lower.contains("flight") {
                return FLIGHT_SEARCH_RESULT.to_string();
            }
            if lower.contains("passenger") {
                return PASSENGER_LOOKUP_PROMPT.to_string();
            }
            return SEARCH_CAPABILITIES.to_string();
        }

        GENERAL_CAPABILITIES.to_string()
    }

    /// Financial sub-matcher. First-match-wins over the lower-cased query.
    ///
    /// Precondition: when the expense branch fires, the snapshot's expense
    /// breakdown must hold at least 4 entries in the fixed order the UI
    /// expects (index 0 Infrastructure, index 3 Salaries). A shorter
    /// breakdown panics; the boundary is deliberately not hardened.
    fn financial_answer(lower_query: &str, snapshot: Option<&FinancialSnapshot>) -> String {
        let Some(data) = snapshot else {
            return DATA_UNAVAILABLE.to_string();
        };

        if lower_query.contains("profit") {
            let profit = data.profit.total;
            let margin = profit / data.revenue.total * 100.0;
            return format!(
                "The current airport profit is {}. This represents a profit margin of {:.1}% of total revenue.",
                format_usd(profit),
                margin
            );
        }

        if lower_query.contains("revenue") {
            let revenue = data.revenue.total;
            let aero = data.revenue.aeronautical;
            let non_aero = data.revenue.non_aeronautical;
            return format!(
                "The total airport revenue is {}. This consists of {} in aeronautical revenue ({:.1}%) and {} in non-aeronautical revenue ({:.1}%).",
                format_usd(revenue),
                format_usd(aero),
                aero / revenue * 100.0,
                format_usd(non_aero),
                non_aero / revenue * 100.0
            );
        }

        if lower_query.contains("expense") || lower_query.contains("cost") {
            return format!(
                "The total airport expenses amount to {}. The largest expense categories are Infrastructure ({}) and Salaries ({}).",
                format_usd(data.expenses.total),
                format_usd(data.expenses.breakdown[0].amount),
                format_usd(data.expenses.breakdown[3].amount)
            );
        }

        if lower_query.contains("financial summary") || lower_query.contains("financial overview") {
            let revenue = data.revenue.total;
            let expenses = data.expenses.total;
            let profit = data.profit.total;
            return format!(
                "Financial Summary for Air-Buddy Airport:\nTotal Revenue: {}\nTotal Expenses: {}\nNet Profit: {}\nProfit Margin: {:.1}%",
                format_usd(revenue),
                format_usd(expenses),
                format_usd(profit),
                profit / revenue * 100.0
            );
        }

        FINANCIAL_CAPABILITIES.to_string()
    }
}

/// Integer-rounded US-dollar formatting with locale grouping, no cents
/// (e.g. `$1,234,567`).
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if rounded < 0 {
        grouped.push('-');
    }
    grouped.push('$');

    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
