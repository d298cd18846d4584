//! Fixed prompt text sent with every ticket request.

/// Extraction instruction attached to every `process_ticket` call.
///
/// The backend forwards this verbatim to the model; the client never
/// varies it.
pub const TICKET_PROMPT: &str = "Extract the products, quantities, unit prices, and totals from this purchase ticket. Give me the result in JSON format. Include the purchase date if you find it.";
