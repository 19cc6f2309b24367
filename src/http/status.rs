//! Reason phrases for the status codes the API emits.

const REASON_PHRASES: [(u16, &str); 8] = [
    (200, "OK"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
];

/// Reason phrase for `status`, or an empty string for codes outside the table.
pub fn reason_phrase(status: u16) -> &'static str {
    REASON_PHRASES
        .iter()
        .find(|(code, _)| *code == status)
        .map_or("", |(_, phrase)| phrase)
}
