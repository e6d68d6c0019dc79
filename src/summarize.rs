//! Summary formatting.
//!
//! Pure string assembly: the extracted answer spans and the Wikipedia
//! summary are interpolated into a fixed three-part template.

/// Format the final per-query summary block.
///
/// Answer spans are joined with single spaces; the query, the joined
/// answers, and the knowledge summary appear in that order.
pub fn format_summary(query: &str, answers: &[String], wiki_summary: &str) -> String {
    let combined_answers = answers.join(" ");

    format!(
        "\nBased on the news coverage and your question '{query}', here is a summary:\n\
         {combined_answers}\n\n\
         Additional information from Wikipedia:\n\
         {wiki_summary}"
    )
}
