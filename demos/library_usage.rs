//! Example: Using chatlens as a library
//!
//! This example demonstrates how to use chatlens in your own projects.
//!
//! Run with: cargo run --example library_usage

use chatlens::prelude::*;

const TRANSCRIPT: &str = "\
12/08/23, 09:15 - Messages are end-to-end encrypted.
12/08/23, 09:16 - Alice: Good morning everyone ☀️
12/08/23, 09:17 - Bob: Morning! Did you see https://example.com/launch
12/08/23, 09:20 - Alice: Yes! Plan for today:
- finish the report
- review the launch page
12/08/23, 10:02 - Carol: <Media omitted>
13/08/23, 18:45 - Bob: Great work today 🎉🎉
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatlens Library Usage Examples ===\n");

    // Example 1: Parse a transcript export
    println!("1. Parsing a transcript:");
    let parser = TranscriptParser::new();
    let table = parser.parse_str(TRANSCRIPT)?;
    println!("   Parsed {} messages", table.len());
    println!("   Senders: {:?}", table.sender_list());

    // Example 2: Browse parsed messages
    println!("\n2. Browsing messages:");
    for msg in table.iter() {
        let sender = msg.sender().unwrap_or("(notification)");
        let marker = if msg.is_media() { " [media]" } else { "" };
        println!(
            "   {} {}: {}{marker}",
            msg.timestamp().format("%d/%m %H:%M"),
            sender,
            msg.body().replace('\n', " | ")
        );
    }

    // Example 3: Summary statistics
    println!("\n3. Summary statistics:");
    let overall = fetch_stats(&table, &SenderFilter::Overall);
    println!("   Overall: {} messages, {} words", overall.message_count, overall.word_count);
    println!("   Media: {}, links: {}", overall.media_count, overall.link_count);

    let alice = fetch_stats(&table, &SenderFilter::sender("Alice"));
    println!("   Alice alone: {} messages, {} words", alice.message_count, alice.word_count);

    // Example 4: Activity timelines
    println!("\n4. Activity timelines:");
    for (month, count) in monthly_timeline(&table, &SenderFilter::Overall) {
        println!("   {month}: {count}");
    }
    for (weekday, count) in week_activity_map(&table, &SenderFilter::Overall) {
        if count > 0 {
            println!("   {weekday}: {count}");
        }
    }

    // Example 5: Sender ranking
    println!("\n5. Busiest senders:");
    let config = AnalysisConfig::new();
    let busy = most_busy_users(&table, &config);
    for (rank, (name, count)) in busy.top.iter().enumerate() {
        println!("   {}. {name}: {count}", rank + 1);
    }

    // Example 6: Word and emoji frequencies
    println!("\n6. Word and emoji frequencies:");
    let stopwords = StopWords::english();
    let words = most_common_words(&table, &SenderFilter::Overall, &stopwords, &config);
    for (word, count) in words.iter().take(5) {
        println!("   word: {word} ({count})");
    }
    let emojis = emoji_frequencies(&table, &SenderFilter::Overall, &UnicodeEmojiClassifier);
    for (emoji, count) in &emojis {
        println!("   emoji: {emoji} ({count})");
    }

    // Example 7: Building a full report
    println!("\n7. Full report (text):");
    let report = ChatReport::build(
        &table,
        &SenderFilter::Overall,
        &stopwords,
        &UnicodeEmojiClassifier,
        &config,
    );
    print!("{report}");

    // Example 8: Structured output
    #[cfg(feature = "json-output")]
    {
        println!("\n8. Structured output (JSON, first lines):");
        let json = report.to_format_string(ReportFormat::Json)?;
        for line in json.lines().take(8) {
            println!("   {line}");
        }
    }

    println!("\n=== Examples complete! ===");
    Ok(())
}
