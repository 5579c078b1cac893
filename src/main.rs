//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatlens::analytics::{StopWords, UnicodeEmojiClassifier};
use chatlens::cli::Args;
use chatlens::report::ReportFormat;
use chatlens::table::SenderFilter;
use chatlens::{ChatReport, ChatlensError, TranscriptParser};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let filter = args.sender_filter();

    // Print header
    println!("📦 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("👤 Filter:  {filter}");
    println!("📄 Format:  {}", args.format);
    if let Some(ref output) = args.output {
        println!("💾 Output:  {output}");
    }
    println!();

    // Step 1: Parse the transcript
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let parser = TranscriptParser::with_config(args.parse_config());
    let table = parser.parse_path(Path::new(&args.input))?;
    println!(
        "   Found {} messages ({:.2}s)",
        table.len(),
        parse_start.elapsed().as_secs_f64()
    );

    let diagnostics = table.diagnostics();
    if !diagnostics.is_clean() {
        println!(
            "⚠️  Skipped {} leading line(s), {} header(s) with unreadable timestamps",
            diagnostics.leading_skipped, diagnostics.timestamp_failures
        );
    }
    if let SenderFilter::Sender(name) = &filter {
        if !table.sender_list().iter().any(|s| s == name) {
            println!("⚠️  No messages from '{name}' in this chat");
        }
    }

    // Step 2: Load stop words
    let stopwords = match &args.stopwords {
        Some(path) => {
            let file = File::open(path)?;
            let words = StopWords::from_reader(BufReader::new(file))?;
            println!("🔇 Stop words: {} entries from {path}", words.len());
            words
        }
        None => StopWords::english(),
    };

    // Step 3: Compute every aggregate once
    println!("📈 Computing aggregates...");
    let compute_start = Instant::now();
    let report = ChatReport::build(
        &table,
        &filter,
        &stopwords,
        &UnicodeEmojiClassifier,
        &args.analysis_config(),
    );
    println!("   Done in {:.2}s", compute_start.elapsed().as_secs_f64());

    // Step 4: Render
    let format = ReportFormat::from(args.format);
    match &args.output {
        Some(path) => {
            report.write_to_path(path, format)?;
            println!();
            println!("✅ Done! Report saved to {path}");

            // Summary
            println!();
            println!("📊 Summary:");
            println!("   Messages:  {}", report.stats.message_count);
            println!("   Words:     {}", report.stats.word_count);
            println!("   Media:     {}", report.stats.media_count);
            println!("   Links:     {}", report.stats.link_count);

            // Performance stats
            let total_time = total_start.elapsed();
            println!();
            println!("⚡ Performance:");
            println!("   Total time:  {:.2}s", total_time.as_secs_f64());
            let msgs_per_sec = table.len() as f64 / total_time.as_secs_f64();
            println!("   Throughput:  {msgs_per_sec:.0} messages/sec");
        }
        None => {
            println!();
            print!("{}", report.to_format_string(format)?);
        }
    }

    Ok(())
}
