use clap::Parser;
use std::path::PathBuf;
use tabien::processing::{PdfTextExtractor, RegisterExtractor};

/// Print the fields read from a household-registration PDF
#[derive(Parser, Debug)]
#[command(name = "tabien-extract", version)]
struct Args {
    /// Registration PDF to read
    pdf: PathBuf,

    /// Print the raw text layer instead of the parsed fields
    #[arg(long)]
    text: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let text = match PdfTextExtractor::extract_text_from_file(&args.pdf) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.text {
        println!("{}", text);
        return;
    }

    let record = RegisterExtractor::extract(&text);
    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
