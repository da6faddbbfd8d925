//! dhke CLI tool
//!
//! Runs a single Diffie-Hellman exchange between Alice and Bob and shows
//! every public step along the way.

use clap::Parser;
use dhke::crypto::{
    DhError, KeyExchange, ParameterSet, Participant, ValidationPolicy, RECOMMENDED_N_BIT_LENGTH,
};
use num_bigint::BigInt;
use tracing_subscriber::EnvFilter;

/// Simple Diffie-Hellman key exchange
#[derive(Parser)]
#[command(name = "dhke")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A large prime used for modulo calculations, should be at least 2048 bits
    #[arg(long, default_value = "23", allow_negative_numbers = true)]
    n: BigInt,

    /// A primitive root modulo `--n`, used as the base of every exponentiation
    #[arg(long, default_value = "5", allow_negative_numbers = true)]
    g: BigInt,

    /// Alice's secret number, between 1 and `--n`
    #[arg(long, default_value = "4", allow_negative_numbers = true)]
    alice: BigInt,

    /// Bob's secret number, between 1 and `--n`
    #[arg(long, default_value = "3", allow_negative_numbers = true)]
    bob: BigInt,

    /// Warn when the modulus is shorter than this many bits
    #[arg(long, default_value_t = RECOMMENDED_N_BIT_LENGTH)]
    recommended_bits: u64,

    /// Print the exchange transcript as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dhke=info")),
        )
        .init();

    let cli = Cli::parse();
    let policy = ValidationPolicy {
        recommended_bits: cli.recommended_bits,
    };

    let params = ParameterSet::with_advisory(cli.g, cli.n, policy, |advisory| {
        eprintln!("Warning: {}", advisory);
    })
    .unwrap_or_else(|e| fail(e));

    let alice = Participant::new(&params, cli.alice).unwrap_or_else(|e| fail(e));
    let bob = Participant::new(&params, cli.bob).unwrap_or_else(|e| fail(e));

    if !cli.json {
        println!("Shared Constants: {}", params);
        println!("Alice: {}", alice);
        println!("Bob:   {}", bob);
    }

    let transcript = KeyExchange::transcript(&alice, &bob).unwrap_or_else(|e| fail(e));

    if cli.json {
        let json = serde_json::to_string_pretty(&transcript).unwrap_or_else(|e| {
            eprintln!("Error serializing transcript: {}", e);
            std::process::exit(1);
        });
        println!("{}", json);
        return;
    }

    println!("Alice's Public Value: {}", transcript.alice_public);
    println!("Bob's   Public Value: {}", transcript.bob_public);
    println!("Agreed upon shared secret: {}", transcript.shared);
}

/// Report an error and exit; internal defects get their own status code
fn fail(e: DhError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(if e.is_internal() { 2 } else { 1 });
}
