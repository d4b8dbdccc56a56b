use clap::Parser;
use log::info;
use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shamir_reconstruct::numeral::{MAX_BASE, MIN_BASE};
use shamir_reconstruct::shamir::generate_shares;
use shamir_reconstruct::ShareDocument;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "split")]
#[command(about = "Split a secret into integer polynomial shares", long_about = None)]
struct Args {
    /// Secret to share (decimal integer)
    #[arg(short, long, allow_hyphen_values = true)]
    secret: String,

    /// Shares needed to reconstruct (k)
    #[arg(short = 'k', long)]
    threshold: usize,

    /// Number of shares to produce (n)
    #[arg(short = 'n', long)]
    shares: usize,

    /// Bit length of the random coefficients
    #[arg(short, long, default_value_t = 256)]
    bits: u64,

    /// Write every share in this base (random bases in 2..=36 otherwise)
    #[arg(long)]
    base: Option<u32>,

    /// Seed for reproducible shares
    #[arg(long)]
    seed: Option<u64>,

    /// Output file for the share document (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable progress output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let secret: BigInt = args.secret.trim().parse()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        "Splitting a {}-bit secret into {} shares (need {} to reconstruct)",
        secret.bits(),
        args.shares,
        args.threshold
    );
    let (shares, _coefficients) = generate_shares(&secret, args.threshold, args.shares, args.bits, &mut rng)?;

    let bases: Vec<u32> = shares
        .iter()
        .map(|_| args.base.unwrap_or_else(|| rng.gen_range(MIN_BASE..=MAX_BASE)))
        .collect();
    let document = ShareDocument::from_points(args.threshold, shares.iter().zip(bases))?;

    // Make sure the document round-trips before handing it out
    let recovered = document.reconstruct()?;
    if recovered != secret {
        return Err(format!("share document reconstructs to {} instead of the secret", recovered).into());
    }
    info!("Verified reconstruction from the first {} shares", args.threshold);

    let json = document.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!("Share document saved to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
