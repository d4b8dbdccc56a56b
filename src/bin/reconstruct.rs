use clap::Parser;
use log::{info, warn};
use num_bigint::BigInt;
use shamir_reconstruct::{vandermonde, Fraction, ShareDocument};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reconstruct")]
#[command(about = "Recover a secret from its polynomial shares", long_about = None)]
struct Args {
    /// Share documents (JSON); reads stdin when none are given
    inputs: Vec<PathBuf>,

    /// Also solve the Vandermonde system by Cramer's rule and compare
    #[arg(long)]
    cross_check: bool,

    /// Warn about unused shares that are not on the recovered polynomial
    #[arg(long)]
    check_extras: bool,

    /// Print every polynomial coefficient, not just the constant term
    #[arg(short, long)]
    polynomial: bool,

    /// Enable progress output
    #[arg(short, long)]
    verbose: bool,
}

fn read_documents(inputs: &[PathBuf]) -> io::Result<Vec<(String, String)>> {
    if inputs.is_empty() {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json)?;
        return Ok(vec![("<stdin>".to_string(), json)]);
    }

    inputs
        .iter()
        .map(|path| -> io::Result<(String, String)> {
            Ok((path.display().to_string(), fs::read_to_string(path)?))
        })
        .collect()
}

fn reconstruct(label: &str, json: &str, args: &Args) -> Result<BigInt, Box<dyn std::error::Error>> {
    let document = ShareDocument::from_json(json)?;
    if let Some((declared, actual)) = document.declared_mismatch() {
        warn!("{}: keys.n = {} but the document holds {} shares", label, declared, actual);
    }

    let points = document.point_set()?;
    info!(
        "{}: using {} of {} shares",
        label,
        points.threshold(),
        points.threshold() + points.extras().len()
    );

    let secret = points.reconstruct()?;

    if args.cross_check {
        let direct = vandermonde::constant_term(points.selected())?;
        if direct != Fraction::from_integer(secret.clone()) {
            return Err(format!("Cramer's rule gives {} but interpolation gives {}", direct, secret).into());
        }
        info!("{}: cross-check passed", label);
    }

    if args.check_extras {
        let inconsistent = points.inconsistent_extras()?;
        for point in &inconsistent {
            warn!(
                "{}: share x = {} (y = {}) is not on the recovered polynomial",
                label, point.x, point.y
            );
        }
        if inconsistent.is_empty() {
            info!("{}: all {} unused shares agree", label, points.extras().len());
        }
    }

    if args.polynomial {
        for (power, coefficient) in vandermonde::coefficients(points.selected())?.iter().enumerate() {
            println!("{}: a_{} = {}", label, power, coefficient);
        }
    }

    Ok(secret)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let documents = read_documents(&args.inputs)?;
    info!("Loaded {} share document(s)", documents.len());

    for (label, json) in &documents {
        let secret = reconstruct(label, json, &args).map_err(|e| format!("{}: {}", label, e))?;

        if documents.len() > 1 {
            println!("{}: {}", label, secret);
        } else {
            println!("{}", secret);
        }
    }

    Ok(())
}
