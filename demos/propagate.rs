//! Propagates an input box through a small ReLU network in both domains.
//!
//! Run with:
//! ```bash
//! cargo run --example propagate -- --samples 1000 --svg out.svg
//! ```

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use zonotope_rs::render::{intervals_to_svg, SvgConfig};
use zonotope_rs::{DenseLayer, Interval, Network, Zonotope};

#[derive(Parser, Debug)]
#[command(name = "propagate")]
#[command(about = "Interval vs. zonotope reachability of a toy ReLU network")]
struct Args {
    /// Number of concrete inputs to sample for the soundness check
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Seed for the sampler
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the output zonotope as SVG to this path
    #[arg(long)]
    svg: Option<String>,

    /// Write the output interval box as SVG to this path
    #[arg(long)]
    box_svg: Option<String>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Args::parse();
    info!("args = {:?}", args);

    let network = Network::new(vec![
        DenseLayer::relu(vec![vec![1.0, 0.7], vec![0.5, 1.2]])?,
        DenseLayer::relu(vec![vec![1.0, 0.3], vec![0.2, 1.0]])?,
    ])?;

    let input = [Interval::new(0.0, 2.0), Interval::new(1.0, 3.0)];
    let by_interval = network.propagate_intervals(&input)?;
    println!("interval output = {:?}", by_interval.iter().map(|i| i.to_string()).collect::<Vec<_>>());

    let z = Zonotope::from_intervals(&input);
    println!("input zonotope =\n{}", z);
    let output = network.propagate_zonotope(&z)?;
    println!("output zonotope =\n{}", output);
    let by_zonotope = output.to_intervals();
    println!("zonotope bounds = {:?}", by_zonotope.iter().map(|i| i.to_string()).collect::<Vec<_>>());

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut violations = 0;
    for _ in 0..args.samples {
        let x = z.random_member_with(&mut rng);
        let y = network.evaluate(&x)?;
        if !y.iter().zip(&by_zonotope).all(|(v, b)| b.contains(*v)) {
            violations += 1;
        }
    }
    println!("{} of {} samples outside the zonotope bounds", violations, args.samples);

    if let Some(path) = args.svg {
        std::fs::write(&path, output.to_svg(&SvgConfig::default())?)?;
        info!("wrote {}", path);
    }
    if let Some(path) = args.box_svg {
        std::fs::write(&path, intervals_to_svg(by_interval[0], by_interval[1], &SvgConfig::default()))?;
        info!("wrote {}", path);
    }

    Ok(())
}
