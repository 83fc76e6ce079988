//! mezcla CLI
//!
//! One-shot pipeline: sample the five-blob cloud, fit K-Means and a
//! Gaussian mixture, pick three points the two models disagree on, print
//! the report, and write the side-by-side PNG.

use clap::Parser;
use mezcla::error::MezclaError;
use mezcla::plot::{self, Panel};
use mezcla::prelude::*;
use mezcla::report::render_report;
use mezcla::select::find_example_set;
use mezcla::synthetic::{default_blobs, generate_blobs};
use std::error::Error;
use std::path::PathBuf;

/// Hard vs. soft cluster assignment comparison.
#[derive(Parser, Debug)]
#[command(name = "mezcla")]
#[command(version, about, long_about = None)]
struct Args {
    /// Random seed driving generation and both fits.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Path of the output image.
    #[arg(short('o'), long, default_value = "hard_vs_soft.png")]
    out: PathBuf,

    /// Number of K-means restarts.
    #[arg(long, default_value_t = 25)]
    restarts: usize,

    /// Print progress while running.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let specs = default_blobs();
    if args.verbose {
        let total: usize = specs.iter().map(|s| s.n_samples).sum();
        println!("Sampling {} points from {} blobs...", total, specs.len());
    }
    let data = generate_blobs(&specs, args.seed)?;

    if args.verbose {
        println!(
            "Fitting K-means (k = {N_CLUSTERS}, {} restarts)...",
            args.restarts
        );
    }
    let mut kmeans = KMeans::new(N_CLUSTERS)
        .with_n_init(args.restarts)
        .with_random_state(args.seed);
    kmeans.fit(&data)?;
    if args.verbose {
        println!(
            "K-means converged in {} iterations (inertia {:.2})",
            kmeans.n_iter(),
            kmeans.inertia()
        );
    }

    if args.verbose {
        println!("Fitting Gaussian mixture from the K-means partition...");
    }
    let mut gmm = GaussianMixture::new(N_CLUSTERS).with_random_state(args.seed);
    gmm.fit_from_labels(&data, kmeans.labels())?;
    if args.verbose {
        println!(
            "EM ran {} iterations (converged: {}, mean log-likelihood {:.4})",
            gmm.n_iter(),
            gmm.converged(),
            gmm.log_likelihood()
        );
    }

    let examples = match find_example_set(kmeans.labels(), gmm.labels(), N_CLUSTERS) {
        Ok(examples) => examples,
        Err(err @ MezclaError::NoExampleFound { .. }) => {
            eprintln!("{err}");
            eprintln!("Try a different --seed to draw a cloud with more overlap.");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    print!(
        "{}",
        render_report(&data, kmeans.labels(), gmm.responsibilities(), &examples)
    );

    let left = Panel {
        caption: "K-means assignment (hard)",
        labels: kmeans.labels(),
        centers: kmeans.centroids(),
    };
    let right = Panel {
        caption: "GMM assignment (soft)",
        labels: gmm.labels(),
        centers: gmm.means(),
    };
    plot::render_comparison(
        &args.out,
        &data,
        &left,
        &right,
        &examples,
        "Hard vs. soft cluster assignment",
    )?;
    println!("Wrote {}", args.out.display());

    Ok(())
}
