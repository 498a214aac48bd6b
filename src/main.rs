//! Drishti command line.
//!
//! ```bash
//! # Align one pair and dump the aligned clouds for plotting
//! drishti compare reference-8.bmp candidate-8.bmp --dump ./output
//!
//! # Digit recognition: every candidate-<d>.bmp against every reference-<d>.bmp
//! drishti --images ./digits classify --workers 10
//!
//! # With a custom config file and a fixed seed
//! drishti --config my.yaml --seed 7 classify
//! ```

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

use clap::{Parser, Subcommand};

use drishti::io::{candidate_file_name, reference_file_name, write_comparison, write_point_cloud};
use drishti::{
    BatchClassifier, DrishtiConfig, ImageConverter, ImageLoader, PointCloud, TransformModel,
    TransformObjective, run_once,
};

/// Image similarity by swarm-searched optimal-transport alignment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/config.yaml")]
    config: String,

    /// Bitmap directory (overrides the config file)
    #[arg(short, long)]
    images: Option<String>,

    /// Base random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Align one candidate bitmap against one reference bitmap
    Compare {
        /// Reference bitmap file name
        reference: String,

        /// Candidate bitmap file name
        candidate: String,

        /// Search translation only
        #[arg(long)]
        translation_only: bool,

        /// Directory for point cloud dumps
        #[arg(short, long)]
        dump: Option<String>,
    },

    /// Compare every candidate digit with every reference digit
    Classify {
        /// Number of digit labels (overrides the config file)
        #[arg(short, long)]
        labels: Option<usize>,

        /// Worker threads (overrides the config file)
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

fn load_config(args: &Args) -> Result<DrishtiConfig, Box<dyn Error>> {
    let path = Path::new(&args.config);
    let mut config = if path.exists() {
        log::info!("Loading config from {}", path.display());
        DrishtiConfig::load(path)?
    } else {
        log::info!("Config {} not found, using defaults", path.display());
        DrishtiConfig::default()
    };

    if let Some(ref images) = args.images {
        config.image.directory = PathBuf::from(images);
    }
    if args.seed.is_some() {
        config.classification.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn compare<const N: usize>(
    config: &DrishtiConfig,
    reference: PointCloud,
    candidate: PointCloud,
    seed: Option<u64>,
    dump: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let swarm = config.swarm.to_swarm_config::<N>()?;
    let objective = TransformObjective::new(
        reference,
        candidate,
        config.objective.clone(),
        config.transport.clone(),
    )?;

    let solution = match seed {
        Some(seed) => run_once(&swarm, &objective, seed)?,
        None => drishti::ParticleSwarm::new(swarm).run(&objective)?,
    };
    let evaluation = objective.evaluate(solution.vector.as_slice())?;

    println!("Fitness: {:.6}", solution.fitness);
    println!("  Transport cost: {:.6}", evaluation.transport_cost);
    println!("  Rotation penalty: {:.6}", evaluation.rotation_penalty);
    println!("  Parameters: {:?}", solution.vector.as_slice());
    println!(
        "  Iterations: {} ({:?}), evaluations: {} ({} failed)",
        solution.iterations,
        solution.termination,
        solution.evaluations,
        solution.failed_evaluations
    );

    if let Some(dir) = dump {
        std::fs::create_dir_all(dir)?;
        write_point_cloud(dir.join("reference.txt"), objective.reference())?;
        write_point_cloud(dir.join("candidate.txt"), objective.candidate())?;
        write_point_cloud(dir.join("aligned.txt"), &evaluation.transformed)?;
        write_comparison(
            dir.join("comparison.txt"),
            objective.reference(),
            &evaluation.transformed,
        )?;
        log::info!("Dumps written to {}", dir.display());
    }
    Ok(())
}

fn classify<const N: usize>(
    config: &DrishtiConfig,
    loader: &ImageLoader,
    converter: &ImageConverter,
) -> Result<(), Box<dyn Error>> {
    let labels = config.classification.labels;
    let mut references = Vec::with_capacity(labels);
    let mut candidates = Vec::with_capacity(labels);
    for label in 0..labels {
        let reference = loader.load_cloud(&reference_file_name(label), converter)?;
        let candidate = loader.load_cloud(&candidate_file_name(label), converter)?;
        references.push((label, Arc::new(reference)));
        candidates.push((label, Arc::new(candidate)));
    }

    let classifier = BatchClassifier::<N>::new(
        config.swarm.to_swarm_config::<N>()?,
        config.objective.clone(),
        config.transport.clone(),
        config.classification.clone(),
    )?;

    let cancel = classifier.cancel_handle();
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        cancel.store(true, Ordering::Relaxed);
    })?;

    let classifications = classifier.classify_candidates(&references, &candidates);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut correct = 0;
    for classification in &classifications {
        for &(reference_label, fitness) in &classification.ranking {
            writeln!(
                out,
                "Similarity between {} and {}: {:.6}",
                reference_label, classification.candidate_label, fitness
            )?;
        }
        match classification.predicted_label {
            Some(label) => writeln!(
                out,
                "Candidate {} classified as {}{}",
                classification.candidate_label,
                label,
                if classification.is_correct() { "" } else { " (wrong)" }
            )?,
            None => writeln!(
                out,
                "Candidate {} could not be classified ({} failed pairs)",
                classification.candidate_label, classification.failures
            )?,
        }
        if classification.is_correct() {
            correct += 1;
        }
    }
    writeln!(out, "Accuracy: {}/{}", correct, classifications.len())?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let mut config = load_config(&args)?;

    let loader = ImageLoader::new(&config.image.directory);
    let converter = ImageConverter::from_config(&config.image);
    let start = Instant::now();

    match args.command {
        Command::Compare {
            ref reference,
            ref candidate,
            translation_only,
            ref dump,
        } => {
            if translation_only {
                config.objective.model = TransformModel::Translation;
            }
            let reference_cloud = loader.load_cloud(reference, &converter)?;
            let candidate_cloud = loader.load_cloud(candidate, &converter)?;
            log::info!(
                "Comparing {} ({} active points) with {} ({} active points)",
                reference,
                reference_cloud.active_count(),
                candidate,
                candidate_cloud.active_count()
            );

            let dump = dump.as_deref().map(Path::new);
            let seed = config.classification.seed;
            match config.objective.model {
                TransformModel::Translation => {
                    compare::<2>(&config, reference_cloud, candidate_cloud, seed, dump)?
                }
                TransformModel::TranslationRotation => {
                    compare::<3>(&config, reference_cloud, candidate_cloud, seed, dump)?
                }
            }
        }
        Command::Classify { labels, workers } => {
            if let Some(labels) = labels {
                config.classification.labels = labels;
            }
            if let Some(workers) = workers {
                config.classification.workers = workers;
            }
            config.classification.validate()?;
            log::info!(
                "Classifying {} digits from {} on {} workers",
                config.classification.labels,
                loader.directory().display(),
                config.classification.workers
            );

            match config.objective.model {
                TransformModel::Translation => classify::<2>(&config, &loader, &converter)?,
                TransformModel::TranslationRotation => {
                    classify::<3>(&config, &loader, &converter)?
                }
            }
        }
    }

    log::info!("Finished in {:.2?}", start.elapsed());
    Ok(())
}
