use clap::Parser;
use hyclass::HyclassError;
use hyclass::category::CategoryList;
use hyclass::cli::{BatchArgs, ClassifierOverrides, ClassifyArgs, Cli, Command, TrainAction};
use hyclass::config::{HyclassConfig, load_config};
use hyclass::fusion::{FusionConfig, HybridClassifier};
use hyclass::training::{default_training_path, load_training, save_training};
use hyclass::{batch, remote};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

/// Apply CLI overrides on top of the loaded config.
fn resolve(config: &HyclassConfig, overrides: &ClassifierOverrides) -> Result<(String, FusionConfig), HyclassError> {
    let mut fusion = FusionConfig::from(&config.classifier);
    if let Some(t) = overrides.threshold {
        if !(0.0..=1.0).contains(&t) {
            return Err(HyclassError::Config(format!("--threshold {t} outside [0, 1]")));
        }
        fusion.confidence_threshold = t;
    }
    if overrides.no_hybrid {
        fusion.use_hybrid = false;
    }
    let categories = overrides
        .categories
        .clone()
        .unwrap_or_else(|| config.classifier.categories.clone());
    Ok((categories, fusion))
}

fn print_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), HyclassError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    if let Some(path) = output {
        std::fs::write(path, json + "\n")?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_classify(config: &HyclassConfig, training_path: &Path, args: &ClassifyArgs) -> Result<ExitCode, HyclassError> {
    if args.text.trim().is_empty() {
        return Err(HyclassError::Config("nothing to classify".into()));
    }
    let (categories, fusion) = resolve(config, &args.overrides)?;
    let training = load_training(training_path)?;
    let classifier = HybridClassifier::new(remote::from_config(&config.remote), fusion);

    let outcome = classifier.classify_request(&args.text, &categories, &training);
    print_json(&outcome, args.output.as_deref())?;
    Ok(if outcome.is_failed() { ExitCode::from(1) } else { ExitCode::SUCCESS })
}

fn handle_batch(config: &HyclassConfig, args: &BatchArgs) -> Result<ExitCode, HyclassError> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let texts = batch::split_lines(&input);
    if texts.is_empty() {
        return Err(HyclassError::Config("no texts to classify".into()));
    }

    let (categories, fusion) = resolve(config, &args.overrides)?;
    let categories = CategoryList::parse(&categories)?;
    let classifier = HybridClassifier::new(remote::from_config(&config.remote), fusion);

    let report = classifier.classify_batch(&texts[..], &categories);
    print_json(&report, args.output.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

fn handle_train(training_path: &Path, action: &TrainAction) -> Result<ExitCode, HyclassError> {
    let mut training = load_training(training_path)?;
    match action {
        TrainAction::Add { text, category } => {
            let label = training.add(text, category)?.category.clone();
            println!("Added example #{} [{label}]", training.len() - 1);
            save_training(training_path, &training)?;
        }
        TrainAction::Remove { index } => {
            let removed = training.remove(*index)?;
            println!("Removed example #{index} [{}]: {}", removed.category, removed.text);
            save_training(training_path, &training)?;
        }
        TrainAction::List => {
            if training.is_empty() {
                println!("No training examples.");
            }
            for (i, ex) in training.examples().iter().enumerate() {
                println!("{i}\t{}\t{}", ex.category, ex.text);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run() -> Result<ExitCode, HyclassError> {
    let cli = Cli::parse();
    let training_path = cli.training.unwrap_or_else(default_training_path);

    match &cli.command {
        Command::Classify(args) => handle_classify(&load_config()?, &training_path, args),
        Command::Batch(args) => handle_batch(&load_config()?, args),
        Command::Train { action } => handle_train(&training_path, action),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("hyclass: {e}");
            ExitCode::from(1)
        }
    }
}
