//! Knowledge Verificator command-line entrypoint.
//!
//! Reads `{"question": {...}, "answer": "..."}` JSON on stdin and prints the feedback
//! as JSON. With `--evaluate <path>` it runs a labelled evaluation set instead and
//! prints the per-metric CSV.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use serde::Deserialize;

use verificator::config::Config;
use verificator::embedding::{EmbeddingProvider, HashingEmbedder, HttpEmbedder, HttpEmbedderConfig};
use verificator::engine::Verifier;
use verificator::evaluation::{EvaluationSet, evaluate};
use verificator::normalize::Normalizer;
use verificator::question::Question;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    question: Question,
    answer: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let evaluation_path = evaluation_path(std::env::args().skip(1))?;

    if HttpEmbedderConfig::is_configured() {
        let http_config = HttpEmbedderConfig::from_env(config.embedding_dim)?;
        tracing::info!(endpoint = %http_config.endpoint(), model = %http_config.model, "Using HTTP embedding provider");
        let provider = HttpEmbedder::new(http_config)?;
        run(config, provider, evaluation_path).await
    } else {
        tracing::info!("No VERIFICATOR_EMBEDDING_URL configured, using hashing embedder");
        let provider = HashingEmbedder::new(config.embedding_dim)
            .with_normalizer(Normalizer::new(config.language));
        run(config, provider, evaluation_path).await
    }
}

async fn run<P: EmbeddingProvider>(
    config: Config,
    provider: P,
    evaluation_path: Option<String>,
) -> anyhow::Result<()> {
    let verifier = Verifier::from_config(config, Arc::new(provider))?;

    if let Some(path) = evaluation_path {
        let set = EvaluationSet::from_path(&path)?;
        let report = evaluate(&verifier, &set).await?;
        print!("{}", report.to_csv());
        return Ok(());
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request: VerifyRequest =
        serde_json::from_str(&input).context("stdin is not a valid verification request")?;

    let feedback = verifier.verify(&request.question, &request.answer).await?;
    println!("{}", serde_json::to_string_pretty(&feedback)?);

    Ok(())
}

/// Path following `--evaluate`, if the flag is present.
fn evaluation_path(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<String>> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--evaluate" {
            return match args.next() {
                Some(path) if !path.starts_with("--") => Ok(Some(path)),
                _ => bail!("--evaluate requires a path to an evaluation set"),
            };
        }
    }
    Ok(None)
}
