//! # H.264 Batch Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Validazione degli input dell'utente
//! - Selezione dei file, avvio della conversione e presentazione del progresso
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (file/directory, output, qualità, etc.)
//! 2. Configura il logging (RUST_LOG, oppure INFO o DEBUG a seconda del flag verbose)
//! 3. Risolve ffmpeg e ffprobe una sola volta per tutto il processo
//! 4. Classifica i file: quelli già H.264 vengono segnalati e saltati
//! 5. Converte la coda in background e mostra progress bar o eventi JSON
//!
//! ## Esempio di utilizzo:
//! ```bash
//! h264-convert ~/Downloads/show/ clip.mkv --output ~/Videos --quality "High (Large File)"
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use h264_batch_converter::{
    file_manager::FileManager, quality::FALLBACK_CRF, Config, FfmpegTranscoder, FfprobeClassifier,
    ProgressTracker, QualityPreset, ResolvedTools, Session, TargetCodec, ToolLocator,
};

#[derive(Parser)]
#[command(name = "h264-convert")]
#[command(about = "Convert video files to H.264, skipping files that already are")]
struct Args {
    /// Video files or directories to convert
    paths: Vec<PathBuf>,

    /// Output directory for converted files (default: your Videos folder)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Quality preset label or alias (high, medium-high, medium, medium-low, low)
    #[arg(short, long, default_value = "Medium (Balanced)")]
    quality: String,

    /// Abort a single conversion after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output progress and status as JSON lines for programmatic use
    #[arg(long)]
    json: bool,

    /// List the quality presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Report where ffmpeg and ffprobe were found and exit
    #[arg(long)]
    check_tools: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if args.list_presets {
        for preset in QualityPreset::ALL {
            println!("{:<20} CRF {:<3} (alias: {})", preset.label(), preset.crf(), preset.alias());
        }
        return Ok(());
    }

    if args.check_tools {
        print!("{}", ToolLocator::new().tools_report());
        return Ok(());
    }

    let quality = QualityPreset::from_label(&args.quality).unwrap_or_else(|| {
        warn!("Unknown quality preset '{}', using CRF {}", args.quality, FALLBACK_CRF);
        QualityPreset::default()
    });

    let config = Config {
        output_dir: args.output.unwrap_or_else(Config::default_output_dir),
        quality,
        timeout_secs: args.timeout,
        json_output: args.json,
    };
    config.validate()?;

    let tools = ResolvedTools::global();
    info!("Using ffprobe: {}", tools.ffprobe.display());
    info!("Using ffmpeg: {}", tools.ffmpeg.display());

    let classifier = FfprobeClassifier::new(tools.ffprobe.clone(), &TargetCodec::H264);
    let transcoder = Arc::new(FfmpegTranscoder::new(tools.ffmpeg.clone(), config.timeout()));

    let mut tracker = ProgressTracker::new(config.json_output);
    let mut session = Session::new(config);

    let candidates = FileManager::expand_inputs(&args.paths);
    let outcome = session.add_files(candidates, &classifier).await;
    for event in Session::selection_events(&outcome) {
        tracker.handle(&event);
    }
    if !session.config().json_output {
        if let Some(notice) = tracker.already_target_notice() {
            println!("{}", notice);
        }
    }

    if session.queue().is_empty() {
        info!("No files to convert. Please add video files to convert");
        return Ok(());
    }

    let (handle, events) = session.start(transcoder)?;
    tracker.drive(events).await;
    let report = handle.await?;

    if report.failed() > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} files failed to convert",
            report.failed(),
            report.outcomes.len()
        ));
    }

    Ok(())
}
