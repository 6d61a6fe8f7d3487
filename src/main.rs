//! Atelier CLI binary entry point.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier::cli::{Cli, Commands, ImageArgs, SheetArgs, VideoArgs};
use atelier::config::AtelierConfig;
use atelier::error::AtelierError;
use atelier::generation::Orchestrator;
use atelier::history::{FileHistory, HistoryRecorder};
use atelier::session::{SessionContext, SessionManager, UserIdentity};
use atelier::sheet::{Sheet, SheetRunner};
use atelier::types::GenerationRequest;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AtelierError> {
    let config = AtelierConfig::load(cli.config.as_deref())?;

    let sessions = SessionManager::new();
    if let Some(user) = cli.user {
        sessions.sign_in(UserIdentity::new(user));
    }
    let session = sessions.current();

    match cli.command {
        Commands::Image(args) => handle_image(&config, &session, args).await,
        Commands::Video(args) => handle_video(&config, &session, args).await,
        Commands::Sheet(args) => handle_sheet(&config, &session, args).await,
        Commands::History => handle_history(&config, &session).await,
    }
}

async fn handle_image(
    config: &AtelierConfig,
    session: &SessionContext,
    args: ImageArgs,
) -> Result<(), AtelierError> {
    let orchestrator = Orchestrator::from_config(config)?;
    let request = GenerationRequest::builder()
        .prompt(args.prompt)
        .maybe_overlay(args.overlay)
        .variation_count(args.count)
        .build();

    let result = orchestrator.generate_image_batch(session, &request).await;
    orchestrator.history().flush().await;
    let images = result?;
    for (i, image) in images.iter().enumerate() {
        match (&args.out_dir, image.locator.decode_data()) {
            (Some(dir), Some((mime, bytes))) => {
                let path = dir.join(format!("image-{}.{}", i + 1, extension_for(&mime)));
                write_file(&path, &bytes).await?;
                println!("{}  {}", path.display(), image.caption);
            }
            _ => println!("[{}] {}", i + 1, image.caption),
        }
    }
    Ok(())
}

async fn handle_video(
    config: &AtelierConfig,
    session: &SessionContext,
    args: VideoArgs,
) -> Result<(), AtelierError> {
    let orchestrator = Orchestrator::from_config(config)?;
    let request = GenerationRequest::builder()
        .prompt(args.prompt)
        .maybe_music_hint(args.music)
        .build();

    let result = orchestrator
        .generate_video_with_progress(session, &request, |message| {
            eprintln!("… {message}");
        })
        .await;
    orchestrator.history().flush().await;
    let video = result?;

    let blob = orchestrator.blobs().get(&video.locator).ok_or_else(|| {
        AtelierError::InvalidArgument(format!("Unknown locator {}", video.locator))
    })?;
    write_file(&args.out, &blob.bytes).await?;
    orchestrator.blobs().revoke(&video.locator);

    println!("{}", args.out.display());
    println!("{}", video.caption);
    Ok(())
}

async fn handle_sheet(
    config: &AtelierConfig,
    session: &SessionContext,
    args: SheetArgs,
) -> Result<(), AtelierError> {
    let sheet = Sheet::load(&args.path)?;
    let orchestrator = Orchestrator::from_config(config)?;
    let runner = SheetRunner::new(orchestrator.clone());

    let run = runner
        .run(session, &sheet, |outcome| match &outcome.result {
            Ok(images) => println!("✅ row {}: {} image(s)", outcome.index + 1, images.len()),
            Err(e) => println!("❌ row {}: {e}", outcome.index + 1),
        })
        .await;
    orchestrator.history().flush().await;

    println!(
        "{}: {} succeeded, {} failed",
        run.name,
        run.succeeded(),
        run.failed()
    );
    Ok(())
}

async fn handle_history(config: &AtelierConfig, session: &SessionContext) -> Result<(), AtelierError> {
    let user = session.user_id().ok_or_else(|| {
        AtelierError::InvalidArgument("History needs a signed-in user (--user)".into())
    })?;
    let history = FileHistory::new(&config.history_dir);
    let entries = history.list(user).await?;
    let mut stdout = std::io::stdout().lock();
    for entry in entries {
        writeln!(
            stdout,
            "{}  {:<5}  {}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.kind,
            entry.prompt,
            entry.caption
        )?;
    }
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AtelierError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}
