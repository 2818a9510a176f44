use super::UploadArgs;
use crate::config::AppConfig;
use crate::presentation::format::{caption_usage, format_file_size, CaptionUsage};
use crate::presentation::{browser, ConsoleSink};
use crate::transport::HttpTransport;
use crate::upload::{SubmissionOutcome, SystemClock, TargetMode, UploadRequest, UploadWorkflow, VideoFile};
use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::sync::Arc;

pub fn build_request(args: &UploadArgs) -> Result<UploadRequest> {
    let file = VideoFile::from_path(&args.file)?;
    let mode = if args.draft {
        TargetMode::Draft
    } else {
        TargetMode::Publish
    };

    let mut request = UploadRequest::new(file, mode)
        .caption(args.caption.clone())
        .privacy(args.privacy)
        .consent(args.consent);
    request.disable_comment = args.disable_comment;
    request.disable_duet = args.disable_duet;
    request.disable_stitch = args.disable_stitch;
    Ok(request)
}

/// File and caption summary shown before anything is sent.
pub fn describe_request(request: &UploadRequest, max_caption_chars: usize) -> String {
    let mut lines = Vec::new();
    if let Some(file) = &request.file {
        lines.push(format!("ファイル名: {}", file.name));
        lines.push(format!("サイズ: {}", format_file_size(file.size_bytes)));
        lines.push(format!("形式: {}", file.mime_type));
    }

    let length = request.caption.chars().count();
    let marker = match caption_usage(length, max_caption_chars) {
        CaptionUsage::Normal => "",
        CaptionUsage::Warning => " (残りわずか)",
        CaptionUsage::Critical => " (上限間近)",
    };
    lines.push(format!("キャプション: {} / {}{}", length, max_caption_chars, marker));
    lines.push(format!("投稿方法: {}", request.target_mode.label()));
    lines.join("\n")
}

/// Validate only; no network access.
pub fn check(config: &AppConfig, args: &UploadArgs) -> Result<()> {
    let request = build_request(args)?;
    println!("{}", describe_request(&request, config.upload.max_caption_chars));

    match crate::upload::validation::validate(&request, &config.upload) {
        Ok(()) => {
            println!("✅ アップロード可能です。");
            Ok(())
        }
        Err(err) => {
            println!("⚠ {}", err);
            bail!("Validation failed: {}", err.kind())
        }
    }
}

pub async fn upload(config: &AppConfig, args: &UploadArgs) -> Result<()> {
    let request = build_request(args)?;
    println!("{}", describe_request(&request, config.upload.max_caption_chars));

    let transport = HttpTransport::new(&config.base_url, config.request_timeout())
        .context("Failed to create upload transport")?;
    let workflow = UploadWorkflow::new(
        config.upload.clone(),
        Arc::new(transport),
        Arc::new(ConsoleSink::stdout()),
        Arc::new(SystemClock),
    );

    info!("Uploading {} to {}", args.file.display(), config.base_url);
    let outcome = match workflow.submit(&request).await {
        Ok(outcome) => outcome,
        Err(rejection) => bail!("Upload rejected: {}", rejection.kind()),
    };

    match outcome {
        SubmissionOutcome::Success { profile_link, .. } => {
            if let (true, Some(link)) = (args.open_profile, profile_link) {
                if let Err(e) = browser::open_link(&link) {
                    warn!("Failed to open profile {}: {}", link, e);
                }
            }
            Ok(())
        }
        SubmissionOutcome::Failure { kind, .. } => bail!("Upload failed: {}", kind),
    }
}
