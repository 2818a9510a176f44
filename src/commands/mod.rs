pub mod config;
pub mod upload;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::upload::PrivacyLevel;

#[derive(Debug, Parser)]
#[command(name = "tiktok-uploader", version, about = "Upload videos through the TikTok account dashboard")]
pub struct Cli {
    /// Config file (defaults to ~/.tiktok-uploader/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dashboard backend URL, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a video, publishing it directly or saving it as a draft
    Upload(UploadArgs),
    /// Validate a video and its settings without uploading
    Check(UploadArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Video file (mp4, avi, mov, wmv)
    pub file: PathBuf,

    #[arg(long, default_value = "")]
    pub caption: String,

    /// SELF_ONLY, PUBLIC_TO_EVERYONE, MUTUAL_FOLLOW_FRIENDS or FOLLOWER_OF_CREATOR
    #[arg(long, default_value = "SELF_ONLY")]
    pub privacy: PrivacyLevel,

    /// Confirm TikTok's music usage terms
    #[arg(long)]
    pub consent: bool,

    /// Save to TikTok drafts instead of publishing
    #[arg(long)]
    pub draft: bool,

    #[arg(long)]
    pub disable_comment: bool,

    #[arg(long)]
    pub disable_duet: bool,

    #[arg(long)]
    pub disable_stitch: bool,

    /// Open the profile page in the browser after a successful upload
    #[arg(long)]
    pub open_profile: bool,
}
