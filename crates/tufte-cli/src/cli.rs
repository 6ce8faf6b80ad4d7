use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

#[derive(Parser)]
#[command(name = "org-tufte")]
#[command(author = "Laith Bahodi <laithbahodi@gmail.com>")]
#[command(about = "Tufte-CSS sidenotes, margin notes and captions for exported HTML")]
#[command(author, version, about, long_about=None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// toggle glyph, overrides the config file
    #[arg(long, global = true)]
    pub glyph: Option<String>,

    /// exclusive upper bound for generated ids, overrides the config file
    #[arg(long, global = true)]
    pub id_limit: Option<u64>,

    /// seed for reproducible ids
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// output file path
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a margin note, reading TEXT from stdin when omitted
    Marginnote {
        text: Option<String>,

        /// placement tag used in the toggle id
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Render a footnote as a numbered sidenote, reading DEFINITION from stdin when omitted
    Sidenote {
        /// footnote sequence number
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        number: u32,

        /// not the first reference to this footnote
        #[arg(long)]
        repeat: bool,

        /// follows another footnote reference directly
        #[arg(long)]
        after_footnote: bool,

        definition: Option<String>,
    },
    /// Attach a caption to an exported block, reading FILE from stdin when omitted
    Caption {
        #[arg(short, long, value_enum)]
        kind: CaptionKind,

        #[arg(short = 't', long)]
        caption: String,

        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// Remove paragraph tags from an HTML fragment
    Strip {
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CaptionKind {
    Quote,
    Verse,
    Figure,
}
