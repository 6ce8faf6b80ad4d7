use anyhow::Context;
use clap::Parser;
use org_tufte_exporter::{
    decorate, render_annotation, render_footnote, strip_paragraph_tags, AnnotationRequest,
    BlockKind, ConfigOverrides, FootnoteOccurrence, IdSource, RandomIds, TufteConfig,
};

use crate::cli::{CaptionKind, Cli, Command};
use crate::types::CliError;
use crate::utils::{arg_or_stdin, file_or_stdin, load_config, write_output};

mod cli;
mod logging;
mod types;
mod utils;

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

impl From<CaptionKind> for BlockKind {
    fn from(value: CaptionKind) -> Self {
        match value {
            CaptionKind::Quote => BlockKind::Quote,
            CaptionKind::Verse => BlockKind::Verse,
            CaptionKind::Figure => BlockKind::Figure,
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // flags passed on the command line win over the config file
    let conf = load_config(cli.config.as_deref())?.scoped(&ConfigOverrides {
        symbol_glyph: cli.glyph.clone(),
        id_limit: cli.id_limit,
        ..Default::default()
    });
    conf.validate().context("invalid configuration")?;

    let mut ids = match cli.seed {
        Some(seed) => RandomIds::seeded(seed),
        None => RandomIds::new(),
    };

    let rendered = render(&cli.command, &conf, &mut ids)?;
    write_output(cli.output.as_deref(), &rendered)
        .with_context(|| "failed to write rendered HTML")?;
    Ok(())
}

fn render<S: IdSource>(command: &Command, conf: &TufteConfig, ids: &mut S) -> Result<String, CliError> {
    let out = match command {
        Command::Marginnote { text, tag } => {
            let text = arg_or_stdin(text.as_deref())?;
            let req = AnnotationRequest::text(text.trim_end(), tag.as_deref());
            render_annotation(&req, conf, ids)
        }
        Command::Sidenote {
            number,
            repeat,
            after_footnote,
            definition,
        } => {
            let definition = arg_or_stdin(definition.as_deref())?;
            let nonce = ids.next_id(conf.id_limit).to_string();
            render_footnote(
                &FootnoteOccurrence {
                    number: *number,
                    first_reference: !repeat,
                    nonce: &nonce,
                    definition_html: &definition,
                },
                *after_footnote,
                conf,
            )
        }
        Command::Caption {
            kind,
            caption,
            file,
        } => {
            let html = file_or_stdin(file.as_deref())?;
            decorate((*kind).into(), &html, strip_paragraph_tags(caption).trim())
        }
        Command::Strip { file } => strip_paragraph_tags(&file_or_stdin(file.as_deref())?).into_owned(),
    };
    Ok(out)
}
