use std::borrow::Cow;
use std::fs::{read_to_string, File};
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::Path;

use org_tufte_exporter::TufteConfig;
use tracing::debug;

use crate::types::CliError;

/// Reads a config file, or hands back the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<TufteConfig, CliError> {
    let Some(path) = path else {
        return Ok(TufteConfig::default());
    };
    let contents = read_to_string(path).map_err(|e| CliError::from(e).with_path(path))?;
    let conf = toml::from_str(&contents).map_err(|e| CliError::from(e).with_path(path))?;
    debug!(path = %path.display(), "loaded config");
    Ok(conf)
}

/// Uses the argument when given, otherwise all of stdin.
pub fn arg_or_stdin(arg: Option<&str>) -> Result<Cow<'_, str>, CliError> {
    match arg {
        Some(s) => Ok(s.into()),
        None => {
            let mut buf = String::new();
            stdin().lock().read_to_string(&mut buf)?;
            Ok(buf.into())
        }
    }
}

/// Reads the file when given, otherwise all of stdin.
pub fn file_or_stdin(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => read_to_string(path).map_err(|e| CliError::from(e).with_path(path)),
        None => Ok(arg_or_stdin(None)?.into_owned()),
    }
}

pub fn write_output(path: Option<&Path>, contents: &str) -> Result<(), CliError> {
    let mut out: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| CliError::from(e).with_path(path))?,
        )),
        None => Box::new(BufWriter::new(stdout().lock())),
    };
    out.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
