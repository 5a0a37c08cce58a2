use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use blockblast_evaluator::weights::HeuristicWeights;

/// Destination of a JSON result: stdout, or a file when a path was given.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>),
}

impl Output {
    /// Writes `value` as pretty JSON followed by a newline to `path`, or to
    /// stdout if `path` is `None`.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let (mut output, target) = match path {
            Some(path) => {
                let file = File::create(&path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                (Output::File(BufWriter::new(file)), path.display().to_string())
            }
            None => (Output::Stdout(io::stdout().lock()), "stdout".to_owned()),
        };

        serde_json::to_writer_pretty(&mut output, value)
            .with_context(|| format!("Failed to serialize JSON to {target}"))?;
        writeln!(output)
            .and_then(|()| output.flush())
            .with_context(|| format!("Failed to finish writing {target}"))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File(writer) => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads heuristic weights from `path`, or the defaults when no path is given.
pub fn load_weights(path: Option<&Path>) -> anyhow::Result<HeuristicWeights> {
    match path {
        Some(path) => read_json_file("weights", path),
        None => Ok(HeuristicWeights::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_saved_weights_load_back() {
        let path = env::temp_dir().join(format!("blockblast-weights-{}.json", process::id()));
        let weights = HeuristicWeights {
            clumping: 2.5,
            ..HeuristicWeights::default()
        };
        Output::save_json(&weights, Some(path.clone())).unwrap();
        let loaded = load_weights(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, weights);
    }

    #[test]
    fn test_missing_weights_file_names_path() {
        let path = env::temp_dir().join("blockblast-no-such-weights.json");
        let err = load_weights(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("blockblast-no-such-weights.json"));
    }
}
