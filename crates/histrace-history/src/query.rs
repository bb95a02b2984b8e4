use crate::classifier::classifier_for;
use crate::correlator::TraceCorrelator;
use crate::keeper::Keeper;
use crate::parser::HistoryParser;
use crate::{Error, Result};
use histrace_core::Environment;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, ErrorKind};

/// Parse the configured history file into `keeper`, flagging entries that
/// already have a stored trace.
///
/// Fails before opening anything when the environment has no shell or
/// history file.
pub fn get_commands<K: Keeper>(env: &Environment, filter: Option<&Regex>, keeper: K) -> Result<K::Output> {
    env.ensure_ready()?;
    let dialect = env.shell()?;
    let path = env.hist_file()?;

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(Error::Core(histrace_core::Error::NotReady(format!(
                "history file {} does not exist",
                path.display()
            ))));
        }
        Err(err) => return Err(err.into()),
    };
    tracing::debug!(path = %path.display(), dialect = %dialect, "reading history");

    let classifier = classifier_for(dialect);
    let correlator = TraceCorrelator::spawn(env.traces_dir())?;
    let result = HistoryParser::new(classifier.as_ref(), filter).parse(
        BufReader::new(file),
        keeper,
        correlator.sink(),
    );
    let marked = correlator.finish();
    tracing::debug!(marked, "trace correlation finished");

    result
}

/// `abc` becomes `.*?a.*?b.*?c.*?`, every character escaped.
pub fn fuzzy_pattern(query: &str) -> String {
    let mut pattern = String::from(".*?");
    for c in query.chars() {
        pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        pattern.push_str(".*?");
    }
    pattern
}

/// Compile the `show -g` filter, optionally turning it into a fuzzy pattern first.
pub fn build_filter(pattern: Option<&str>, fuzzy: bool) -> Result<Option<Regex>> {
    let Some(pattern) = pattern else {
        return Ok(None);
    };
    let source = if fuzzy {
        fuzzy_pattern(pattern)
    } else {
        pattern.to_string()
    };
    Ok(Some(Regex::new(&source)?))
}
