use anyhow::Context;
use exocore::classifier_interface::{
    ClassificationRequest, FeatureName, FeatureVector, ModelSelection,
};
use exocore::BoundaryError;
use std::fs;
use std::path::Path;

/// Parses a batch upload: a header row naming all 25 parameters, then one
/// candidate per row.
///
/// Blank lines are skipped. With fewer than two non-blank lines the batch is
/// empty. Extra columns are ignored; empty or unparseable cells become
/// missing readings.
pub fn parse_batch(
    text: &str,
    selection: ModelSelection,
) -> anyhow::Result<Vec<ClassificationRequest>> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    let joined = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    let headers = reader.headers().context("reading CSV header")?.clone();
    let mut columns = Vec::with_capacity(FeatureName::ALL.len());
    let mut missing = Vec::new();
    for name in FeatureName::ALL {
        match headers.iter().position(|header| header == name.as_str()) {
            Some(index) => columns.push((name, index)),
            None => missing.push(name.as_str().to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(BoundaryError::MissingColumns(missing).into());
    }

    let mut requests = Vec::with_capacity(lines.len() - 1);
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading CSV row {}", row + 1))?;
        let mut features = FeatureVector::new();
        for &(name, index) in &columns {
            features.set_text(name, record.get(index).unwrap_or(""));
        }
        requests.push(ClassificationRequest::new(features, selection));
    }
    Ok(requests)
}

pub fn load_batch<P: AsRef<Path>>(
    path: P,
    selection: ModelSelection,
) -> anyhow::Result<Vec<ClassificationRequest>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading CSV batch {}", path_ref.display()))?;
    parse_batch(&contents, selection)
        .with_context(|| format!("parsing CSV batch {}", path_ref.display()))
}
