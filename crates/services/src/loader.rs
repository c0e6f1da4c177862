//! Builds a randomly ordered `ProblemSet` from CSV rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use quiz_core::model::{Problem, ProblemSet};

use crate::error::LoadError;

/// Load problems from the CSV file at `path`.
///
/// Each row needs at least two fields: the question, then the expected answer.
/// Extra fields are ignored. Rows are shuffled with `rng`.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be opened, the CSV cannot be parsed,
/// or any row has fewer than two fields. Nothing is returned on partial success.
pub fn load_problems<R>(path: &Path, rng: &mut R) -> Result<ProblemSet, LoadError>
where
    R: Rng + ?Sized,
{
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let problems = load_problems_from_reader(file, path, rng)?;
    debug!(path = %path.display(), count = problems.len(), "problem set loaded");
    Ok(problems)
}

/// Same as [`load_problems`] for an already open reader.
///
/// `source_path` only labels errors.
///
/// # Errors
///
/// Returns `LoadError::Parse` or `LoadError::MalformedRow`.
pub fn load_problems_from_reader<Rd, R>(
    reader: Rd,
    source_path: &Path,
    rng: &mut R,
) -> Result<ProblemSet, LoadError>
where
    Rd: Read,
    R: Rng + ?Sized,
{
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv.records().enumerate() {
        let record = record.map_err(|source| LoadError::Parse {
            path: source_path.to_path_buf(),
            source,
        })?;
        match (record.get(0), record.get(1)) {
            (Some(question), Some(answer)) => rows.push(Problem::new(question, answer)),
            _ => {
                return Err(LoadError::MalformedRow {
                    path: source_path.to_path_buf(),
                    row: index + 1,
                    fields: record.len(),
                });
            }
        }
    }

    Ok(shuffle_rows(rows, rng))
}

/// A uniformly random permutation of `0..n`.
pub fn permutation<R>(n: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Place row `i` at position `order[i]`.
fn shuffle_rows<R>(rows: Vec<Problem>, rng: &mut R) -> ProblemSet
where
    R: Rng + ?Sized,
{
    let order = permutation(rows.len(), rng);
    let mut slots: Vec<Option<Problem>> = vec![None; rows.len()];
    for (problem, target) in rows.into_iter().zip(order) {
        slots[target] = Some(problem);
    }
    ProblemSet::new(slots.into_iter().flatten().collect())
}
