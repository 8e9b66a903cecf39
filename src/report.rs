use std::fs::File;
use std::io::{BufRead, BufReader, Lines};

use camino::Utf8Path;
use serde::Serialize;

use crate::error::ReportError;

pub const SUMMARY_COLUMNS: usize = 11;

const QUALITY_MODULE_INDEX: usize = 1;
const GENOTYPE_INDEX: usize = 2;
const DRUG_CLASS_INDEX: usize = 3;
const PLASMID_INDEX: usize = 4;
const SCHEME_INDEX: usize = 5;
const SEQUENCE_TYPE_INDEX: usize = 6;
const GENOME_LENGTH_INDEX: usize = 7;
const N50_INDEX: usize = 8;
const NUM_CONTIGS_INDEX: usize = 9;
const QUALITY_MODULE_FEEDBACK_INDEX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmrSummary {
    pub genotype: String,
    pub drug_class: String,
    pub quality_module: String,
    pub plasmid: String,
    pub scheme: String,
    pub sequence_type: String,
    pub genome_length: String,
    pub n50: String,
    pub num_contigs: String,
    pub quality_module_feedback: String,
}

pub fn read_summary(path: &Utf8Path) -> Result<AmrSummary, ReportError> {
    let file = File::open(path.as_std_path()).map_err(|err| ReportError::Io {
        path: path.to_owned(),
        source: err,
    })?;
    let mut lines = BufReader::new(file).lines();

    let header = next_line(&mut lines, path)?.ok_or_else(|| ReportError::MissingHeader {
        path: path.to_owned(),
    })?;
    check_columns(&header, path)?;

    let row = next_line(&mut lines, path)?.ok_or_else(|| ReportError::MissingDataRow {
        path: path.to_owned(),
    })?;
    let fields = check_columns(&row, path)?;

    if next_line(&mut lines, path)?.is_some() {
        return Err(ReportError::MultipleRows {
            path: path.to_owned(),
        });
    }

    Ok(AmrSummary {
        genotype: fields[GENOTYPE_INDEX].to_string(),
        drug_class: fields[DRUG_CLASS_INDEX].to_string(),
        quality_module: fields[QUALITY_MODULE_INDEX].to_string(),
        plasmid: fields[PLASMID_INDEX].to_string(),
        scheme: fields[SCHEME_INDEX].to_string(),
        sequence_type: fields[SEQUENCE_TYPE_INDEX].to_string(),
        genome_length: fields[GENOME_LENGTH_INDEX].to_string(),
        n50: fields[N50_INDEX].to_string(),
        num_contigs: fields[NUM_CONTIGS_INDEX].to_string(),
        quality_module_feedback: fields[QUALITY_MODULE_FEEDBACK_INDEX].to_string(),
    })
}

fn next_line(
    lines: &mut Lines<BufReader<File>>,
    path: &Utf8Path,
) -> Result<Option<String>, ReportError> {
    lines.next().transpose().map_err(|err| ReportError::Io {
        path: path.to_owned(),
        source: err,
    })
}

fn check_columns<'a>(line: &'a str, path: &Utf8Path) -> Result<Vec<&'a str>, ReportError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != SUMMARY_COLUMNS {
        return Err(ReportError::Columns {
            path: path.to_owned(),
            expected: SUMMARY_COLUMNS,
            found: fields.len(),
        });
    }
    Ok(fields)
}
