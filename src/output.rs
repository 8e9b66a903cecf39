use std::io::{self, Write};

use serde::Serialize;

use crate::domain::Sample;
use crate::report::AmrSummary;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_sample(sample: &Sample) -> io::Result<()> {
        Self::print_json(sample)
    }

    pub fn print_samples(samples: &[Sample]) -> io::Result<()> {
        Self::print_json(&samples)
    }

    pub fn print_summary(summary: &AmrSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
