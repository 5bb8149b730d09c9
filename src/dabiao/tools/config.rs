use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dabiao::tools::error::{Result, ToolError};

/// Body row (after header promotion) where data rows start. The rows before
/// it carry the decorative banner and auxiliary header lines.
pub const DEFAULT_DATA_OFFSET: usize = 3;
/// Text placed between an item label and its quantity.
pub const DEFAULT_SEPARATOR: &str = "*";

/// Describes where data lives in an order sheet and how item cells are
/// rendered into product descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub data_offset: usize,
    pub separator: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            data_offset: DEFAULT_DATA_OFFSET,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Parses the postage fee as typed by the user. Blank input means no postage.
pub fn parse_postage(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ToolError::InputValidation(format!("postage fee must be a number, got '{trimmed}'")))
}

fn validate_series_name(series_name: &str) -> Result<()> {
    if series_name.trim().is_empty() {
        return Err(ToolError::InputValidation(
            "a series name is required".to_string(),
        ));
    }
    Ok(())
}

/// Parameters for turning one order sheet into a billing sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleJob {
    pub input: PathBuf,
    pub series_name: String,
    /// Item suffix appended to item column labels and to the title.
    pub suffix: String,
    pub postage: Decimal,
    pub output_dir: PathBuf,
    pub layout: SheetLayout,
}

impl SingleJob {
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(ToolError::InputValidation(
                "an input file is required".to_string(),
            ));
        }
        validate_series_name(&self.series_name)
    }

    /// `{series_name}{suffix}.xlsx` inside the output directory.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.xlsx", self.series_name.trim(), self.suffix))
    }
}

/// Parameters for merging several order sheets into one billing sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeJob {
    pub inputs: Vec<PathBuf>,
    pub series_name: String,
    pub postage: Decimal,
    pub output_dir: PathBuf,
    pub layout: SheetLayout,
}

impl MergeJob {
    pub fn validate(&self) -> Result<()> {
        if self
            .inputs
            .iter()
            .all(|input| input.as_os_str().is_empty())
        {
            return Err(ToolError::InputValidation(
                "at least one input file is required".to_string(),
            ));
        }
        validate_series_name(&self.series_name)
    }

    /// `{series_name}.xlsx` inside the output directory.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.xlsx", self.series_name.trim()))
    }
}

/// Either kind of job, as produced from a job file.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Single(SingleJob),
    Merge(MergeJob),
}

/// Postage as written in a job file: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PostageInput {
    Number(serde_json::Number),
    Text(String),
}

impl Default for PostageInput {
    fn default() -> Self {
        PostageInput::Text(String::new())
    }
}

impl PostageInput {
    pub fn parse(&self) -> Result<Decimal> {
        match self {
            PostageInput::Number(number) => parse_postage(&number.to_string()),
            PostageInput::Text(text) => parse_postage(text),
        }
    }
}

/// JSON job description, tagged by `mode`.
///
/// ```json
/// { "mode": "merge", "inputs": ["a.xlsx", "b.xlsx"], "series_name": "Spring", "postage": 12 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum JobFile {
    Single {
        input: PathBuf,
        series_name: String,
        #[serde(default)]
        suffix: String,
        #[serde(default)]
        postage: PostageInput,
        #[serde(default)]
        output_dir: Option<PathBuf>,
        #[serde(default)]
        layout: SheetLayout,
    },
    Merge {
        inputs: Vec<PathBuf>,
        series_name: String,
        #[serde(default)]
        postage: PostageInput,
        #[serde(default)]
        output_dir: Option<PathBuf>,
        #[serde(default)]
        layout: SheetLayout,
    },
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Validates the parameters and converts them into a runnable job.
    pub fn into_job(self) -> Result<Job> {
        let job = match self {
            JobFile::Single {
                input,
                series_name,
                suffix,
                postage,
                output_dir,
                layout,
            } => Job::Single(SingleJob {
                input,
                series_name: series_name.trim().to_string(),
                suffix,
                postage: postage.parse()?,
                output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
                layout,
            }),
            JobFile::Merge {
                inputs,
                series_name,
                postage,
                output_dir,
                layout,
            } => Job::Merge(MergeJob {
                inputs,
                series_name: series_name.trim().to_string(),
                postage: postage.parse()?,
                output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
                layout,
            }),
        };

        match &job {
            Job::Single(single) => single.validate()?,
            Job::Merge(merge) => merge.validate()?,
        }
        Ok(job)
    }
}
