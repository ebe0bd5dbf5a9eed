use serde::{Deserialize, Serialize};

use nsviz_error::{Error, Result};

use crate::adt::Adt;

/// The analysis of one source file: every type it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default)]
    adts: Vec<Adt>,
}

impl Analysis {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            adts: Vec::new(),
        }
    }

    /// An analysis that is not tied to a file, e.g. built in memory.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn adts(&self) -> &[Adt] {
        &self.adts
    }

    pub fn adts_mut(&mut self) -> &mut [Adt] {
        &mut self.adts
    }

    pub fn add_adt(&mut self, adt: Adt) {
        self.adts.push(adt);
    }

    pub fn with_adt(mut self, adt: Adt) -> Self {
        self.adts.push(adt);
        self
    }
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    analyses: Vec<Analysis>,
}

/// Insertion-ordered set of file analyses.
///
/// Attaching an analysis for a file that is already present replaces it in
/// place; anonymous analyses are always appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCollection")]
pub struct AnalysisCollection {
    analyses: Vec<Analysis>,
}

impl From<RawCollection> for AnalysisCollection {
    fn from(raw: RawCollection) -> Self {
        let mut collection = AnalysisCollection::new();
        for analysis in raw.analyses {
            collection.attach(analysis);
        }
        collection
    }
}

impl AnalysisCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a collection from its JSON form:
    /// `{"analyses": [{"file": "...", "adts": [...]}]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            Error::deserialization_failed(err.to_string())
                .with_operation("analysis::from_json_str")
                .with_context("line", err.line().to_string())
                .set_source(err)
        })
    }

    /// Attach an analysis. Returns true when it replaced one for the same file.
    pub fn attach(&mut self, analysis: Analysis) -> bool {
        let position = analysis.file().and_then(|file| {
            self.analyses
                .iter()
                .position(|existing| existing.file() == Some(file))
        });
        if let Some(index) = position {
            self.analyses[index] = analysis;
            return true;
        }
        self.analyses.push(analysis);
        false
    }

    pub fn analyses(&self) -> &[Analysis] {
        &self.analyses
    }

    pub fn analyses_mut(&mut self) -> &mut [Analysis] {
        &mut self.analyses
    }

    /// Every record, flattened across analyses in insertion order.
    pub fn adts(&self) -> impl Iterator<Item = &Adt> {
        self.analyses.iter().flat_map(|analysis| analysis.adts())
    }

    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }
}
