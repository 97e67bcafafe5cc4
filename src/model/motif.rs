use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn parse(raw: &str) -> Option<Strand> {
        match raw.trim() {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => f.write_str("+"),
            Strand::Reverse => f.write_str("-"),
        }
    }
}

/// One row of a PlantPAN promoter scan.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifHit {
    pub gene_id: String,
    pub motif_id: String,
    pub display_name: String,
    pub position: u32,
    pub strand: Strand,
    pub matched_sequence: String,
    pub score: f64,
    pub tf_family: String,
    pub tf_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromoterTrack {
    pub gene_id: String,
    pub length: u32,
    pub hits: Vec<MotifHit>,
}

impl PromoterTrack {
    pub fn max_position(&self) -> u32 {
        self.hits.iter().map(|h| h.position).max().unwrap_or(0)
    }
}
