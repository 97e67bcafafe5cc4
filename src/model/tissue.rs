pub const UNASSIGNED_LABEL: &str = "Unassigned";
pub const UNGROUPED_LABEL: &str = "NA";

/// Parsed tissue map: one entry per input line, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TissueMap {
    pub entries: Vec<(String, Vec<String>)>,
}

impl TissueMap {
    pub fn tissue_of(&self, sample: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, samples)| samples.iter().any(|s| s == sample))
            .map(|(tissue, _)| tissue.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TissueGroup {
    pub label: String,
    pub samples: Vec<String>,
}

/// Sample-to-group assignment over the columns of one expression table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TissueAssignment {
    pub groups: Vec<TissueGroup>,
}

impl TissueAssignment {
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    pub fn n_samples(&self) -> usize {
        self.groups.iter().map(|g| g.samples.len()).sum()
    }
}
