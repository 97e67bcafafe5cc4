/// Gene-by-sample TPM matrix. Every row holds exactly one value per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTable {
    pub gene_column: String,
    pub samples: Vec<String>,
    pub genes: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl ExpressionTable {
    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene_index(&self, gene: &str) -> Option<usize> {
        self.genes.iter().position(|g| g == gene)
    }

    pub fn value(&self, gene_idx: usize, sample_idx: usize) -> f64 {
        self.values[gene_idx][sample_idx]
    }
}
