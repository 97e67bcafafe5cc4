pub mod align;
pub mod boxplot;
pub mod identity;
pub mod motif_map;
