use crate::pipeline::motif_map::MotifLayout;
use crate::report::format_f64_6;

pub fn render_coordinates_tsv(layout: &MotifLayout) -> String {
    let mut out = String::new();
    out.push_str(
        "gene\tmotif_id\tmotif_name\tposition\tstrand\tbinding_sequence\tscore\ttf_family\ttf_id\t\
promoter_length\tnormalized\tshared_axis\tout_of_range\n",
    );
    for track in &layout.tracks {
        for laid in &track.hits {
            let hit = &laid.mapped.hit;
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                track.gene_id,
                hit.motif_id,
                hit.display_name,
                hit.position,
                hit.strand,
                hit.matched_sequence,
                format_f64_6(hit.score),
                hit.tf_family,
                hit.tf_id,
                track.length,
                format_f64_6(laid.mapped.normalized),
                format_f64_6(laid.axis),
                laid.mapped.out_of_range,
            ));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/coordinates.rs"]
mod tests;
