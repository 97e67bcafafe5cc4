use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::motif::{MotifHit, PromoterTrack};

#[derive(Debug, Clone, PartialEq)]
pub struct MappedHit {
    /// `position / track.length`, clamped to `[0, 1]`.
    pub normalized: f64,
    pub hit: MotifHit,
    pub out_of_range: bool,
}

/// Groups hits into one track per gene, in first-seen gene order.
///
/// `declared_length` applies to every gene; without it a gene's length is its
/// furthest hit position. Lengths are at least 1.
pub fn group_tracks(hits: Vec<MotifHit>, declared_length: Option<u32>) -> Vec<PromoterTrack> {
    let mut tracks: Vec<PromoterTrack> = Vec::new();
    for hit in hits {
        match tracks.iter_mut().find(|t| t.gene_id == hit.gene_id) {
            Some(track) => track.hits.push(hit),
            None => tracks.push(PromoterTrack {
                gene_id: hit.gene_id.clone(),
                length: 0,
                hits: vec![hit],
            }),
        }
    }

    for track in &mut tracks {
        let length = declared_length.unwrap_or_else(|| track.max_position());
        track.length = length.max(1);
    }
    tracks
}

pub fn map_coordinates(track: &PromoterTrack) -> Vec<MappedHit> {
    let length = f64::from(track.length.max(1));
    track
        .hits
        .iter()
        .map(|hit| {
            let out_of_range = hit.position > track.length;
            let normalized = if out_of_range {
                1.0
            } else {
                (f64::from(hit.position) / length).clamp(0.0, 1.0)
            };
            MappedHit {
                normalized,
                hit: hit.clone(),
                out_of_range,
            }
        })
        .collect()
}

/// One horizontal scale for all tracks plotted together: the largest declared
/// length or observed hit position.
pub fn shared_scale(tracks: &[PromoterTrack]) -> u32 {
    tracks
        .iter()
        .map(|t| t.length.max(t.max_position()))
        .max()
        .unwrap_or(0)
        .max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutHit {
    pub mapped: MappedHit,
    /// Position on the shared scale, in `[0, 1]`.
    pub axis: f64,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub gene_id: String,
    pub length: u32,
    pub hits: Vec<LaidOutHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub display_name: String,
    pub sequence: String,
}

impl LegendEntry {
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.sequence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotifLayout {
    pub scale: u32,
    pub tracks: Vec<TrackLayout>,
    /// Sorted by display name; `color_index` indexes into this list.
    pub legend: Vec<LegendEntry>,
}

impl MotifLayout {
    pub fn out_of_range_count(&self) -> usize {
        self.tracks
            .iter()
            .flat_map(|t| t.hits.iter())
            .filter(|h| h.mapped.out_of_range)
            .count()
    }

    pub fn hit_count(&self) -> usize {
        self.tracks.iter().map(|t| t.hits.len()).sum()
    }
}

pub fn layout_tracks(tracks: &[PromoterTrack]) -> MotifLayout {
    let scale = shared_scale(tracks);

    let mut first_sequence: BTreeMap<&str, &str> = BTreeMap::new();
    for hit in tracks.iter().flat_map(|t| t.hits.iter()) {
        first_sequence
            .entry(hit.display_name.as_str())
            .or_insert(hit.matched_sequence.as_str());
    }
    let legend: Vec<LegendEntry> = first_sequence
        .into_iter()
        .map(|(name, seq)| LegendEntry {
            display_name: name.to_string(),
            sequence: seq.to_string(),
        })
        .collect();

    let laid_out = tracks
        .iter()
        .map(|track| {
            let hits = map_coordinates(track)
                .into_iter()
                .map(|mapped| {
                    let axis = (f64::from(mapped.hit.position) / f64::from(scale)).min(1.0);
                    let color_index = legend
                        .iter()
                        .position(|e| e.display_name == mapped.hit.display_name)
                        .unwrap_or(0);
                    LaidOutHit {
                        mapped,
                        axis,
                        color_index,
                    }
                })
                .collect();
            TrackLayout {
                gene_id: track.gene_id.clone(),
                length: track.length,
                hits,
            }
        })
        .collect::<Vec<_>>();

    let layout = MotifLayout {
        scale,
        tracks: laid_out,
        legend,
    };
    let flagged = layout.out_of_range_count();
    if flagged > 0 {
        tracing::warn!("{flagged} motif hit(s) lie beyond their declared promoter length");
    }
    layout
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/motif_map.rs"]
mod tests;
