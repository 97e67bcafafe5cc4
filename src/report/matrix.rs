use std::path::Path;

use crate::input::{InputError, data_lines, origin_name, read_text};
use crate::model::identity::IdentityMatrix;
use crate::report::format_f64_6;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Square tab-separated matrix; cells are percentages with a `%` suffix.
/// An empty matrix renders as an empty file.
pub fn render_identity_summary(matrix: &IdentityMatrix) -> String {
    let mut out = String::new();
    if matrix.is_empty() {
        return out;
    }
    out.push('\t');
    out.push_str(&matrix.ids.join("\t"));
    out.push('\n');
    for (i, id) in matrix.ids.iter().enumerate() {
        out.push_str(id);
        for j in 0..matrix.len() {
            out.push('\t');
            out.push_str(&format_f64_6(matrix.display_value(i, j)));
            out.push('%');
        }
        out.push('\n');
    }
    out
}

pub fn load_identity_summary(path: &Path) -> Result<IdentityMatrix, InputError> {
    let text = read_text(path)?;
    parse_identity_summary(&text, &origin_name(path))
}

/// Reads a matrix written by [`render_identity_summary`]. The diagonal is
/// ignored; off-diagonal cells must agree with their mirror.
pub fn parse_identity_summary(text: &str, origin: &str) -> Result<IdentityMatrix, InputError> {
    let mut lines = data_lines(text);
    let Some((header_no, header)) = lines.next() else {
        return Ok(IdentityMatrix::default());
    };
    let ids: Vec<String> = header
        .split('\t')
        .skip(1)
        .map(|s| s.trim().to_string())
        .collect();
    if ids.iter().any(String::is_empty) {
        return Err(InputError::parse(origin, header_no, "empty sequence identifier"));
    }

    let n = ids.len();
    let mut cells = vec![vec![0.0f64; n]; n];
    let mut rows = 0usize;
    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        if rows >= n {
            return Err(InputError::parse(origin, line_no, "more rows than columns"));
        }
        if fields.len() != n + 1 {
            return Err(InputError::parse(
                origin,
                line_no,
                format!("expected {} columns, found {}", n + 1, fields.len()),
            ));
        }
        if fields[0].trim() != ids[rows] {
            return Err(InputError::parse(
                origin,
                line_no,
                format!("row `{}` does not match column `{}`", fields[0].trim(), ids[rows]),
            ));
        }
        for (j, raw) in fields[1..].iter().enumerate() {
            let raw = raw.trim();
            let number = raw.strip_suffix('%').unwrap_or(raw);
            cells[rows][j] = number.parse().map_err(|_| {
                InputError::parse(origin, line_no, format!("invalid percentage `{raw}`"))
            })?;
        }
        rows += 1;
    }
    if rows != n {
        return Err(InputError::parse(
            origin,
            header_no,
            format!("expected {n} rows, found {rows}"),
        ));
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if (cells[i][j] - cells[j][i]).abs() > SYMMETRY_TOLERANCE {
                return Err(InputError::parse(
                    origin,
                    header_no + i + 1,
                    format!("asymmetric entries for `{}` / `{}`", ids[i], ids[j]),
                ));
            }
        }
    }

    IdentityMatrix::try_from_pairs(ids, |i, j| Ok::<f64, InputError>(cells[i][j]))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/matrix.rs"]
mod tests;
