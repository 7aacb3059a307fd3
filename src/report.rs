//! Ranked outputs
//!
//! Writers for the candidate frequency list (tab-separated) and the three
//! CSV rankings. Cells go through `csv-core`, which quotes only when a cell
//! contains a delimiter, a quote or a line break. Floats use Rust's shortest
//! round-trip `Debug` form, so `1.0` stays `1.0`.
//!
//! Files are produced with [`write_atomically`]: a failed run never leaves a
//! partial output behind.

use crate::errors::Result;
use crate::scoring::{CValueRecord, TfIdfRecord, TtfIdfRecord};
use crate::types::TermCount;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const TTF_IDF_HEADER: [&str; 5] = ["Término", "TTF", "IDF", "TTF-IDF", "% de Textos"];
pub const TFIDF_HEADER: [&str; 3] = ["Término", "TF-IDF Promedio", "TF-IDF Máximo"];
pub const C_VALUE_HEADER: [&str; 2] = ["Término", "C-Value"];

/// Write one CSV cell, quoting when needed
fn write_cell<W: Write + ?Sized>(wtr: &mut W, mut data: &[u8]) -> std::io::Result<()> {
    let mut output = [0; 4096];
    let mut writer = csv_core::Writer::new();
    loop {
        let (result, nin, nout) = writer.field(data, &mut output);
        wtr.write_all(&output[..nout])?;
        if result == csv_core::WriteResult::InputEmpty {
            break;
        }
        data = &data[nin..];
    }
    // A closing quote needs at most one byte of the 4 KiB buffer
    let (_, nout) = writer.finish(&mut output);
    wtr.write_all(&output[..nout])?;
    Ok(())
}

fn write_row<W, S>(wtr: &mut W, cells: &[S]) -> std::io::Result<()>
where
    W: Write + ?Sized,
    S: AsRef<str>,
{
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            wtr.write_all(b",")?;
        }
        write_cell(wtr, cell.as_ref().as_bytes())?;
    }
    wtr.write_all(b"\n")
}

fn float(x: f64) -> String {
    format!("{:?}", x)
}

/// `term\tfrequency` per line
pub fn write_term_frequencies<W: Write + ?Sized>(wtr: &mut W, rows: &[TermCount]) -> Result<()> {
    for row in rows {
        writeln!(wtr, "{}\t{}", row.term, row.count)?;
    }
    Ok(())
}

pub fn write_ttf_idf_csv<W: Write + ?Sized>(wtr: &mut W, rows: &[TtfIdfRecord]) -> Result<()> {
    write_row(wtr, &TTF_IDF_HEADER)?;
    for r in rows {
        write_row(
            wtr,
            &[
                r.term.clone(),
                r.ttf.to_string(),
                float(r.idf),
                float(r.ttf_idf),
                float(r.presence_pct),
            ],
        )?;
    }
    Ok(())
}

pub fn write_tfidf_csv<W: Write + ?Sized>(wtr: &mut W, rows: &[TfIdfRecord]) -> Result<()> {
    write_row(wtr, &TFIDF_HEADER)?;
    for r in rows {
        write_row(wtr, &[r.term.clone(), float(r.mean), float(r.max)])?;
    }
    Ok(())
}

pub fn write_c_value_csv<W: Write + ?Sized>(wtr: &mut W, rows: &[CValueRecord]) -> Result<()> {
    write_row(wtr, &C_VALUE_HEADER)?;
    for r in rows {
        write_row(wtr, &[r.term.clone(), float(r.c_value)])?;
    }
    Ok(())
}

/// Write `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over `path` only when `write` succeeds;
/// on error it is removed and `path` is left untouched.
pub fn write_atomically<F>(path: impl AsRef<Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = BufWriter::new(temp_file.as_file_mut());
        write(&mut wtr)?;
        wtr.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), "output written");
    Ok(())
}
