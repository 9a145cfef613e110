// ============================================================
// Layer 4 — IDX Reader (MNIST binary format)
// ============================================================
// MNIST ships as two big-endian binary files:
//
//   images:  u32 magic = 0x00000803
//            u32 count
//            u32 rows
//            u32 cols
//            count * rows * cols  u8 pixels
//
//   labels:  u32 magic = 0x00000801
//            u32 count
//            count  u8 labels
//
// Each image becomes one row of `rows * cols` pixel columns
// named pixel_0 .. pixel_{n-1}; labels become a "label" column.
//
// We read with the `bytes` crate's Buf, which decodes
// big-endian integers directly from a byte slice.

use bytes::Buf;

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::table::{Cell, Table};

pub const IMAGES_MAGIC: u32 = 0x0000_0803;
pub const LABELS_MAGIC: u32 = 0x0000_0801;

/// Decoded image file: `count` images of `rows * cols` pixels
#[derive(Debug, Clone, PartialEq)]
pub struct IdxImages {
    pub count:  usize,
    pub rows:   usize,
    pub cols:   usize,
    pub pixels: Vec<u8>,
}

impl IdxImages {
    pub fn pixels_per_image(&self) -> usize {
        self.rows * self.cols
    }
}

fn read_u32(buf: &mut &[u8], source: &str, field: &str) -> PrepResult<u32> {
    if buf.remaining() < 4 {
        return Err(PrepError::parse(source, format!("truncated header: missing {field}")));
    }
    Ok(buf.get_u32())
}

fn check_magic(found: u32, expected: u32, source: &str) -> PrepResult<()> {
    if found != expected {
        return Err(PrepError::parse(
            source,
            format!("bad magic 0x{found:08x}, expected 0x{expected:08x}"),
        ));
    }
    Ok(())
}

pub fn parse_images(raw: &[u8], source: &str) -> PrepResult<IdxImages> {
    let mut buf = raw;
    check_magic(read_u32(&mut buf, source, "magic")?, IMAGES_MAGIC, source)?;
    let count = read_u32(&mut buf, source, "count")? as usize;
    let rows  = read_u32(&mut buf, source, "rows")? as usize;
    let cols  = read_u32(&mut buf, source, "cols")? as usize;

    let expected = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| PrepError::parse(source, "image dimensions overflow"))?;
    if buf.remaining() != expected {
        return Err(PrepError::parse(
            source,
            format!("expected {expected} pixel bytes, found {}", buf.remaining()),
        ));
    }

    Ok(IdxImages { count, rows, cols, pixels: buf.to_vec() })
}

pub fn parse_labels(raw: &[u8], source: &str) -> PrepResult<Vec<u8>> {
    let mut buf = raw;
    check_magic(read_u32(&mut buf, source, "magic")?, LABELS_MAGIC, source)?;
    let count = read_u32(&mut buf, source, "count")? as usize;
    if buf.remaining() != count {
        return Err(PrepError::parse(
            source,
            format!("expected {count} label bytes, found {}", buf.remaining()),
        ));
    }
    Ok(buf.to_vec())
}

/// Join an image file and a label file into one Table
pub fn images_to_table(images: &IdxImages, labels: &[u8]) -> PrepResult<Table> {
    if images.count != labels.len() {
        return Err(PrepError::shape(format!(
            "{} images but {} labels",
            images.count,
            labels.len()
        )));
    }

    let width = images.pixels_per_image();
    let mut table = Table::new();
    for p in 0..width {
        let values = (0..images.count)
            .map(|i| Cell::Number(f64::from(images.pixels[i * width + p])))
            .collect();
        table.push_column(format!("pixel_{p}"), values)?;
    }
    table.push_column(
        "label",
        labels.iter().map(|&l| Cell::Number(f64::from(l))).collect(),
    )?;
    Ok(table)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a tiny IDX image file for tests
    pub(crate) fn image_bytes(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for v in [IMAGES_MAGIC, count, rows, cols] {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out.extend_from_slice(pixels);
        out
    }

    pub(crate) fn label_bytes(labels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&LABELS_MAGIC.to_be_bytes());
        out.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        out.extend_from_slice(labels);
        out
    }

    #[test]
    fn test_parse_images() {
        let raw = image_bytes(2, 1, 2, &[0, 255, 7, 9]);
        let imgs = parse_images(&raw, "imgs").unwrap();
        assert_eq!(imgs.count, 2);
        assert_eq!(imgs.pixels_per_image(), 2);
        assert_eq!(imgs.pixels, vec![0, 255, 7, 9]);
    }

    #[test]
    fn test_bad_magic() {
        let raw = label_bytes(&[1, 2]);
        let err = parse_images(&raw, "imgs").unwrap_err();
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_truncated_header() {
        let err = parse_labels(&[0, 0, 8], "lbls").unwrap_err();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_payload_length_checked() {
        let raw = image_bytes(2, 2, 2, &[0; 7]);
        assert!(parse_images(&raw, "imgs").is_err());
    }

    #[test]
    fn test_images_to_table() {
        let imgs = parse_images(&image_bytes(2, 1, 2, &[0, 255, 7, 9]), "i").unwrap();
        let lbls = parse_labels(&label_bytes(&[3, 8]), "l").unwrap();
        let t = images_to_table(&imgs, &lbls).unwrap();

        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.num_columns(), 3);
        assert_eq!(t.column("pixel_1").unwrap()[1], Cell::Number(9.0));
        assert_eq!(t.column("label").unwrap()[0], Cell::Number(3.0));
    }

    #[test]
    fn test_count_mismatch() {
        let imgs = parse_images(&image_bytes(1, 1, 1, &[0]), "i").unwrap();
        assert!(images_to_table(&imgs, &[1, 2]).is_err());
    }
}
