//! Font loading
//!
//! Parses TTF/OTF data once up front, keeping the raw bytes alive for the
//! shaper and rasterizer (both re-parse from the same buffer on demand).

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::{Result, TextError};

/// A parsed font face.
#[derive(Clone)]
pub struct FontFace {
    /// Raw font data (kept alive for ttf-parser/rustybuzz/swash).
    data: Arc<Vec<u8>>,
    /// Face index within the font file (for TTC files).
    face_index: u32,
    /// Design units per em, for scaling advances to point sizes.
    units_per_em: u16,
}

impl FontFace {
    /// Load a font from raw TTF/OTF data (face index 0).
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    /// Load a font from raw TTF/OTF data with a specific face index.
    pub fn from_data_with_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let data = Arc::new(data);
        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| TextError::FontParse(format!("{e:?}")))?;
        let units_per_em = face.units_per_em();
        Ok(Self {
            data,
            face_index,
            units_per_em,
        })
    }

    /// Load a font from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| TextError::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_data(data)
    }

    /// Pick a monospace face from the system font database.
    ///
    /// Expression output leans on uniform advances for its grouping marks,
    /// so monospace is queried first with sans-serif as the fallback.
    pub fn discover() -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let query = fontdb::Query {
            families: &[fontdb::Family::Monospace, fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        };
        let id = db.query(&query).ok_or(TextError::NoFontFound)?;
        if let Some(info) = db.face(id) {
            debug!(family = ?info.families.first(), "discovered system font");
        }
        match db.with_face_data(id, |data, index| {
            Self::from_data_with_index(data.to_vec(), index)
        }) {
            Some(face) => face,
            None => Err(TextError::NoFontFound),
        }
    }

    /// Raw font bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within the font file.
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Design units per em.
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Scale a font-unit length to points at `size`.
    pub fn to_points(&self, units: i32, size: f64) -> f64 {
        units as f64 * size / self.units_per_em as f64
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_data() {
        let err = FontFace::from_data(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, TextError::FontParse(_)));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = FontFace::from_file(Path::new("/nonexistent/font.ttf")).unwrap_err();
        let TextError::FontLoad(msg) = err else {
            panic!("expected a load error");
        };
        assert!(msg.contains("/nonexistent/font.ttf"));
    }
}
