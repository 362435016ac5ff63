//! Sequence-addressed image persistence.
//!
//! The [`ImageStore`] owns the image sequence counter for one
//! report-generation run. It persists rasters as `images/img_<n>.png` under
//! the report directory and decides how each saved raster is referenced from
//! the document: inline, as a hyperlink (large previews), or inline with a
//! visible skip-paint marker.
//!
//! Sequence numbers start at zero and are consumed before any I/O, so they
//! stay unique and strictly increasing even across failed saves. The store
//! is per-run state, never process-global; independent runs get independent
//! numbering.

use std::fs;
use std::path::{Path, PathBuf};

use tiny_skia::Pixmap;
use tracing::warn;

/// Pixel-dimension cutoff above which a raster is linked instead of
/// embedded inline, to keep the document itself small.
pub const LARGE_PREVIEW: u32 = 512;

/// Persists rasters for one run and hands back embeddable references.
pub struct ImageStore {
    report_dir: PathBuf,
    next_seq: u32,
}

impl ImageStore {
    /// Creates a store rooted at the report directory. Nothing is written
    /// until the first save.
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        ImageStore {
            report_dir: report_dir.into(),
            next_seq: 0,
        }
    }

    /// The directory image artifacts are written to.
    pub fn images_dir(&self) -> PathBuf {
        self.report_dir.join("images")
    }

    /// The sequence number the next save will consume.
    pub fn next_sequence(&self) -> u32 {
        self.next_seq
    }

    /// Persists a raster and returns the HTML reference for its preview
    /// cell.
    ///
    /// The reference is one of:
    /// - an inline `<img>` annotated "skip paint" when `skip_paint` is set,
    /// - a hyperlink when either dimension exceeds [`LARGE_PREVIEW`],
    /// - a plain inline `<img>` otherwise.
    ///
    /// I/O failures are logged and degrade to an empty reference (an empty
    /// preview cell); one missing image must not block the rest of the
    /// report. The sequence number is consumed either way.
    pub fn save(&mut self, pixmap: &Pixmap, skip_paint: bool) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        let name = format!("img_{seq}.png");

        let dir = self.images_dir();
        if let Err(err) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), %err, "could not create images directory");
            return String::new();
        }
        let bytes = match pixmap.encode_png() {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%name, %err, "PNG encoding failed");
                return String::new();
            }
        };
        if let Err(err) = fs::write(dir.join(&name), bytes) {
            warn!(%name, %err, "could not write image");
            return String::new();
        }

        let href = format!("images/{name}");
        if skip_paint {
            format!("<img src=\"{href}\" alt=\"{name}\"> <em class=\"skip-paint\">skip paint</em>")
        } else if pixmap.width() > LARGE_PREVIEW || pixmap.height() > LARGE_PREVIEW {
            format!("<a href=\"{href}\">{name}</a>")
        } else {
            format!("<img src=\"{href}\" alt=\"{name}\">")
        }
    }

    /// The report directory this store was created for.
    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }
}
