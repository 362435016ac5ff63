//! The typed-value rendering dispatcher.
//!
//! [`render_value`] is the central polymorphic routine of the report engine:
//! given a key and its classified [`ThemeValue`], it selects a rendering
//! strategy and produces a [`RowFragment`]: the value and preview cells of
//! one table row, plus, for most raster-backed cases, a persisted image
//! artifact.
//!
//! Rendering is best-effort by design. A value's *type* selects the
//! strategy; whether the strategy succeeds is a runtime question, because
//! procedural values (borders, painters, icons) may require a
//! fully-initialized owning component that a report generator cannot supply.
//! Every paint attempt runs inside its own failure boundary: a failing entry
//! degrades to a skip-paint marker and the run continues.
//!
//! Icon painting gets a fallback chain rather than a single boundary. Some
//! icon implementations branch on the concrete role of the host component,
//! so the dispatcher retries the ordered [`HostComponent::PAINT_FALLBACKS`]
//! sequence and stops at the first success.

use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::store::ImageStore;
use crate::util::escape_text;
use crate::value::{
    BorderPaint, Dictionary, FontSpec, HostComponent, IconPaint, InputMap, Insets, PainterPaint,
    Size, ThemeValue,
};

/// Sample text for font previews.
const PANGRAM: &str = "the quick brown fox jumps over the crazy dog";

/// Maximum width of a font preview canvas.
const MAX_FONT_PREVIEW_WIDTH: u32 = 480;

/// Base content rectangle visualized inside insets and borders.
const CONTENT_WIDTH: u32 = 50;
const CONTENT_HEIGHT: u32 = 20;

/// Edge length of the synthetic host a painter is invoked against.
const PAINTER_EXTENT: u32 = 25;

/// Substitute edge length for icons reporting a non-positive dimension.
const ICON_FALLBACK_EXTENT: u32 = 16;

/// Bound on deferred-value resolution.
///
/// The resolver re-enters the dispatcher on the resolved value, and nothing
/// stops a deferred value from resolving to another one. Acyclic chains in
/// practice are one or two hops; a chain this deep is a cycle.
const MAX_RESOLVE_DEPTH: usize = 8;

/// The rendered cells of one table row: one or more `<td>` fragments,
/// pre-escaped. The deferred case legitimately contributes an extra marker
/// cell ahead of the resolved value's cells.
#[derive(Debug)]
pub struct RowFragment {
    pub cells: String,
}

/// Renders one dictionary entry into its row cells.
///
/// Never fails: paint errors surface as skip-paint markers and resource
/// errors as empty preview cells. The dictionary is only read; resolving a
/// deferred entry produces a fresh value for display.
pub fn render_value(
    key: &str,
    value: &ThemeValue,
    defaults: &Dictionary,
    store: &mut ImageStore,
) -> RowFragment {
    render_at_depth(key, value, defaults, store, 0)
}

fn render_at_depth(
    key: &str,
    value: &ThemeValue,
    defaults: &Dictionary,
    store: &mut ImageStore,
    depth: usize,
) -> RowFragment {
    match value {
        ThemeValue::Deferred(lazy) => {
            let marker = format!(
                "<td><em class=\"deferred\" title=\"{}\">deferred</em></td>",
                escape_text(&lazy.describe())
            );
            if depth >= MAX_RESOLVE_DEPTH {
                debug!(key, depth, "deferred value did not settle, giving up");
                return RowFragment {
                    cells: format!("{marker}<td>unresolved deferred value</td><td>&nbsp;</td>"),
                };
            }
            let resolved = lazy.resolve(defaults);
            let inner = render_at_depth(key, &resolved, defaults, store, depth + 1);
            RowFragment {
                cells: format!("{marker}{}", inner.cells),
            }
        }
        ThemeValue::Color(color) => color_cells(color),
        ThemeValue::Font(font) => font_cells(font, store),
        ThemeValue::Size(size) => size_cells(size, store),
        ThemeValue::Insets(insets) => insets_cells(insets, store),
        ThemeValue::Border(border) => border_cells(key, border.as_ref(), store),
        ThemeValue::Painter(painter) => painter_cells(key, painter.as_ref(), store),
        ThemeValue::InputMap(map) => input_map_cells(map),
        ThemeValue::Icon(icon) => icon_cells(key, icon.as_ref(), store),
        ThemeValue::Array(items) => array_cells(items),
        ThemeValue::Number(_) | ThemeValue::Bool(_) | ThemeValue::Other(_) => {
            text_cells(&value.describe())
        }
    }
}

/// A swatch cell: the hex label drawn in the negative color atop its own
/// background, so the label stays readable on any swatch.
fn color_cells(color: &Rgba) -> RowFragment {
    let hex = color.to_hex();
    let negative = color.negative().to_hex();
    RowFragment {
        cells: format!(
            "<td><code title=\"{}\">#{hex}</code></td>\
             <td style=\"background-color: #{hex}; color: #{negative};\"><code>#{hex}</code></td>",
            color.tuple()
        ),
    }
}

fn font_cells(font: &FontSpec, store: &mut ImageStore) -> RowFragment {
    let estimated = (PANGRAM.chars().count() as f32 * font.size * 0.6).ceil() as u32;
    let width = estimated.clamp(1, MAX_FONT_PREVIEW_WIDTH);
    let height = (font.size * 2.0).ceil() as u32;

    let mut canvas = Canvas::new(width, height);
    canvas.text(4.0, font.size * 1.3, PANGRAM, font, Rgba::BLACK);
    let reference = rasterize_and_save(&canvas, false, store);
    RowFragment {
        cells: format!(
            "<td>{}</td>{}",
            escape_text(&font.describe()),
            preview_cell(reference)
        ),
    }
}

fn size_cells(size: &Size, store: &mut ImageStore) -> RowFragment {
    let text = escape_text(&size.describe());
    if size.width == 0 || size.height == 0 {
        return RowFragment {
            cells: format!("<td>{text}</td><td>&nbsp;</td>"),
        };
    }
    let mut canvas = Canvas::new(size.width, size.height);
    canvas.stroke_rect(0, 0, size.width, size.height, Rgba::RED);
    let reference = rasterize_and_save(&canvas, false, store);
    RowFragment {
        cells: format!("<td>{text}</td>{}", preview_cell(reference)),
    }
}

/// The inset visualization: the content rectangle in one color, the padded
/// bounds in a second, so the inset amounts read directly off the image.
fn insets_cells(insets: &Insets, store: &mut ImageStore) -> RowFragment {
    let width = CONTENT_WIDTH + insets.left + insets.right;
    let height = CONTENT_HEIGHT + insets.top + insets.bottom;

    let mut canvas = Canvas::new(width, height);
    canvas.stroke_rect(
        insets.left,
        insets.top,
        CONTENT_WIDTH,
        CONTENT_HEIGHT,
        Rgba::BLACK,
    );
    canvas.stroke_rect(0, 0, width, height, Rgba::RED);
    let reference = rasterize_and_save(&canvas, false, store);
    RowFragment {
        cells: format!(
            "<td>{}</td>{}",
            escape_text(&insets.describe()),
            preview_cell(reference)
        ),
    }
}

fn border_cells(key: &str, border: &dyn BorderPaint, store: &mut ImageStore) -> RowFragment {
    let insets = border.insets();
    let width = CONTENT_WIDTH + insets.left + insets.right;
    let height = CONTENT_HEIGHT + insets.top + insets.bottom;

    let mut canvas = Canvas::new(width, height);
    canvas.fill_rect(
        insets.left,
        insets.top,
        CONTENT_WIDTH,
        CONTENT_HEIGHT,
        Rgba::RED,
    );
    let skip_paint = match border.paint(&mut canvas) {
        Ok(()) => false,
        Err(err) => {
            debug!(key, %err, "border paint failed");
            true
        }
    };
    let reference = rasterize_and_save(&canvas, skip_paint, store);
    RowFragment {
        cells: format!(
            "<td>{}</td>{}",
            escape_text(&insets.describe()),
            preview_cell(reference)
        ),
    }
}

fn painter_cells(key: &str, painter: &dyn PainterPaint, store: &mut ImageStore) -> RowFragment {
    let mut canvas = Canvas::new(PAINTER_EXTENT, PAINTER_EXTENT);
    let skip_paint = match painter.paint(
        &mut canvas,
        &HostComponent::Generic,
        PAINTER_EXTENT,
        PAINTER_EXTENT,
    ) {
        Ok(()) => false,
        Err(err) => {
            debug!(key, %err, "painter failed");
            true
        }
    };
    let reference = rasterize_and_save(&canvas, skip_paint, store);
    RowFragment {
        cells: format!(
            "<td>{}</td>{}",
            escape_text(&painter.describe()),
            preview_cell(reference)
        ),
    }
}

fn input_map_cells(map: &InputMap) -> RowFragment {
    let mut items = String::new();
    for (chord, action) in &map.bindings {
        items.push_str(&format!(
            "<li><code>{}</code> : {}</li>",
            escape_text(chord),
            escape_text(action)
        ));
    }
    RowFragment {
        cells: format!(
            "<td><details><summary>{}</summary><ul>{items}</ul></details></td><td>&nbsp;</td>",
            escape_text(&map.name)
        ),
    }
}

fn icon_cells(key: &str, icon: &dyn IconPaint, store: &mut ImageStore) -> RowFragment {
    let reported_width = icon.width();
    let reported_height = icon.height();
    let width = substitute_extent(reported_width);
    let height = substitute_extent(reported_height);

    // Each candidate gets a fresh canvas so a failed attempt leaves no
    // half-drawn state behind.
    let mut canvas = Canvas::new(width, height);
    let mut skip_paint = true;
    for host in HostComponent::PAINT_FALLBACKS {
        let mut attempt = Canvas::new(width, height);
        match icon.paint(&mut attempt, &host) {
            Ok(()) => {
                canvas = attempt;
                skip_paint = false;
                break;
            }
            Err(err) => {
                debug!(key, host = host.role(), %err, "icon paint failed");
            }
        }
    }

    let reference = rasterize_and_save(&canvas, skip_paint, store);
    RowFragment {
        cells: format!(
            "<td>Icon {reported_width} * {reported_height}</td>{}",
            preview_cell(reference)
        ),
    }
}

fn array_cells(items: &[ThemeValue]) -> RowFragment {
    let mut list = String::new();
    for item in items {
        list.push_str(&format!("<li>{}</li>", escape_text(&item.describe())));
    }
    RowFragment {
        cells: format!(
            "<td><details><summary>{} elements</summary><ul>{list}</ul></details></td>\
             <td>&nbsp;</td>",
            items.len()
        ),
    }
}

fn text_cells(text: &str) -> RowFragment {
    RowFragment {
        cells: format!("<td>{}</td><td>&nbsp;</td>", escape_text(text)),
    }
}

fn substitute_extent(reported: i32) -> u32 {
    if reported <= 0 {
        ICON_FALLBACK_EXTENT
    } else {
        reported as u32
    }
}

fn rasterize_and_save(canvas: &Canvas, skip_paint: bool, store: &mut ImageStore) -> String {
    match canvas.rasterize() {
        Ok(pixmap) => store.save(&pixmap, skip_paint),
        Err(err) => {
            warn!(%err, "rasterization failed");
            String::new()
        }
    }
}

fn preview_cell(reference: String) -> String {
    if reference.is_empty() {
        "<td>&nbsp;</td>".to_string()
    } else {
        format!("<td>{reference}</td>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FixedInsetsBorder {
        insets: Insets,
        fails: bool,
    }

    impl BorderPaint for FixedInsetsBorder {
        fn insets(&self) -> Insets {
            self.insets
        }

        fn paint(&self, canvas: &mut Canvas) -> Result<(), String> {
            if self.fails {
                return Err("requires a live owning component".to_string());
            }
            canvas.stroke_rect(0, 0, canvas.width(), canvas.height(), Rgba::BLACK);
            Ok(())
        }
    }

    struct ReportedSizeIcon {
        width: i32,
        height: i32,
        paints_for: Option<HostComponent>,
    }

    impl IconPaint for ReportedSizeIcon {
        fn width(&self) -> i32 {
            self.width
        }

        fn height(&self) -> i32 {
            self.height
        }

        fn paint(&self, canvas: &mut Canvas, host: &HostComponent) -> Result<(), String> {
            match self.paints_for {
                Some(expected) if expected == *host => {
                    canvas.fill_rect(0, 0, canvas.width(), canvas.height(), Rgba::BLACK);
                    Ok(())
                }
                _ => Err(format!("no {} host support", host.role())),
            }
        }
    }

    struct Alias {
        target: &'static str,
    }

    impl DeferredValue for Alias {
        fn describe(&self) -> String {
            format!("alias of {}", self.target)
        }

        fn resolve(&self, defaults: &Dictionary) -> ThemeValue {
            match defaults.get(self.target) {
                Some(ThemeValue::Color(color)) => ThemeValue::Color(*color),
                Some(other) => ThemeValue::Other(Some(other.describe())),
                None => ThemeValue::Other(None),
            }
        }
    }

    struct NeverSettles;

    impl DeferredValue for NeverSettles {
        fn describe(&self) -> String {
            "factory of factories".to_string()
        }

        fn resolve(&self, _defaults: &Dictionary) -> ThemeValue {
            ThemeValue::Deferred(Box::new(NeverSettles))
        }
    }

    use crate::value::DeferredValue;

    fn run(value: ThemeValue) -> (RowFragment, u32) {
        run_with(Dictionary::new(), value)
    }

    fn run_with(defaults: Dictionary, value: ThemeValue) -> (RowFragment, u32) {
        let dir = TempDir::new().unwrap();
        let mut store = ImageStore::new(dir.path());
        let fragment = render_value("Test.key", &value, &defaults, &mut store);
        (fragment, store.next_sequence())
    }

    #[test]
    fn test_color_swatch_uses_negative_label() {
        let (fragment, saved) = run(ThemeValue::Color(Rgba::new(255, 0, 0, 255)));
        assert!(fragment.cells.contains("#ff0000ff"));
        assert!(fragment
            .cells
            .contains("background-color: #ff0000ff; color: #00ffffff;"));
        assert!(fragment.cells.contains("title=\"255,0,0,255\""));
        assert_eq!(saved, 0, "colors never produce artifacts");
    }

    #[test]
    fn test_zero_size_produces_no_artifact() {
        let (fragment, saved) = run(ThemeValue::Size(Size::new(0, 20)));
        assert!(fragment.cells.contains("0 x 20"));
        assert_eq!(saved, 0);

        let (_, saved) = run(ThemeValue::Size(Size::new(20, 0)));
        assert_eq!(saved, 0);
    }

    #[test]
    fn test_nonzero_size_is_rasterized() {
        let (fragment, saved) = run(ThemeValue::Size(Size::new(30, 12)));
        assert!(fragment.cells.contains("<img src=\"images/img_0.png\""));
        assert_eq!(saved, 1);
    }

    #[test]
    fn test_insets_canvas_padded_around_content() {
        let (fragment, saved) = run(ThemeValue::Insets(Insets::new(1, 2, 3, 4)));
        assert!(fragment.cells.contains("(1,2,3,4)"));
        assert_eq!(saved, 1);
    }

    #[test]
    fn test_failing_border_still_shows_marked_image() {
        let (fragment, saved) = run(ThemeValue::Border(Box::new(FixedInsetsBorder {
            insets: Insets::uniform(2),
            fails: true,
        })));
        assert!(fragment.cells.contains("(2,2,2,2)"));
        assert!(fragment.cells.contains("skip paint"));
        assert!(fragment.cells.contains("<img "));
        assert_eq!(saved, 1, "the attempt is persisted, not dropped");
    }

    #[test]
    fn test_successful_border_has_no_marker() {
        let (fragment, _) = run(ThemeValue::Border(Box::new(FixedInsetsBorder {
            insets: Insets::uniform(1),
            fails: false,
        })));
        assert!(!fragment.cells.contains("skip paint"));
    }

    #[test]
    fn test_icon_substitutes_reported_zero_dimensions() {
        let (fragment, saved) = run(ThemeValue::Icon(Box::new(ReportedSizeIcon {
            width: 0,
            height: 0,
            paints_for: Some(HostComponent::Generic),
        })));
        // The label keeps the reported dimensions, not the substituted ones.
        assert!(fragment.cells.contains("Icon 0 * 0"));
        assert_eq!(saved, 1);
    }

    #[test]
    fn test_icon_fallback_hosts_are_tried_in_order() {
        let (fragment, _) = run(ThemeValue::Icon(Box::new(ReportedSizeIcon {
            width: 12,
            height: 12,
            paints_for: Some(HostComponent::MenuItem),
        })));
        assert!(
            !fragment.cells.contains("skip paint"),
            "a later host in the chain succeeded"
        );
    }

    #[test]
    fn test_icon_exhausted_fallbacks_mark_skip_paint() {
        let (fragment, saved) = run(ThemeValue::Icon(Box::new(ReportedSizeIcon {
            width: 12,
            height: 12,
            paints_for: None,
        })));
        assert!(fragment.cells.contains("skip paint"));
        assert_eq!(saved, 1);
    }

    #[test]
    fn test_input_map_renders_disclosure_list() {
        let map = InputMap::new("FieldMap")
            .bind("ctrl C", "copy")
            .bind("ctrl X", "cut");
        let (fragment, saved) = run(ThemeValue::InputMap(map));
        assert!(fragment.cells.contains("<details>"));
        assert!(fragment.cells.contains("<code>ctrl C</code> : copy"));
        assert_eq!(saved, 0);
    }

    #[test]
    fn test_array_lists_element_descriptions() {
        let items = vec![
            ThemeValue::Color(Rgba::new(1, 2, 3, 255)),
            ThemeValue::Number(7.0),
        ];
        let (fragment, saved) = run(ThemeValue::Array(items));
        assert!(fragment.cells.contains("2 elements"));
        assert!(fragment.cells.contains("Color(1,2,3,255)"));
        assert!(fragment.cells.contains("<li>7</li>"));
        assert_eq!(saved, 0);
    }

    #[test]
    fn test_fallback_escapes_description() {
        let (fragment, _) = run(ThemeValue::Other(Some("<script>".to_string())));
        assert!(fragment.cells.contains("&lt;script&gt;"));
        assert!(!fragment.cells.contains("<script>"));
    }

    #[test]
    fn test_deferred_resolves_through_dictionary() {
        let mut defaults = Dictionary::new();
        defaults.insert(
            "control".to_string(),
            ThemeValue::Color(Rgba::new(0, 0, 255, 255)),
        );
        let (fragment, _) = run_with(
            defaults,
            ThemeValue::Deferred(Box::new(Alias { target: "control" })),
        );
        assert!(fragment.cells.contains("deferred"));
        assert!(fragment.cells.contains("alias of control"));
        assert!(fragment.cells.contains("#0000ffff"));
    }

    #[test]
    fn test_deferred_cycle_terminates() {
        let (fragment, saved) = run(ThemeValue::Deferred(Box::new(NeverSettles)));
        assert!(fragment.cells.contains("unresolved deferred value"));
        assert_eq!(saved, 0);
    }

    #[test]
    fn test_font_preview_height_tracks_point_size() {
        let (fragment, saved) = run(ThemeValue::Font(FontSpec::new("sans-serif", 14.0)));
        assert!(fragment.cells.contains("sans-serif 14pt"));
        assert_eq!(saved, 1);
    }

    #[test]
    fn test_number_and_bool_have_empty_previews() {
        let (fragment, saved) = run(ThemeValue::Number(42.0));
        assert!(fragment.cells.contains("<td>42</td>"));
        assert!(fragment.cells.ends_with("<td>&nbsp;</td>"));
        assert_eq!(saved, 0);

        let (fragment, _) = run(ThemeValue::Bool(false));
        assert!(fragment.cells.contains("<td>false</td>"));
    }
}
