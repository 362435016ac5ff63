//! Built-in demo themes.
//!
//! A theme provider is anything that can produce a [`Dictionary`]. The
//! built-in "daybreak" theme exists so the tool is useful out of the box and
//! exercises every value kind the report engine renders, including the
//! procedural ones a YAML file cannot express: borders and painters that
//! need a live owning component (and therefore fail), icons that branch on
//! their host's role, and deferred entries resolved against the dictionary.

use swatchbook_render::{
    BorderPaint, Canvas, ComponentPolicy, DeferredValue, Dictionary, FontSpec, HostComponent,
    IconPaint, InputMap, Insets, PainterPaint, Rgba, Size, ThemeValue,
};

/// Theme the CLI renders when `--theme` is not given.
pub const DEFAULT_THEME: &str = "daybreak";

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &[DEFAULT_THEME];

/// A plain rectangular line border.
struct LineBorder {
    color: Rgba,
    thickness: u32,
}

impl BorderPaint for LineBorder {
    fn insets(&self) -> Insets {
        Insets::uniform(self.thickness)
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), String> {
        for step in 0..self.thickness {
            canvas.stroke_rect(
                step,
                step,
                canvas.width() - 2 * step,
                canvas.height() - 2 * step,
                self.color,
            );
        }
        Ok(())
    }
}

/// An engraved border that shades against its owner's background and so
/// cannot paint without one.
struct EngravedBorder;

impl BorderPaint for EngravedBorder {
    fn insets(&self) -> Insets {
        Insets::uniform(2)
    }

    fn paint(&self, _canvas: &mut Canvas) -> Result<(), String> {
        Err("engraved shading needs the owning component's background".to_string())
    }
}

/// Fills its area with a single color.
struct FillPainter {
    color: Rgba,
}

impl PainterPaint for FillPainter {
    fn describe(&self) -> String {
        format!("FillPainter(#{})", self.color.to_hex())
    }

    fn paint(
        &self,
        canvas: &mut Canvas,
        _host: &HostComponent,
        width: u32,
        height: u32,
    ) -> Result<(), String> {
        canvas.fill_rect(0, 0, width, height, self.color);
        Ok(())
    }
}

/// Draws the focus ring of the current focus owner, which a report
/// generator does not have.
struct FocusRingPainter;

impl PainterPaint for FocusRingPainter {
    fn describe(&self) -> String {
        "FocusRingPainter".to_string()
    }

    fn paint(
        &self,
        _canvas: &mut Canvas,
        _host: &HostComponent,
        _width: u32,
        _height: u32,
    ) -> Result<(), String> {
        Err("focus ring geometry comes from the focus owner".to_string())
    }
}

/// A filled dot, happy with any host.
struct DotIcon {
    extent: i32,
    color: Rgba,
}

impl IconPaint for DotIcon {
    fn width(&self) -> i32 {
        self.extent
    }

    fn height(&self) -> i32 {
        self.extent
    }

    fn paint(&self, canvas: &mut Canvas, _host: &HostComponent) -> Result<(), String> {
        let inset = canvas.width() / 4;
        canvas.fill_rect(
            inset,
            inset,
            canvas.width() - 2 * inset,
            canvas.height() - 2 * inset,
            self.color,
        );
        Ok(())
    }
}

/// A check mark that reads selection state off its host and therefore only
/// accepts toggle-button-shaped hosts.
struct ToggleMarkIcon;

impl IconPaint for ToggleMarkIcon {
    fn width(&self) -> i32 {
        12
    }

    fn height(&self) -> i32 {
        12
    }

    fn paint(&self, canvas: &mut Canvas, host: &HostComponent) -> Result<(), String> {
        if *host != HostComponent::ToggleButton {
            return Err(format!("selection state unavailable on a {} host", host.role()));
        }
        canvas.fill_rect(2, 5, 3, 5, Rgba::BLACK);
        canvas.fill_rect(5, 2, 5, 3, Rgba::BLACK);
        Ok(())
    }
}

/// An icon backed by a native platform handle; reports no size and cannot
/// paint off-screen at all.
struct NativeHandleIcon;

impl IconPaint for NativeHandleIcon {
    fn width(&self) -> i32 {
        0
    }

    fn height(&self) -> i32 {
        0
    }

    fn paint(&self, _canvas: &mut Canvas, host: &HostComponent) -> Result<(), String> {
        Err(format!("native handle cannot paint on a {} host", host.role()))
    }
}

/// Resolves to another entry's color at report time.
struct ColorAlias {
    target: &'static str,
}

impl DeferredValue for ColorAlias {
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

/// A factory that keeps producing itself; the engine's resolution bound is
/// what terminates it.
struct Unsettled;

impl DeferredValue for Unsettled {
    fn describe(&self) -> String {
        "factory of factories".to_string()
    }

    fn resolve(&self, _defaults: &Dictionary) -> ThemeValue {
        ThemeValue::Deferred(Box::new(Unsettled))
    }
}

/// Returns the named built-in theme's dictionary, if the name is known.
pub fn builtin(name: &str) -> Option<Dictionary> {
    match name {
        DEFAULT_THEME => Some(daybreak()),
        _ => None,
    }
}

/// The classification policy matching the built-in themes' key vocabulary.
pub fn component_policy() -> ComponentPolicy {
    ComponentPolicy::new(
        [
            "Button",
            "CheckBox",
            "ToggleButton",
            "Tree",
            "Panel",
            "ToolTip",
            "Slider",
            "Desktop",
            "TextField",
            "List",
            "Table",
            "Spinner",
        ],
        ["control", "text", "accent", "alert"],
        ["controlShadow", "controlHighlight", "textInactive", "desktop"],
    )
}

/// The "daybreak" demo theme: a light palette over every value kind.
fn daybreak() -> Dictionary {
    let mut defaults = Dictionary::new();
    let mut put = |key: &str, value: ThemeValue| {
        defaults.insert(key.to_string(), value);
    };

    // Palette roots, referenced by the component entries below.
    put("control", ThemeValue::Color(Rgba::new(236, 233, 227, 255)));
    put("text", ThemeValue::Color(Rgba::new(28, 28, 30, 255)));
    put("accent", ThemeValue::Color(Rgba::new(51, 102, 204, 255)));
    put("alert", ThemeValue::Color(Rgba::new(204, 51, 51, 255)));
    put(
        "controlShadow",
        ThemeValue::Color(Rgba::new(0, 0, 0, 64)),
    );
    put(
        "controlHighlight",
        ThemeValue::Color(Rgba::new(255, 255, 255, 192)),
    );
    put(
        "textInactive",
        ThemeValue::Color(Rgba::new(120, 120, 124, 255)),
    );
    put("desktop", ThemeValue::Color(Rgba::new(210, 218, 226, 255)));

    put("Button.background", ThemeValue::Color(Rgba::new(226, 222, 214, 255)));
    put("Button.foreground", ThemeValue::Color(Rgba::new(28, 28, 30, 255)));
    put(
        "Button.shadow",
        ThemeValue::Deferred(Box::new(ColorAlias {
            target: "controlShadow",
        })),
    );
    put("Button.font", ThemeValue::Font(FontSpec::new("sans-serif", 13.0)));
    put("Button.margin", ThemeValue::Insets(Insets::new(2, 14, 2, 14)));
    put("Button.minimumSize", ThemeValue::Size(Size::new(72, 26)));
    put(
        "Button.border",
        ThemeValue::Border(Box::new(LineBorder {
            color: Rgba::new(122, 138, 153, 255),
            thickness: 1,
        })),
    );
    put("Button.arc", ThemeValue::Number(6.0));
    put("Button.opaque", ThemeValue::Bool(true));
    put(
        "Button.gradient",
        ThemeValue::Array(vec![
            ThemeValue::Number(0.3),
            ThemeValue::Color(Rgba::new(255, 255, 255, 255)),
            ThemeValue::Color(Rgba::new(226, 222, 214, 255)),
        ]),
    );

    put("CheckBox.icon", ThemeValue::Icon(Box::new(DotIcon {
        extent: 14,
        color: Rgba::new(51, 102, 204, 255),
    })));
    put("CheckBox.textIconGap", ThemeValue::Number(4.0));

    put("ToggleButton.icon", ThemeValue::Icon(Box::new(ToggleMarkIcon)));

    put("Tree.expandIcon", ThemeValue::Icon(Box::new(NativeHandleIcon)));
    put("Tree.rowHeight", ThemeValue::Number(18.0));
    put("Tree.lineTypeDashed", ThemeValue::Bool(false));

    put(
        "Panel.border",
        ThemeValue::Border(Box::new(LineBorder {
            color: Rgba::new(180, 180, 180, 255),
            thickness: 2,
        })),
    );
    put("Panel.font", ThemeValue::Font(FontSpec::new("serif", 12.0)));

    put("ToolTip.border", ThemeValue::Border(Box::new(EngravedBorder)));
    put(
        "ToolTip.font",
        ThemeValue::Font(FontSpec::new("sans-serif", 11.0).italic()),
    );

    put(
        "Slider.trackPainter",
        ThemeValue::Painter(Box::new(FillPainter {
            color: Rgba::new(51, 102, 204, 255),
        })),
    );
    put("Slider.thumbSize", ThemeValue::Size(Size::new(14, 14)));
    put("Slider.paintValue", ThemeValue::Bool(false));

    put(
        "Desktop.backgroundPainter",
        ThemeValue::Painter(Box::new(FocusRingPainter)),
    );

    put(
        "TextField.focusInputMap",
        ThemeValue::InputMap(
            InputMap::new("TextFieldFocusMap")
                .bind("ctrl C", "copy-to-clipboard")
                .bind("ctrl V", "paste-from-clipboard")
                .bind("ctrl X", "cut-to-clipboard")
                .bind("ENTER", "notify-field-accept"),
        ),
    );
    put("TextField.caretBlinkRate", ThemeValue::Number(500.0));
    put("TextField.margin", ThemeValue::Insets(Insets::uniform(2)));

    put("List.cellNoFocusBorder", ThemeValue::Insets(Insets::new(1, 1, 1, 1)));
    put("List.visibleRowCount", ThemeValue::Number(8.0));

    put("Table.gridColor", ThemeValue::Color(Rgba::new(192, 192, 192, 255)));
    put("Table.preferredViewportSize", ThemeValue::Size(Size::new(0, 0)));

    put("Spinner.loopFactory", ThemeValue::Deferred(Box::new(Unsettled)));

    put(
        "Button.titleFont",
        ThemeValue::Font(FontSpec::new("sans-serif", 15.0).bold()),
    );

    put(
        "ButtonUI",
        ThemeValue::Other(Some("daybreak.plaf.DaybreakButtonUI".to_string())),
    );
    put(
        "TreeUI",
        ThemeValue::Other(Some("daybreak.plaf.DaybreakTreeUI".to_string())),
    );
    put(
        "ToolTip.backgroundUI",
        ThemeValue::Other(Some("daybreak.plaf.DaybreakToolTipUI".to_string())),
    );

    put("Client.defaultsVersion", ThemeValue::Other(None));

    defaults
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use swatchbook_render::BucketPolicy;

    #[test]
    fn test_builtin_names_resolve() {
        for name in BUILTIN_NAMES {
            assert!(builtin(name).is_some());
        }
        assert!(builtin("no-such-theme").is_none());
    }

    #[test]
    fn test_daybreak_covers_every_value_kind() {
        let defaults = builtin(DEFAULT_THEME).unwrap();
        let mut kinds = BTreeMap::new();
        for value in defaults.values() {
            let kind = match value {
                ThemeValue::Color(_) => "color",
                ThemeValue::Font(_) => "font",
                ThemeValue::Size(_) => "size",
                ThemeValue::Insets(_) => "insets",
                ThemeValue::Border(_) => "border",
                ThemeValue::Painter(_) => "painter",
                ThemeValue::InputMap(_) => "input-map",
                ThemeValue::Icon(_) => "icon",
                ThemeValue::Array(_) => "array",
                ThemeValue::Number(_) => "number",
                ThemeValue::Bool(_) => "bool",
                ThemeValue::Deferred(_) => "deferred",
                ThemeValue::Other(_) => "other",
            };
            *kinds.entry(kind).or_insert(0usize) += 1;
        }
        for kind in [
            "color", "font", "size", "insets", "border", "painter", "input-map", "icon",
            "array", "number", "bool", "deferred", "other",
        ] {
            assert!(kinds.contains_key(kind), "daybreak is missing a {}", kind);
        }
    }

    #[test]
    fn test_component_policy_covers_daybreak_keys() {
        let policy = component_policy();
        assert_eq!(policy.bucket("control"), "Primary Colors");
        assert_eq!(policy.bucket("controlShadow"), "Secondary Colors");
        assert_eq!(policy.bucket("Button.background"), "Components - Button");
        assert_eq!(policy.bucket("ButtonUI"), "UI Classes");
        assert_eq!(policy.bucket("Client.defaultsVersion"), "Others");
    }

    #[test]
    fn test_color_alias_resolves_against_dictionary() {
        let defaults = builtin(DEFAULT_THEME).unwrap();
        let alias = ColorAlias {
            target: "controlShadow",
        };
        match alias.resolve(&defaults) {
            ThemeValue::Color(color) => assert_eq!(color.a, 64),
            other => panic!("expected a color, got {:?}", other),
        }
    }
}
