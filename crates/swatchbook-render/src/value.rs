//! The typed value universe of a theme defaults dictionary.
//!
//! A dictionary maps string keys to values drawn from an open set of runtime
//! types. All "what kind of value is this" logic is isolated here, at
//! ingestion time: providers classify their raw values into the closed
//! [`ThemeValue`] variant, and the dispatcher only ever matches on it.
//!
//! Procedural values (borders, painters, icons) are trait objects because
//! their preview is produced by running code, and that code may legitimately
//! fail at paint time: many real implementations assume a fully-initialized
//! owning component. Their paint methods therefore return `Result<(), String>`
//! and the dispatcher treats any error as a per-entry skip-paint, never as a
//! run failure.

use std::collections::BTreeMap;
use std::fmt;

use crate::canvas::Canvas;
use crate::color::Rgba;

/// An ordered defaults dictionary.
///
/// `BTreeMap` keeps keys unique and iteration lexicographic, which is exactly
/// the deterministic row order the report wants.
pub type Dictionary = BTreeMap<String, ThemeValue>;

/// A font request: family, point size, and style flags.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    /// Creates a regular-weight, upright font spec.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        FontSpec {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Marks the spec bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the spec italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Short textual form, e.g. `Inter 12pt bold`.
    pub fn describe(&self) -> String {
        let mut out = format!("{} {}pt", self.family, self.size);
        if self.bold {
            out.push_str(" bold");
        }
        if self.italic {
            out.push_str(" italic");
        }
        out
    }
}

/// A 2D pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    pub fn describe(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

/// Edge insets, clockwise from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Insets {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Insets {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Uniform insets on all four edges.
    pub const fn uniform(value: u32) -> Self {
        Insets::new(value, value, value, value)
    }

    pub fn describe(&self) -> String {
        format!("({},{},{},{})", self.top, self.right, self.bottom, self.left)
    }
}

/// A named map from key chords to action names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputMap {
    /// Display name for the disclosure summary.
    pub name: String,
    /// Bindings, kept sorted by chord for deterministic output.
    pub bindings: BTreeMap<String, String>,
}

impl InputMap {
    pub fn new(name: impl Into<String>) -> Self {
        InputMap {
            name: name.into(),
            bindings: BTreeMap::new(),
        }
    }

    /// Adds a binding, builder style.
    pub fn bind(mut self, chord: impl Into<String>, action: impl Into<String>) -> Self {
        self.bindings.insert(chord.into(), action.into());
        self
    }
}

/// A synthetic host component handed to painters and icons.
///
/// Some icon implementations branch on the concrete role of the component
/// they are painted against; the dispatcher retries paint attempts across
/// these roles before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostComponent {
    /// A minimal, role-less component.
    Generic,
    /// A toggle-button-like host.
    ToggleButton,
    /// A selector (combo/list) host.
    Selector,
    /// A menu-item-like host.
    MenuItem,
}

impl HostComponent {
    /// The ordered fallback sequence for icon painting.
    pub const PAINT_FALLBACKS: [HostComponent; 4] = [
        HostComponent::Generic,
        HostComponent::ToggleButton,
        HostComponent::Selector,
        HostComponent::MenuItem,
    ];

    /// The host's role name, for logs and error messages.
    pub fn role(&self) -> &'static str {
        match self {
            HostComponent::Generic => "generic",
            HostComponent::ToggleButton => "toggle-button",
            HostComponent::Selector => "selector",
            HostComponent::MenuItem => "menu-item",
        }
    }
}

/// A border that knows its insets and can paint itself onto a canvas.
pub trait BorderPaint {
    /// The insets the border requires around its content.
    fn insets(&self) -> Insets;

    /// Paints the border onto `canvas`, which is already sized to the
    /// insets plus the content rectangle.
    fn paint(&self, canvas: &mut Canvas) -> Result<(), String>;
}

/// A procedural drawing object painted against a synthetic host.
pub trait PainterPaint {
    /// Short textual form, typically the painter's type or purpose.
    fn describe(&self) -> String;

    /// Paints into the given area of `canvas`.
    fn paint(
        &self,
        canvas: &mut Canvas,
        host: &HostComponent,
        width: u32,
        height: u32,
    ) -> Result<(), String>;
}

/// An icon with reported dimensions and host-dependent painting.
pub trait IconPaint {
    /// Reported width; non-positive values are substituted before painting.
    fn width(&self) -> i32;

    /// Reported height; non-positive values are substituted before painting.
    fn height(&self) -> i32;

    /// Paints the icon at the canvas origin against the given host.
    fn paint(&self, canvas: &mut Canvas, host: &HostComponent) -> Result<(), String>;
}

/// A dictionary entry whose real value is computed on demand.
///
/// Resolution is read-only with respect to the dictionary: it may look other
/// entries up, but produces a fresh value rather than mutating anything.
pub trait DeferredValue {
    /// Description of the factory itself, shown alongside the resolved value.
    fn describe(&self) -> String;

    /// Forces the value against the dictionary.
    fn resolve(&self, defaults: &Dictionary) -> ThemeValue;
}

/// A theme value, classified into one case per rendering strategy.
pub enum ThemeValue {
    Color(Rgba),
    Font(FontSpec),
    Size(Size),
    Insets(Insets),
    Border(Box<dyn BorderPaint>),
    Painter(Box<dyn PainterPaint>),
    InputMap(InputMap),
    Icon(Box<dyn IconPaint>),
    Array(Vec<ThemeValue>),
    Number(f64),
    Bool(bool),
    Deferred(Box<dyn DeferredValue>),
    /// Anything else: a generic textual description, or a null marker.
    Other(Option<String>),
}

impl ThemeValue {
    /// Generic textual description, used for array elements and the
    /// fallback rendering case.
    pub fn describe(&self) -> String {
        match self {
            ThemeValue::Color(color) => format!("Color({})", color.tuple()),
            ThemeValue::Font(font) => font.describe(),
            ThemeValue::Size(size) => size.describe(),
            ThemeValue::Insets(insets) => insets.describe(),
            ThemeValue::Border(border) => format!("Border {}", border.insets().describe()),
            ThemeValue::Painter(painter) => painter.describe(),
            ThemeValue::InputMap(map) => map.name.clone(),
            ThemeValue::Icon(icon) => format!("Icon {} * {}", icon.width(), icon.height()),
            ThemeValue::Array(items) => format!("{} elements", items.len()),
            ThemeValue::Number(n) => n.to_string(),
            ThemeValue::Bool(b) => b.to_string(),
            ThemeValue::Deferred(lazy) => lazy.describe(),
            ThemeValue::Other(Some(text)) => text.clone(),
            ThemeValue::Other(None) => "null".to_string(),
        }
    }
}

// Manual Debug: the trait-object cases have no derivable representation.
impl fmt::Debug for ThemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThemeValue({})", self.describe())
    }
}
