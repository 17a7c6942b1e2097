// Creational pages: Builder, Factory Method, Abstract Factory, Singleton, Prototype

use log::debug;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use super::PageContext;
use crate::error::{GalleryError, Result};

// ============================================================================
// Builder: fluent construction with defaults
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Burger {
    pub bun: String,
    pub patties: u8,
    pub cheese: bool,
    pub toppings: Vec<String>,
}

pub struct BurgerBuilder {
    bun: Option<String>,
    patties: Option<u8>,
    cheese: bool,
    toppings: Vec<String>,
}

impl BurgerBuilder {
    pub fn new() -> Self {
        Self {
            bun: None,
            patties: None,
            cheese: false,
            toppings: Vec::new(),
        }
    }

    pub fn bun(mut self, bun: impl Into<String>) -> Self {
        self.bun = Some(bun.into());
        self
    }

    pub fn patties(mut self, count: u8) -> Self {
        self.patties = Some(count);
        self
    }

    pub fn cheese(mut self) -> Self {
        self.cheese = true;
        self
    }

    pub fn topping(mut self, topping: impl Into<String>) -> Self {
        self.toppings.push(topping.into());
        self
    }

    pub fn build(self) -> Burger {
        Burger {
            bun: self.bun.unwrap_or_else(|| "sesame".to_string()),
            patties: self.patties.unwrap_or(1).max(1),
            cheese: self.cheese,
            toppings: self.toppings,
        }
    }
}

impl Default for BurgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Burger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bun, {} patt", self.bun, self.patties)?;
        write!(f, "{}", if self.patties == 1 { "y" } else { "ies" })?;
        if self.cheese {
            write!(f, ", cheese")?;
        }
        for topping in &self.toppings {
            write!(f, ", {}", topping)?;
        }
        Ok(())
    }
}

pub fn builder(ctx: &mut PageContext<'_>) -> Result<()> {
    let plain = BurgerBuilder::new().build();
    let deluxe = BurgerBuilder::new()
        .bun("brioche")
        .patties(2)
        .cheese()
        .topping("pickles")
        .topping("onion")
        .build();

    writeln!(ctx.out, "Plain:  {}", plain)?;
    writeln!(ctx.out, "Deluxe: {}", deluxe)?;
    Ok(())
}

// ============================================================================
// Factory Method: pick a concrete type from a runtime tag
// ============================================================================

pub trait Shape {
    fn name(&self) -> &'static str;
    fn area(&self) -> f64;
}

struct Circle {
    radius: f64,
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

struct Square {
    side: f64,
}

impl Shape for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn area(&self) -> f64 {
        self.side * self.side
    }
}

struct Triangle {
    side: f64,
}

impl Shape for Triangle {
    fn name(&self) -> &'static str {
        "triangle"
    }

    fn area(&self) -> f64 {
        // equilateral
        3f64.sqrt() / 4.0 * self.side * self.side
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "square" => Ok(ShapeKind::Square),
            "triangle" => Ok(ShapeKind::Triangle),
            other => Err(format!("no such shape: {}", other)),
        }
    }
}

pub fn make_shape(kind: ShapeKind, size: f64) -> Box<dyn Shape> {
    match kind {
        ShapeKind::Circle => Box::new(Circle { radius: size }),
        ShapeKind::Square => Box::new(Square { side: size }),
        ShapeKind::Triangle => Box::new(Triangle { side: size }),
    }
}

pub fn factory_method(ctx: &mut PageContext<'_>) -> Result<()> {
    for tag in ["circle", "square", "triangle", "hexagon"] {
        match tag.parse::<ShapeKind>() {
            Ok(kind) => {
                let shape = make_shape(kind, 2.0);
                writeln!(ctx.out, "{:<8} area {:.2}", shape.name(), shape.area())?;
            }
            Err(reason) => writeln!(ctx.out, "{:<8} skipped ({})", tag, reason)?,
        }
    }
    Ok(())
}

// ============================================================================
// Abstract Factory: families of widgets that belong together
// ============================================================================

pub trait Button {
    fn render(&self, label: &str) -> String;
}

pub trait Checkbox {
    fn render(&self, checked: bool) -> String;
}

pub trait WidgetFactory {
    fn theme(&self) -> &'static str;
    fn button(&self) -> Box<dyn Button>;
    fn checkbox(&self) -> Box<dyn Checkbox>;
}

struct LightButton;
struct LightCheckbox;
struct DarkButton;
struct DarkCheckbox;

impl Button for LightButton {
    fn render(&self, label: &str) -> String {
        format!("( {} )", label)
    }
}

impl Checkbox for LightCheckbox {
    fn render(&self, checked: bool) -> String {
        if checked { "[x]" } else { "[ ]" }.to_string()
    }
}

impl Button for DarkButton {
    fn render(&self, label: &str) -> String {
        format!("<# {} #>", label.to_uppercase())
    }
}

impl Checkbox for DarkCheckbox {
    fn render(&self, checked: bool) -> String {
        if checked { "[#]" } else { "[.]" }.to_string()
    }
}

pub struct LightTheme;
pub struct DarkTheme;

impl WidgetFactory for LightTheme {
    fn theme(&self) -> &'static str {
        "light"
    }

    fn button(&self) -> Box<dyn Button> {
        Box::new(LightButton)
    }

    fn checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(LightCheckbox)
    }
}

impl WidgetFactory for DarkTheme {
    fn theme(&self) -> &'static str {
        "dark"
    }

    fn button(&self) -> Box<dyn Button> {
        Box::new(DarkButton)
    }

    fn checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(DarkCheckbox)
    }
}

/// Renders a tiny settings form using only what `factory` hands out.
pub fn render_form(factory: &dyn WidgetFactory) -> String {
    let button = factory.button();
    let checkbox = factory.checkbox();
    format!(
        "{} Remember me  {}",
        checkbox.render(true),
        button.render("Save")
    )
}

pub fn abstract_factory(ctx: &mut PageContext<'_>) -> Result<()> {
    let factories: [&dyn WidgetFactory; 2] = [&LightTheme, &DarkTheme];
    for factory in factories {
        writeln!(ctx.out, "{:<5}: {}", factory.theme(), render_form(factory))?;
    }
    Ok(())
}

// ============================================================================
// Singleton: one shared colour picker for the whole process
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GalleryError::invalid_config("color", format!("'{}' is not #rrggbb", s));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Picks older than this are dropped from the history.
pub const PICK_HISTORY_LIMIT: usize = 32;

#[derive(Debug)]
pub struct ColorPicker {
    current: Rgb,
    history: Vec<Rgb>,
}

impl ColorPicker {
    fn new() -> Self {
        Self {
            current: Rgb(0, 0, 0),
            history: Vec::new(),
        }
    }

    pub fn shared() -> &'static Mutex<ColorPicker> {
        static PICKER: OnceLock<Mutex<ColorPicker>> = OnceLock::new();
        PICKER.get_or_init(|| {
            debug!("creating the shared colour picker");
            Mutex::new(ColorPicker::new())
        })
    }

    pub fn pick(&mut self, color: Rgb) {
        if self.history.len() == PICK_HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(self.current);
        self.current = color;
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn history(&self) -> &[Rgb] {
        &self.history
    }
}

fn with_picker<R>(f: impl FnOnce(&mut ColorPicker) -> R) -> R {
    // A poisoned lock still holds a usable picker
    let mut guard = ColorPicker::shared()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut *guard)
}

pub fn singleton(ctx: &mut PageContext<'_>) -> Result<()> {
    let toolbar_pick: Rgb = "#ff8800".parse()?;
    with_picker(|picker| picker.pick(toolbar_pick));

    // A different "screen" reaches the same instance
    let seen_elsewhere = with_picker(|picker| picker.current());
    writeln!(ctx.out, "Toolbar picked {}", toolbar_pick)?;
    writeln!(ctx.out, "Canvas sees    {}", seen_elsewhere)?;
    writeln!(
        ctx.out,
        "Same instance: {}",
        std::ptr::eq(ColorPicker::shared(), ColorPicker::shared())
    )?;
    Ok(())
}

// ============================================================================
// Prototype: clone a configured object and tweak the copy
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub title: String,
    pub background: Rgb,
    pub bullets: Vec<String>,
}

pub fn prototype(ctx: &mut PageContext<'_>) -> Result<()> {
    let template = Slide {
        title: "Template".to_string(),
        background: Rgb(0x20, 0x20, 0x40),
        bullets: vec!["Intro".to_string()],
    };

    let mut copy = template.clone();
    copy.title = "Quarterly results".to_string();
    copy.bullets.push("Revenue".to_string());

    writeln!(ctx.out, "Template: {} {:?}", template.title, template.bullets)?;
    writeln!(ctx.out, "Copy:     {} {:?}", copy.title, copy.bullets)?;
    writeln!(
        ctx.out,
        "Shared background: {}",
        template.background == copy.background
    )?;
    Ok(())
}
