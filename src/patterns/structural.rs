// Structural pages: Adapter, Composite, Decorator, Facade, Proxy

use log::debug;
use std::cell::{Cell, OnceCell};

use super::PageContext;
use crate::error::Result;

// ============================================================================
// Adapter: make a legacy interface fit the one callers expect
// ============================================================================

pub trait Thermometer {
    fn celsius(&self) -> f64;
}

/// Third-party sensor that only speaks Fahrenheit.
pub struct FahrenheitSensor {
    reading: f64,
}

impl FahrenheitSensor {
    pub fn new(reading: f64) -> Self {
        Self { reading }
    }

    pub fn read_fahrenheit(&self) -> f64 {
        self.reading
    }
}

pub struct CelsiusAdapter {
    sensor: FahrenheitSensor,
}

impl CelsiusAdapter {
    pub fn new(sensor: FahrenheitSensor) -> Self {
        Self { sensor }
    }
}

impl Thermometer for CelsiusAdapter {
    fn celsius(&self) -> f64 {
        (self.sensor.read_fahrenheit() - 32.0) * 5.0 / 9.0
    }
}

pub struct NativeThermometer(pub f64);

impl Thermometer for NativeThermometer {
    fn celsius(&self) -> f64 {
        self.0
    }
}

pub fn adapter(ctx: &mut PageContext<'_>) -> Result<()> {
    let rooms: Vec<(&str, Box<dyn Thermometer>)> = vec![
        ("kitchen", Box::new(NativeThermometer(21.5)) as Box<dyn Thermometer>),
        (
            "garage",
            Box::new(CelsiusAdapter::new(FahrenheitSensor::new(50.0))),
        ),
    ];
    for (room, thermometer) in &rooms {
        writeln!(ctx.out, "{:<8} {:.1} C", room, thermometer.celsius())?;
    }
    Ok(())
}

// ============================================================================
// Composite: files and folders answer the same questions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Node {
    File { name: String, size: u64 },
    Folder { name: String, children: Vec<Node> },
}

impl Node {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Node::File {
            name: name.into(),
            size,
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File { name, .. } | Node::Folder { name, .. } => name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Node::File { size, .. } => *size,
            Node::Folder { children, .. } => children.iter().map(Node::size).sum(),
        }
    }

    pub fn file_count(&self) -> usize {
        match self {
            Node::File { .. } => 1,
            Node::Folder { children, .. } => children.iter().map(Node::file_count).sum(),
        }
    }

    /// Indented outline, two spaces per level.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(0, &mut lines);
        lines
    }

    fn outline_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            Node::File { name, size } => lines.push(format!("{}{} ({} B)", indent, name, size)),
            Node::Folder { name, children } => {
                lines.push(format!("{}{}/ ({} B)", indent, name, self.size()));
                for child in children {
                    child.outline_into(depth + 1, lines);
                }
            }
        }
    }
}

pub fn composite(ctx: &mut PageContext<'_>) -> Result<()> {
    let tree = Node::folder(
        "project",
        vec![
            Node::file("Cargo.toml", 420),
            Node::folder(
                "src",
                vec![Node::file("lib.rs", 1200), Node::file("main.rs", 300)],
            ),
            Node::folder("empty", vec![]),
        ],
    );

    for line in tree.outline() {
        writeln!(ctx.out, "{}", line)?;
    }
    writeln!(ctx.out, "{} files in {}", tree.file_count(), tree.name())?;
    Ok(())
}

// ============================================================================
// Decorator: stack behaviour around an object at runtime
// ============================================================================

pub trait Beverage {
    fn description(&self) -> String;
    /// Price in cents.
    fn cost(&self) -> u32;
}

pub struct Espresso;

impl Beverage for Espresso {
    fn description(&self) -> String {
        "espresso".to_string()
    }

    fn cost(&self) -> u32 {
        250
    }
}

pub struct Milk {
    inner: Box<dyn Beverage>,
}

impl Milk {
    pub fn wrap(inner: Box<dyn Beverage>) -> Box<dyn Beverage> {
        Box::new(Self { inner })
    }
}

impl Beverage for Milk {
    fn description(&self) -> String {
        format!("{} + milk", self.inner.description())
    }

    fn cost(&self) -> u32 {
        self.inner.cost() + 40
    }
}

pub struct Syrup {
    inner: Box<dyn Beverage>,
    flavour: String,
}

impl Syrup {
    pub fn wrap(inner: Box<dyn Beverage>, flavour: impl Into<String>) -> Box<dyn Beverage> {
        Box::new(Self {
            inner,
            flavour: flavour.into(),
        })
    }
}

impl Beverage for Syrup {
    fn description(&self) -> String {
        format!("{} + {} syrup", self.inner.description(), self.flavour)
    }

    fn cost(&self) -> u32 {
        self.inner.cost() + 60
    }
}

pub fn decorator(ctx: &mut PageContext<'_>) -> Result<()> {
    let plain: Box<dyn Beverage> = Box::new(Espresso);
    let fancy = Syrup::wrap(Milk::wrap(Milk::wrap(Box::new(Espresso))), "vanilla");

    for drink in [plain, fancy] {
        let cents = drink.cost();
        writeln!(
            ctx.out,
            "{}: ${}.{:02}",
            drink.description(),
            cents / 100,
            cents % 100
        )?;
    }
    Ok(())
}

// ============================================================================
// Facade: one call drives several subsystems
// ============================================================================

#[derive(Default)]
struct Amplifier {
    volume: u8,
}

#[derive(Default)]
struct Projector {
    input: Option<String>,
}

#[derive(Default)]
struct Lights {
    level: u8,
}

#[derive(Default)]
pub struct HomeTheater {
    amplifier: Amplifier,
    projector: Projector,
    lights: Lights,
}

impl HomeTheater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the steps taken, in order.
    pub fn watch_movie(&mut self, title: &str) -> Vec<String> {
        self.lights.level = 10;
        self.projector.input = Some("hdmi1".to_string());
        self.amplifier.volume = 35;
        vec![
            format!("lights dimmed to {}%", self.lights.level),
            format!(
                "projector on, input {}",
                self.projector.input.as_deref().unwrap_or("none")
            ),
            format!("amplifier volume {}", self.amplifier.volume),
            format!("playing '{}'", title),
        ]
    }

    pub fn end_movie(&mut self) -> Vec<String> {
        self.amplifier.volume = 0;
        self.projector.input = None;
        self.lights.level = 100;
        vec![
            "amplifier muted".to_string(),
            "projector off".to_string(),
            format!("lights up to {}%", self.lights.level),
        ]
    }

    pub fn is_playing(&self) -> bool {
        self.projector.input.is_some()
    }
}

pub fn facade(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut theater = HomeTheater::new();
    for step in theater.watch_movie("Metropolis") {
        writeln!(ctx.out, "  {}", step)?;
    }
    for step in theater.end_movie() {
        writeln!(ctx.out, "  {}", step)?;
    }
    Ok(())
}

// ============================================================================
// Proxy: defer an expensive load until first use
// ============================================================================

pub trait Image {
    fn filename(&self) -> &str;
    fn render(&self) -> String;
}

pub struct DiskImage {
    filename: String,
    pixels: usize,
}

impl DiskImage {
    pub fn load(filename: &str) -> Self {
        debug!("loading {} from disk", filename);
        Self {
            filename: filename.to_string(),
            // stand-in for decoding
            pixels: filename.len() * 1024,
        }
    }
}

impl Image for DiskImage {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn render(&self) -> String {
        format!("{} [{} px]", self.filename, self.pixels)
    }
}

pub struct LazyImage {
    filename: String,
    real: OnceCell<DiskImage>,
    loads: Cell<u32>,
}

impl LazyImage {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            real: OnceCell::new(),
            loads: Cell::new(0),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.real.get().is_some()
    }

    pub fn load_count(&self) -> u32 {
        self.loads.get()
    }

    fn real(&self) -> &DiskImage {
        self.real.get_or_init(|| {
            self.loads.set(self.loads.get() + 1);
            DiskImage::load(&self.filename)
        })
    }
}

impl Image for LazyImage {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn render(&self) -> String {
        self.real().render()
    }
}

pub fn proxy(ctx: &mut PageContext<'_>) -> Result<()> {
    let gallery: Vec<LazyImage> = ["sunset.png", "harbour.jpg", "map.gif"]
        .into_iter()
        .map(LazyImage::new)
        .collect();

    writeln!(ctx.out, "Listing without loading:")?;
    for image in &gallery {
        writeln!(ctx.out, "  {} (loaded: {})", image.filename(), image.is_loaded())?;
    }

    writeln!(ctx.out, "Opening the first image twice:")?;
    writeln!(ctx.out, "  {}", gallery[0].render())?;
    writeln!(ctx.out, "  {}", gallery[0].render())?;
    writeln!(ctx.out, "  disk loads: {}", gallery[0].load_count())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::render;

    #[test]
    fn test_adapter_converts() {
        let adapter = CelsiusAdapter::new(FahrenheitSensor::new(212.0));
        assert!((adapter.celsius() - 100.0).abs() < 1e-9);
        let freezing = CelsiusAdapter::new(FahrenheitSensor::new(32.0));
        assert!(freezing.celsius().abs() < 1e-9);
    }

    #[test]
    fn test_composite_sizes() {
        let tree = Node::folder(
            "root",
            vec![
                Node::file("a", 10),
                Node::folder("sub", vec![Node::file("b", 5), Node::folder("empty", vec![])]),
            ],
        );
        assert_eq!(tree.size(), 15);
        assert_eq!(tree.file_count(), 2);
        assert_eq!(
            tree.outline(),
            vec![
                "root/ (15 B)",
                "  a (10 B)",
                "  sub/ (5 B)",
                "    b (5 B)",
                "    empty/ (0 B)",
            ]
        );
    }

    #[test]
    fn test_decorator_stacks_costs() {
        let drink = Syrup::wrap(Milk::wrap(Box::new(Espresso)), "caramel");
        assert_eq!(drink.cost(), 350);
        assert_eq!(drink.description(), "espresso + milk + caramel syrup");
    }

    #[test]
    fn test_facade_round_trip() {
        let mut theater = HomeTheater::new();
        let steps = theater.watch_movie("Alien");
        assert_eq!(steps.last().map(String::as_str), Some("playing 'Alien'"));
        assert!(theater.is_playing());

        theater.end_movie();
        assert!(!theater.is_playing());
    }

    #[test]
    fn test_proxy_loads_once() {
        let image = LazyImage::new("cat.png");
        assert!(!image.is_loaded());
        assert_eq!(image.filename(), "cat.png");
        assert_eq!(image.load_count(), 0);

        let first = image.render();
        let second = image.render();
        assert_eq!(first, second);
        assert!(image.is_loaded());
        assert_eq!(image.load_count(), 1);
    }

    #[test]
    fn test_pages_render() {
        assert!(render(adapter).contains("garage   10.0 C"));
        assert!(render(composite).contains("3 files in project"));
        assert!(render(decorator).contains("espresso + milk + milk + vanilla syrup: $3.90"));
        assert!(render(facade).contains("playing 'Metropolis'"));
        assert!(render(proxy).contains("disk loads: 1"));
    }
}
