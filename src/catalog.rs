//! The list of pages, grouped by pattern family, and lookup by name.

use log::info;
use std::fmt;
use std::str::FromStr;

use crate::error::{GalleryError, Result};
use crate::patterns::{behavioral, creational, structural, PageContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Creational,
        Category::Structural,
        Category::Behavioral,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Creational => "creational",
            Category::Structural => "structural",
            Category::Behavioral => "behavioral",
        };
        f.pad(name)
    }
}

impl FromStr for Category {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creational" => Ok(Category::Creational),
            "structural" => Ok(Category::Structural),
            "behavioral" | "behavioural" => Ok(Category::Behavioral),
            other => Err(GalleryError::invalid_config(
                "category",
                format!("'{}' is not creational, structural or behavioral", other),
            )),
        }
    }
}

pub type PageFn = fn(&mut PageContext<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Page {
    pub name: &'static str,
    pub category: Category,
    pub summary: &'static str,
    pub run: PageFn,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

const fn page(name: &'static str, category: Category, summary: &'static str, run: PageFn) -> Page {
    Page {
        name,
        category,
        summary,
        run,
    }
}

static PAGES: [Page; 18] = [
    page("builder", Category::Creational, "fluent step-by-step construction", creational::builder),
    page("factory-method", Category::Creational, "concrete type chosen from a runtime tag", creational::factory_method),
    page("abstract-factory", Category::Creational, "families of matching widgets", creational::abstract_factory),
    page("singleton", Category::Creational, "one shared colour picker", creational::singleton),
    page("prototype", Category::Creational, "clone a configured object", creational::prototype),
    page("adapter", Category::Structural, "Fahrenheit sensor behind a Celsius interface", structural::adapter),
    page("composite", Category::Structural, "files and folders treated alike", structural::composite),
    page("decorator", Category::Structural, "coffee with stacked add-ons", structural::decorator),
    page("facade", Category::Structural, "one call drives a home theater", structural::facade),
    page("proxy", Category::Structural, "lazy image loading", structural::proxy),
    page("strategy", Category::Behavioral, "Hoare vs Lomuto quicksort", behavioral::strategy),
    page("observer", Category::Behavioral, "weak and strong listeners", behavioral::observer),
    page("mediator", Category::Behavioral, "chat room", behavioral::mediator),
    page("command", Category::Behavioral, "undo and redo", behavioral::command),
    page("iterator", Category::Behavioral, "walking a stack", behavioral::iterator),
    page("memento", Category::Behavioral, "checkpoints in a key-value store", behavioral::memento),
    page("state", Category::Behavioral, "publishing workflow", behavioral::state),
    page("chain-of-responsibility", Category::Behavioral, "support escalation", behavioral::chain_of_responsibility),
];

pub fn pages() -> &'static [Page] {
    &PAGES
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Page> {
    PAGES.iter().filter(move |p| p.category == category)
}

/// Looks a page up by name, ignoring case and treating `_` like `-`.
pub fn find(name: &str) -> Result<&'static Page> {
    let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
    PAGES
        .iter()
        .find(|p| p.name == wanted)
        .ok_or_else(|| GalleryError::UnknownPage {
            name: name.to_string(),
            suggestion: closest_name(&wanted),
        })
}

pub fn run_page(page: &Page, ctx: &mut PageContext<'_>) -> Result<()> {
    info!("running page '{}' ({})", page.name, page.category);
    (page.run)(ctx)
}

/// Runs every page in catalog order, each under its own header.
pub fn run_all(ctx: &mut PageContext<'_>) -> Result<usize> {
    for page in pages() {
        writeln!(ctx.out, "=== {} ({}) ===", page.name, page.category)?;
        run_page(page, ctx)?;
        writeln!(ctx.out)?;
    }
    Ok(PAGES.len())
}

// ============================================================================
// Typo recovery
// ============================================================================

pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row instead of the full matrix
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

const MAX_SUGGESTION_DISTANCE: usize = 2;

fn closest_name(typo: &str) -> Option<String> {
    PAGES
        .iter()
        .map(|p| (levenshtein_distance(typo, p.name), p.name))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let names: HashSet<&str> = pages().iter().map(|p| p.name).collect();
        assert_eq!(names.len(), pages().len());
    }

    #[test]
    fn test_every_category_populated() {
        for category in Category::ALL {
            assert!(by_category(category).count() >= 5, "{} too small", category);
        }
    }

    #[test]
    fn test_find_normalises() {
        assert_eq!(find("Factory_Method").unwrap().name, "factory-method");
        assert_eq!(find(" observer ").unwrap().category, Category::Behavioral);
    }

    #[test]
    fn test_find_suggests() {
        let err = find("obsrver").unwrap_err();
        assert_eq!(err.suggestion(), Some("observer"));

        let err = find("quantum").unwrap_err();
        assert!(matches!(err, GalleryError::UnknownPage { suggestion: None, .. }));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("proxy", "proxy"), 0);
        assert_eq!(levenshtein_distance("stat", "state"), 1);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Behavioural".parse::<Category>().unwrap(), Category::Behavioral);
        assert!("creative".parse::<Category>().is_err());
        assert_eq!(format!("{:<12}|", Category::Structural), "structural  |");
    }

    #[test]
    fn test_run_all_renders_every_page() {
        let config = GalleryConfig::default();
        let mut buffer: Vec<u8> = Vec::new();
        let count = {
            let mut ctx = PageContext::new(&mut buffer, &config);
            run_all(&mut ctx).unwrap()
        };
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(count, pages().len());
        for page in pages() {
            assert!(output.contains(&format!("=== {} ({}) ===", page.name, page.category)));
        }
    }
}
