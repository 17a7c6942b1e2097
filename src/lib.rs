// Pattern Gallery
// Classic Creational, Structural and Behavioral design patterns as small,
// self-contained pages, plus the reusable pieces a few of them are built on.

pub mod catalog;
pub mod config;
pub mod error;
pub mod mediator;
pub mod observer;
pub mod patterns;
pub mod sorting;
pub mod stack;
pub mod storage;

pub use catalog::{Category, Page};
pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use mediator::{Colleague, Mediator};
pub use observer::{MulticastRegistry, Retention};
pub use patterns::PageContext;
pub use sorting::{SortAlgorithm, SortStrategy, Sorter};
pub use stack::Stack;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

pub mod examples {
    //! # Pattern Gallery
    //!
    //! ## Creational
    //! - Builder, Factory Method, Abstract Factory
    //! - Singleton (shared colour picker)
    //! - Prototype
    //!
    //! ## Structural
    //! - Adapter, Composite, Decorator, Facade, Proxy
    //!
    //! ## Behavioral
    //! - Strategy (Hoare and Lomuto quicksort)
    //! - Observer (weak/strong multicast registry)
    //! - Mediator, Command, Iterator (generic stack)
    //! - Memento (key-value store), State, Chain of Responsibility
    //!
    //! Run pages with:
    //! ```bash
    //! cargo run --bin gallery -- list
    //! cargo run --bin gallery -- run strategy observer
    //! cargo run --bin gallery -- all
    //! cargo run --bin gallery -- sort --algorithm lomuto 5 3 9 1
    //! ```
}
