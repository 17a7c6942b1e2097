// Behavioral pages: Strategy, Observer, Mediator, Command, Iterator, Memento,
// State, Chain of Responsibility

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::PageContext;
use crate::config::SortConfig;
use crate::error::Result;
use crate::mediator::{Colleague, Mediator, Participant};
use crate::observer::{MulticastRegistry, Retention};
use crate::sorting::{count_comparisons, SortAlgorithm, Sorter};
use crate::stack::Stack;
use crate::storage::{load_json, save_json, JsonFileStore, KeyValueStore, MemoryStore};

// ============================================================================
// Strategy: Hoare vs Lomuto on the same input
// ============================================================================

/// Random integers in `0..100`; reproducible when the config carries a seed.
pub fn sample(config: &SortConfig) -> Vec<i32> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..config.sample_size).map(|_| rng.gen_range(0..100)).collect()
}

pub fn strategy(ctx: &mut PageContext<'_>) -> Result<()> {
    let configured = ctx.config.sort.algorithm;
    let data = sample(&ctx.config.sort);
    writeln!(ctx.out, "Input ({} items): {:?}", data.len(), data)?;

    for algorithm in SortAlgorithm::ALL {
        let mut copy = data.clone();
        let comparisons = count_comparisons(algorithm, &mut copy);
        let marker = if algorithm == configured { "*" } else { " " };
        writeln!(
            ctx.out,
            "{} {:<7} {} comparisons",
            marker,
            algorithm.to_string(),
            comparisons
        )?;
    }

    let sorter: Sorter<i32> = configured.into();
    let mut sorted = data;
    sorter.sort(&mut sorted);
    writeln!(ctx.out, "{}: {:?}", sorter.strategy_name(), sorted)?;
    Ok(())
}

// ============================================================================
// Observer: one thermostat, weakly and strongly held listeners
// ============================================================================

pub trait TemperatureListener {
    fn name(&self) -> &str;
    fn on_reading(&self, celsius: f64);
}

pub struct PanelDisplay {
    name: String,
    last: Cell<Option<f64>>,
}

impl PanelDisplay {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            last: Cell::new(None),
        })
    }

    pub fn last(&self) -> Option<f64> {
        self.last.get()
    }
}

impl TemperatureListener for PanelDisplay {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_reading(&self, celsius: f64) {
        self.last.set(Some(celsius));
    }
}

#[derive(Default)]
pub struct ReadingLog {
    readings: RefCell<Vec<f64>>,
}

impl ReadingLog {
    pub fn readings(&self) -> Vec<f64> {
        self.readings.borrow().clone()
    }
}

impl TemperatureListener for ReadingLog {
    fn name(&self) -> &str {
        "log"
    }

    fn on_reading(&self, celsius: f64) {
        self.readings.borrow_mut().push(celsius);
    }
}

#[derive(Default)]
pub struct Thermostat {
    listeners: MulticastRegistry<dyn TemperatureListener>,
}

impl Thermostat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: &Rc<dyn TemperatureListener>, retention: Retention) {
        debug!("{} subscribed ({:?})", listener.name(), retention);
        self.listeners.add(listener, retention);
    }

    /// Publishes a reading and returns the names of the listeners reached.
    pub fn publish(&mut self, celsius: f64) -> Vec<String> {
        let mut reached = Vec::new();
        self.listeners.invoke(|listener| {
            listener.on_reading(celsius);
            reached.push(listener.name().to_string());
        });
        reached
    }
}

pub fn observer(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut thermostat = Thermostat::new();

    let display = PanelDisplay::new("hall display");
    let display_handle: Rc<dyn TemperatureListener> = display.clone();
    thermostat.subscribe(&display_handle, Retention::Weak);

    let log = Rc::new(ReadingLog::default());
    let log_handle: Rc<dyn TemperatureListener> = log.clone();
    thermostat.subscribe(&log_handle, Retention::Strong);
    // The thermostat now keeps the log alive on its own
    drop(log_handle);

    let reached = thermostat.publish(21.0);
    writeln!(ctx.out, "21.0 C reached: {}", reached.join(", "))?;
    writeln!(ctx.out, "display shows {:?}", display.last())?;

    drop(display_handle);
    drop(display);
    let reached = thermostat.publish(19.5);
    writeln!(ctx.out, "display dropped; 19.5 C reached: {}", reached.join(", "))?;
    writeln!(ctx.out, "log holds {:?}", log.readings())?;
    Ok(())
}

// ============================================================================
// Mediator: chat room
// ============================================================================

pub fn mediator(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut room: Mediator<String> = Mediator::new();
    let ada = Participant::new("ada");
    let grace = Participant::new("grace");
    let linus = Participant::new("linus");

    let handles: Vec<Rc<dyn Colleague<String>>> = [&ada, &grace, &linus]
        .into_iter()
        .map(|p| Rc::clone(p) as Rc<dyn Colleague<String>>)
        .collect();
    for handle in &handles {
        room.join(handle);
    }

    room.broadcast(&handles[0], &"standup in 5".to_string());
    room.send_to(&handles[1], "linus", &"review my patch?".to_string());

    for person in [&ada, &grace, &linus] {
        writeln!(ctx.out, "{}'s inbox:", person.name())?;
        for (from, text) in person.inbox() {
            writeln!(ctx.out, "  {}: {}", from, text)?;
        }
    }
    writeln!(ctx.out, "members: {}", room.members().join(", "))?;
    Ok(())
}

// ============================================================================
// Command: undo/redo over a text buffer
// ============================================================================

pub trait Command {
    fn label(&self) -> String;
    fn execute(&mut self, doc: &mut String);
    fn undo(&mut self, doc: &mut String);
}

pub struct Append {
    text: String,
}

impl Append {
    pub fn new(text: impl Into<String>) -> Box<dyn Command> {
        Box::new(Self { text: text.into() })
    }
}

impl Command for Append {
    fn label(&self) -> String {
        format!("append {:?}", self.text)
    }

    fn execute(&mut self, doc: &mut String) {
        doc.push_str(&self.text);
    }

    fn undo(&mut self, doc: &mut String) {
        let len = doc.len().saturating_sub(self.text.len());
        doc.truncate(len);
    }
}

/// Deletes the last `count` characters and remembers them for undo.
pub struct DeleteTail {
    count: usize,
    removed: String,
}

impl DeleteTail {
    pub fn new(count: usize) -> Box<dyn Command> {
        Box::new(Self {
            count,
            removed: String::new(),
        })
    }
}

impl Command for DeleteTail {
    fn label(&self) -> String {
        format!("delete {} char(s)", self.count)
    }

    fn execute(&mut self, doc: &mut String) {
        let keep = doc.chars().count().saturating_sub(self.count);
        let split = doc
            .char_indices()
            .nth(keep)
            .map(|(index, _)| index)
            .unwrap_or(doc.len());
        self.removed = doc.split_off(split);
    }

    fn undo(&mut self, doc: &mut String) {
        doc.push_str(&self.removed);
    }
}

#[derive(Default)]
pub struct TextEditor {
    doc: String,
    done: Stack<Box<dyn Command>>,
    undone: Stack<Box<dyn Command>>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.doc
    }

    pub fn run(&mut self, mut command: Box<dyn Command>) {
        debug!("run: {}", command.label());
        command.execute(&mut self.doc);
        self.done.push(command);
        // A new edit invalidates the redo history
        self.undone.clear();
    }

    pub fn undo(&mut self) -> bool {
        match self.done.pop() {
            Some(mut command) => {
                command.undo(&mut self.doc);
                self.undone.push(command);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(mut command) => {
                command.execute(&mut self.doc);
                self.done.push(command);
                true
            }
            None => false,
        }
    }

    /// Labels of the undoable commands, most recent first.
    pub fn history(&self) -> Vec<String> {
        self.done.iter().map(|c| c.label()).collect()
    }
}

pub fn command(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut editor = TextEditor::new();
    editor.run(Append::new("Hello"));
    editor.run(Append::new(", world"));
    editor.run(DeleteTail::new(5));
    writeln!(ctx.out, "after edits: {:?}", editor.text())?;
    writeln!(ctx.out, "history:     {:?}", editor.history())?;

    editor.undo();
    writeln!(ctx.out, "undo:        {:?}", editor.text())?;
    editor.undo();
    writeln!(ctx.out, "undo:        {:?}", editor.text())?;
    editor.redo();
    writeln!(ctx.out, "redo:        {:?}", editor.text())?;
    Ok(())
}

// ============================================================================
// Iterator: walking a stack without draining it
// ============================================================================

pub fn iterator(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut visited: Stack<&str> = Stack::new();
    for page in ["home", "search", "results", "article"] {
        visited.push(page);
    }

    writeln!(ctx.out, "pushed:    {}", visited)?;
    let newest_first: Vec<&str> = visited.iter().copied().collect();
    writeln!(ctx.out, "iterated:  {:?}", newest_first)?;
    writeln!(ctx.out, "still {} entries, top {:?}", visited.len(), visited.peek())?;

    visited.pop();
    let back: Vec<&str> = visited.into_iter().collect();
    writeln!(ctx.out, "after back: {:?}", back)?;
    Ok(())
}

// ============================================================================
// Memento: checkpoints through the key-value store
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteMemento {
    text: String,
    cursor: usize,
}

#[derive(Debug, Default)]
pub struct Notepad {
    text: String,
    cursor: usize,
}

impl Notepad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_text(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn save(&self) -> NoteMemento {
        NoteMemento {
            text: self.text.clone(),
            cursor: self.cursor,
        }
    }

    pub fn restore(&mut self, memento: NoteMemento) {
        self.text = memento.text;
        let mut cursor = memento.cursor.min(self.text.len());
        // Snap back onto a char boundary so later inserts cannot split one
        while !self.text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }
}

/// Keeps named checkpoints of a [`Notepad`] in any [`KeyValueStore`].
pub struct Caretaker<'s> {
    store: &'s mut dyn KeyValueStore,
}

impl<'s> Caretaker<'s> {
    pub fn new(store: &'s mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn checkpoint(&mut self, name: &str, notepad: &Notepad) -> Result<()> {
        save_json(&mut *self.store, &checkpoint_key(name), &notepad.save())
    }

    /// Restores checkpoint `name`; `false` when no such checkpoint exists.
    pub fn rollback(&self, name: &str, notepad: &mut Notepad) -> Result<bool> {
        match load_json::<_, NoteMemento>(&*self.store, &checkpoint_key(name))? {
            Some(memento) => {
                notepad.restore(memento);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn checkpoints(&self) -> Vec<String> {
        self.store
            .keys()
            .into_iter()
            .filter_map(|k| k.strip_prefix("notepad/").map(str::to_string))
            .collect()
    }
}

fn checkpoint_key(name: &str) -> String {
    format!("notepad/{}", name)
}

pub fn memento(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut store: Box<dyn KeyValueStore> = match &ctx.config.storage.path {
        Some(path) => {
            info!("memento checkpoints go to {}", path.display());
            Box::new(JsonFileStore::open(path)?)
        }
        None => Box::new(MemoryStore::new()),
    };
    let mut caretaker = Caretaker::new(&mut *store);

    let mut notepad = Notepad::new();
    notepad.type_text("Dear diary,");
    caretaker.checkpoint("greeting", &notepad)?;
    notepad.type_text(" today I deleted production.");
    writeln!(ctx.out, "draft:    {:?}", notepad.text())?;

    caretaker.rollback("greeting", &mut notepad)?;
    writeln!(ctx.out, "restored: {:?} (cursor {})", notepad.text(), notepad.cursor())?;
    let missing = caretaker.rollback("nope", &mut notepad)?;
    writeln!(ctx.out, "unknown checkpoint restored: {}", missing)?;
    writeln!(ctx.out, "checkpoints: {:?}", caretaker.checkpoints())?;
    Ok(())
}

// ============================================================================
// State: publishing workflow
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Draft,
    Review,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Approve,
    Reject,
    Archive,
}

impl Stage {
    pub fn apply(self, action: Action) -> std::result::Result<Stage, String> {
        match (self, action) {
            (Stage::Draft, Action::Submit) => Ok(Stage::Review),
            (Stage::Review, Action::Approve) => Ok(Stage::Published),
            (Stage::Review, Action::Reject) => Ok(Stage::Draft),
            (Stage::Published, Action::Archive) => Ok(Stage::Archived),
            (stage, action) => Err(format!("cannot {:?} while {}", action, stage)),
        }
    }

    pub fn is_final(self) -> bool {
        self == Stage::Archived
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Draft => "draft",
            Stage::Review => "in review",
            Stage::Published => "published",
            Stage::Archived => "archived",
        };
        write!(f, "{}", label)
    }
}

pub fn state(ctx: &mut PageContext<'_>) -> Result<()> {
    let mut stage = Stage::Draft;
    let script = [
        Action::Submit,
        Action::Reject,
        Action::Approve,
        Action::Submit,
        Action::Approve,
        Action::Archive,
    ];

    writeln!(ctx.out, "start: {}", stage)?;
    for action in script {
        match stage.apply(action) {
            Ok(next) => {
                writeln!(ctx.out, "{:?}: {} -> {}", action, stage, next)?;
                stage = next;
            }
            Err(reason) => writeln!(ctx.out, "{:?}: refused, {}", action, reason)?,
        }
    }
    writeln!(ctx.out, "final: {} (terminal: {})", stage, stage.is_final())?;
    Ok(())
}

// ============================================================================
// Chain of Responsibility: support escalation
// ============================================================================

#[derive(Debug, Clone)]
pub struct Ticket {
    pub subject: String,
    pub severity: u8,
}

impl Ticket {
    pub fn new(subject: impl Into<String>, severity: u8) -> Self {
        Self {
            subject: subject.into(),
            severity,
        }
    }
}

pub trait SupportHandler {
    fn name(&self) -> &str;
    fn can_handle(&self, ticket: &Ticket) -> bool;
}

pub struct Tier {
    name: String,
    max_severity: u8,
}

impl Tier {
    pub fn new(name: impl Into<String>, max_severity: u8) -> Box<dyn SupportHandler> {
        Box::new(Self {
            name: name.into(),
            max_severity,
        })
    }
}

impl SupportHandler for Tier {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_handle(&self, ticket: &Ticket) -> bool {
        ticket.severity <= self.max_severity
    }
}

/// Answers password resets before anyone else looks at them.
pub struct ResetBot;

impl SupportHandler for ResetBot {
    fn name(&self) -> &str {
        "reset bot"
    }

    fn can_handle(&self, ticket: &Ticket) -> bool {
        ticket.subject.to_lowercase().contains("password")
    }
}

pub struct Escalation {
    handler: Box<dyn SupportHandler>,
    next: Option<Box<Escalation>>,
}

impl Escalation {
    pub fn new(handler: Box<dyn SupportHandler>) -> Self {
        Self {
            handler,
            next: None,
        }
    }

    /// Appends `handler` at the end of the chain.
    pub fn then(mut self, handler: Box<dyn SupportHandler>) -> Self {
        let tail = match self.next.take() {
            Some(next) => (*next).then(handler),
            None => Escalation::new(handler),
        };
        self.next = Some(Box::new(tail));
        self
    }

    /// Name of the first handler willing to take the ticket.
    pub fn route(&self, ticket: &Ticket) -> Option<&str> {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.handler.can_handle(ticket) {
                return Some(current.handler.name());
            }
            debug!("{} passes on {:?}", current.handler.name(), ticket.subject);
            link = current.next.as_deref();
        }
        None
    }
}

pub fn chain_of_responsibility(ctx: &mut PageContext<'_>) -> Result<()> {
    let chain = Escalation::new(Box::new(ResetBot))
        .then(Tier::new("help desk", 2))
        .then(Tier::new("engineer", 4))
        .then(Tier::new("incident team", 5));

    let tickets = [
        Ticket::new("Forgot my password", 1),
        Ticket::new("Printer on fire", 3),
        Ticket::new("Typo on the homepage", 1),
        Ticket::new("Database down", 5),
        Ticket::new("Sun went out", 9),
    ];
    for ticket in &tickets {
        let owner = chain.route(ticket).unwrap_or("nobody");
        writeln!(ctx.out, "[sev {}] {:<22} -> {}", ticket.severity, ticket.subject, owner)?;
    }
    Ok(())
}
