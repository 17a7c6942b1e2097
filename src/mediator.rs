//! Mediator: colleagues talk to each other only through a shared room.
//!
//! Members are held weakly, so a colleague dropped by its owner leaves the
//! room without anyone having to call [`Mediator::leave`].

use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

use crate::observer::MulticastRegistry;

pub trait Colleague<M> {
    fn name(&self) -> &str;
    fn receive(&self, from: &str, message: &M);
}

pub struct Mediator<M> {
    members: MulticastRegistry<dyn Colleague<M>>,
}

impl<M> Mediator<M> {
    pub fn new() -> Self {
        Self {
            members: MulticastRegistry::new(),
        }
    }

    pub fn join(&mut self, colleague: &Rc<dyn Colleague<M>>) {
        info!("{} joined", colleague.name());
        self.members.add_weak(colleague);
    }

    pub fn leave(&mut self, colleague: &Rc<dyn Colleague<M>>) -> bool {
        let left = self.members.remove(colleague);
        if left {
            info!("{} left", colleague.name());
        }
        left
    }

    /// Delivers `message` to every live member except `sender` and returns
    /// the number of recipients.
    pub fn broadcast(&mut self, sender: &Rc<dyn Colleague<M>>, message: &M) -> usize {
        self.members.prune();
        let mut delivered = 0;
        for member in self.members.observers() {
            if Rc::ptr_eq(&member, sender) {
                continue;
            }
            member.receive(sender.name(), message);
            delivered += 1;
        }
        debug!("{} broadcast to {} member(s)", sender.name(), delivered);
        delivered
    }

    /// Delivers `message` to the first live member called `recipient`.
    /// Returns `false` when nobody by that name is in the room.
    pub fn send_to(&mut self, sender: &Rc<dyn Colleague<M>>, recipient: &str, message: &M) -> bool {
        self.members.prune();
        match self
            .members
            .observers()
            .into_iter()
            .find(|m| m.name() == recipient)
        {
            Some(member) => {
                member.receive(sender.name(), message);
                true
            }
            None => {
                debug!("{} -> {}: no such member", sender.name(), recipient);
                false
            }
        }
    }

    pub fn members(&self) -> Vec<String> {
        self.members
            .observers()
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }
}

impl<M> Default for Mediator<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ready-made colleague that keeps everything it receives.
pub struct Participant {
    name: String,
    inbox: RefCell<Vec<(String, String)>>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            inbox: RefCell::new(Vec::new()),
        })
    }

    /// `(from, message)` pairs in arrival order.
    pub fn inbox(&self) -> Vec<(String, String)> {
        self.inbox.borrow().clone()
    }
}

impl Colleague<String> for Participant {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, from: &str, message: &String) {
        self.inbox
            .borrow_mut()
            .push((from.to_string(), message.clone()));
    }
}
