//! Scripted stand-ins for a browser tab and session

#![allow(dead_code)]

use plate_search::config::Timing;
use plate_search::error::InteractionError;
use plate_search::{PageActions, PageContract, PlateCheckFlow, SessionHandle};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// How the fake portal answers a given plate
#[derive(Debug, Clone)]
pub enum Script {
    /// Result panel shows this text
    Shows(String),
    /// Result panel never appears
    NoResultPanel,
    /// The plate input disappears between the wait and the fill
    InputVanishes,
    /// Clicking submit blows up
    Crash(String),
}

#[derive(Default)]
pub struct FakePage {
    scripts: HashMap<String, Script>,
    body_missing: bool,
    typed: RefCell<String>,
    submitted: Cell<bool>,
    /// Every plate typed into the input, in order
    pub filled: RefCell<Vec<String>>,
    pub navigations: Cell<usize>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, plate: &str, script: Script) -> Self {
        self.scripts.insert(plate.to_string(), script);
        self
    }

    pub fn without_body(mut self) -> Self {
        self.body_missing = true;
        self
    }

    pub fn filled(&self) -> Vec<String> {
        self.filled.borrow().clone()
    }

    fn script(&self) -> Script {
        let plate = self.typed.borrow().clone();
        self.scripts
            .get(&plate)
            .cloned()
            .unwrap_or_else(|| Script::Shows(format!("Congratulations! {plate} is available")))
    }
}

impl PageActions for FakePage {
    async fn navigate(&self, _url: &str) -> Result<(), InteractionError> {
        self.navigations.set(self.navigations.get() + 1);
        self.typed.borrow_mut().clear();
        self.submitted.set(false);
        Ok(())
    }

    async fn is_present(&self, selector: &str) -> Result<bool, InteractionError> {
        let contract = PageContract::default();
        if selector == contract.page_ready {
            return Ok(!self.body_missing);
        }
        if selector == contract.result_display {
            return Ok(self.submitted.get() && !matches!(self.script(), Script::NoResultPanel));
        }
        Ok(true)
    }

    async fn is_interactable(&self, _selector: &str) -> Result<bool, InteractionError> {
        Ok(true)
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), InteractionError> {
        *self.typed.borrow_mut() = value.to_string();
        if matches!(self.script(), Script::InputVanishes) {
            return Err(InteractionError::element_not_found(selector));
        }
        self.filled.borrow_mut().push(value.to_string());
        Ok(())
    }

    async fn click(&self, _selector: &str) -> Result<(), InteractionError> {
        if let Script::Crash(msg) = self.script() {
            return Err(InteractionError::Unexpected(msg));
        }
        self.submitted.set(true);
        Ok(())
    }

    async fn text_of(&self, _selector: &str) -> Result<String, InteractionError> {
        match self.script() {
            Script::Shows(text) => Ok(text),
            _ => Ok(String::new()),
        }
    }
}

/// Session that counts how often it was released
pub struct FakeSession {
    pub page: FakePage,
    pub releases: Rc<Cell<usize>>,
}

impl FakeSession {
    pub fn new(page: FakePage) -> (Self, Rc<Cell<usize>>) {
        let releases = Rc::new(Cell::new(0));
        (
            Self {
                page,
                releases: Rc::clone(&releases),
            },
            releases,
        )
    }
}

impl SessionHandle for FakeSession {
    type Page = FakePage;

    fn page(&self) -> &FakePage {
        &self.page
    }

    async fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// Short timings so timeouts resolve quickly on the paused clock
pub fn test_timing() -> Timing {
    Timing {
        step_timeout_secs: 1,
        page_settle_ms: 0,
        poll_interval_ms: 10,
        pacing_secs: 0,
    }
}

pub fn test_flow() -> PlateCheckFlow {
    PlateCheckFlow::new(PageContract::default(), &test_timing())
}

pub fn plates(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
