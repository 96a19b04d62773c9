//! Simulated I2C bus and delay source for unit tests.
//!
//! [`MockBus`] hands out a [`MockI2c`] and a [`MockDelay`] that share one
//! event log, so tests can check the exact order of writes, reads and
//! delays a driver call produced.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{Error, ErrorKind, ErrorType, I2c, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Scripted response to one read transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Frame([u8; 3]),
    Nack,
}

/// Result frame with the ready flag clear.
pub fn ready(raw: i16, config: u8) -> Reply {
    let [hi, lo] = raw.to_be_bytes();
    Reply::Frame([hi, lo, config & 0x7F])
}

/// Result frame with the ready flag set.
pub fn busy(raw: i16, config: u8) -> Reply {
    let [hi, lo] = raw.to_be_bytes();
    Reply::Frame([hi, lo, config | 0x80])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write(u8, Vec<u8>),
    Read(u8),
    Delay(u32),
}

#[derive(Default)]
struct State {
    replies: VecDeque<Reply>,
    events: Vec<Event>,
    fail_writes: bool,
}

pub struct MockBus {
    state: Rc<RefCell<State>>,
}

impl MockBus {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        let state = State {
            replies: replies.into_iter().collect(),
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn i2c(&self) -> MockI2c {
        MockI2c {
            state: Rc::clone(&self.state),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Rc::clone(&self.state),
        }
    }

    /// Make every subsequent write transaction fail.
    pub fn fail_writes(&self) {
        self.state.borrow_mut().fail_writes = true;
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write(_, bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes().len()
    }

    pub fn read_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::Read(_)))
            .count()
    }

    /// Delays in nanoseconds, in call order.
    pub fn delays(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Delay(ns) => Some(ns),
                _ => None,
            })
            .collect()
    }
}

pub struct MockI2c {
    state: Rc<RefCell<State>>,
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    state.events.push(Event::Write(address, bytes.to_vec()));
                    if state.fail_writes {
                        return Err(MockError);
                    }
                }
                Operation::Read(buffer) => {
                    state.events.push(Event::Read(address));
                    match state.replies.pop_front() {
                        Some(Reply::Frame(frame)) => {
                            let len = buffer.len().min(frame.len());
                            buffer[..len].copy_from_slice(&frame[..len]);
                        }
                        Some(Reply::Nack) | None => return Err(MockError),
                    }
                }
            }
        }

        Ok(())
    }
}

pub struct MockDelay {
    state: Rc<RefCell<State>>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.state.borrow_mut().events.push(Event::Delay(ns));
    }
}
