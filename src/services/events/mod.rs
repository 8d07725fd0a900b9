//! Picker notifications.
//!
//! Listeners register for one [`EventKind`] and are called synchronously,
//! in registration order, every time an event of that kind fires.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::models::calendar_date::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Select,
    Show,
    Hide,
}

/// Sorted selection snapshot carried by `select` events.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPayload {
    Dates(Vec<CalendarDate>),
    Raw(Vec<i64>),
}

impl SelectionPayload {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            SelectionPayload::Dates(dates) => dates.len(),
            SelectionPayload::Raw(stamps) => stamps.len(),
        }
    }

    /// Epoch milliseconds of the snapshot, invalid dates skipped.
    pub fn timestamps(&self) -> Vec<i64> {
        match self {
            SelectionPayload::Dates(dates) => dates.iter().filter_map(|d| d.value_of()).collect(),
            SelectionPayload::Raw(stamps) => stamps.clone(),
        }
    }
}

impl Serialize for SelectionPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SelectionPayload::Dates(dates) => serializer.collect_seq(dates.iter().map(|d| d.to_string())),
            SelectionPayload::Raw(stamps) => serializer.collect_seq(stamps),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    Select(SelectionPayload),
    Show,
    Hide,
}

impl PickerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PickerEvent::Select(_) => EventKind::Select,
            PickerEvent::Show => EventKind::Show,
            PickerEvent::Hide => EventKind::Hide,
        }
    }
}

/// Handle returned by [`EventBus::on`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<RefCell<dyn FnMut(&PickerEvent)>>;

struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

/// Listener registry shared by the parts of one picker.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, kind: EventKind, handler: impl FnMut(&PickerEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        id
    }

    /// Removes a listener. Returns false when it was not registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        listeners.len() != before
    }

    pub fn fire(&self, event: &PickerEvent) {
        // Snapshot first so handlers may register or remove listeners.
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == event.kind())
            .map(|listener| Rc::clone(&listener.handler))
            .collect();

        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (&mut *handler)(event);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
